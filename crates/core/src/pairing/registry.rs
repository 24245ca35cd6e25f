//! In-memory registry of in-flight pairing sessions.
//!
//! One [`PairingRegistry`] is created at server start and shared behind an
//! `Arc`. Both indexes (connection -> session, code -> connection) live
//! under a single mutex, so every terminal transition (consume, expire,
//! replace) is decided in exactly one critical section.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use tokio::sync::Mutex;

use crate::pairing::code;
use crate::types::Timestamp;

/// Default lifetime of a pairing code: 5 minutes.
pub const DEFAULT_CODE_TTL_SECS: i64 = 300;

/// Default interval between expiry sweeps.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 5;

/// Registry tuning.
#[derive(Debug, Clone)]
pub struct PairingConfig {
    /// How long a freshly issued code stays valid.
    pub ttl: Duration,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::seconds(DEFAULT_CODE_TTL_SECS),
        }
    }
}

/// Lifecycle state of a pairing session. Every state except `Active` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Consumed,
    Expired,
    Replaced,
}

/// One device connection's current code.
#[derive(Debug, Clone)]
pub struct PairingSession {
    /// Id of the realtime connection that requested the code.
    pub session_id: String,
    /// Normalized code.
    pub code: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub state: SessionState,
}

impl PairingSession {
    /// Whether the TTL has elapsed at `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

/// Expected failures of registry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PairingError {
    /// No active session matches (never issued, consumed, replaced, or the
    /// device disconnected).
    #[error("Pairing code not found")]
    CodeNotFound,

    /// The session existed but its TTL elapsed before consumption.
    #[error("Pairing code expired")]
    CodeExpired,

    /// The registry has been shut down and issues no more codes.
    #[error("Pairing registry is shut down")]
    RegistryClosed,
}

#[derive(Default)]
struct RegistryInner {
    /// Active sessions keyed by connection id.
    sessions: HashMap<String, PairingSession>,
    /// Normalized code -> connection id.
    by_code: HashMap<String, String>,
    closed: bool,
}

impl RegistryInner {
    /// Remove a connection's session from both indexes, stamping it with the
    /// terminal `state`.
    fn retire(&mut self, session_id: &str, state: SessionState) -> Option<PairingSession> {
        let mut session = self.sessions.remove(session_id)?;
        self.by_code.remove(&session.code);
        session.state = state;
        Some(session)
    }
}

/// Process-wide store of unconsumed pairing codes.
pub struct PairingRegistry {
    config: PairingConfig,
    inner: Mutex<RegistryInner>,
}

impl PairingRegistry {
    pub fn new(config: PairingConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(RegistryInner::default()),
        }
    }

    /// Issue a fresh code for `session_id`.
    ///
    /// Any code the connection already holds is retired as `Replaced` and is
    /// unusable from this point on.
    pub async fn request_code(&self, session_id: &str) -> Result<PairingSession, PairingError> {
        let mut inner = self.inner.lock().await;
        if inner.closed {
            return Err(PairingError::RegistryClosed);
        }

        if let Some(old) = inner.retire(session_id, SessionState::Replaced) {
            tracing::debug!(conn_id = %session_id, old_code = %old.code, "Pairing code replaced");
        }

        let code = code::generate_unique(&mut rand::rng(), |c| inner.by_code.contains_key(c));
        let now = Utc::now();
        let session = PairingSession {
            session_id: session_id.to_string(),
            code: code.clone(),
            created_at: now,
            expires_at: now + self.config.ttl,
            state: SessionState::Active,
        };

        inner.by_code.insert(code, session_id.to_string());
        inner
            .sessions
            .insert(session_id.to_string(), session.clone());

        Ok(session)
    }

    /// Find the active, unexpired session for `code`.
    pub async fn lookup(&self, code: &str) -> Option<PairingSession> {
        let code = code::normalize_code(code);
        let now = Utc::now();
        let inner = self.inner.lock().await;
        let session_id = inner.by_code.get(&code)?;
        inner
            .sessions
            .get(session_id)
            .filter(|s| !s.is_expired_at(now))
            .cloned()
    }

    /// Atomically consume the session matching `code`, returning the id of
    /// the connection that owned it.
    ///
    /// Of any number of concurrent callers with the same code, at most one
    /// gets `Ok`. A session whose TTL elapsed but which the sweeper has not
    /// reached yet yields `CodeExpired` and is retired on the spot.
    pub async fn try_consume(&self, code: &str) -> Result<String, PairingError> {
        let code = code::normalize_code(code);
        let now = Utc::now();
        let mut inner = self.inner.lock().await;

        let session_id = inner
            .by_code
            .get(&code)
            .cloned()
            .ok_or(PairingError::CodeNotFound)?;

        let expired = inner
            .sessions
            .get(&session_id)
            .map_or(true, |s| s.is_expired_at(now));

        if expired {
            inner.retire(&session_id, SessionState::Expired);
            return Err(PairingError::CodeExpired);
        }

        inner.retire(&session_id, SessionState::Consumed);
        Ok(session_id)
    }

    /// Retire whatever code `session_id` holds. Called when the device's
    /// connection goes away.
    pub async fn on_disconnect(&self, session_id: &str) -> Option<PairingSession> {
        self.inner
            .lock()
            .await
            .retire(session_id, SessionState::Expired)
    }

    /// Retire every session whose TTL has elapsed at `now`. Returns how many
    /// were removed.
    pub async fn sweep_expired(&self, now: Timestamp) -> usize {
        let mut inner = self.inner.lock().await;
        let stale: Vec<String> = inner
            .sessions
            .values()
            .filter(|s| s.is_expired_at(now))
            .map(|s| s.session_id.clone())
            .collect();

        for session_id in &stale {
            inner.retire(session_id, SessionState::Expired);
        }
        stale.len()
    }

    /// Number of sessions whose code is still usable. Expired sessions the
    /// sweeper has not reached yet are not counted.
    pub async fn active_count(&self) -> usize {
        let now = Utc::now();
        self.inner
            .lock()
            .await
            .sessions
            .values()
            .filter(|s| !s.is_expired_at(now))
            .count()
    }

    /// Drop every session and refuse further code requests.
    pub async fn shutdown(&self) -> usize {
        let mut inner = self.inner.lock().await;
        inner.closed = true;
        let count = inner.sessions.len();
        inner.sessions.clear();
        inner.by_code.clear();
        tracing::info!(count, "Pairing registry shut down");
        count
    }
}

impl Default for PairingRegistry {
    fn default() -> Self {
        Self::new(PairingConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
