#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use kiosk_api::catalog::OpenStoreCatalog;
use kiosk_api::config::ServerConfig;
use kiosk_api::router::build_app_router;
use kiosk_api::state::AppState;
use kiosk_api::ws::WsManager;
use kiosk_core::pairing::{PairingConfig, PairingRegistry};
use kiosk_core::types::{DbId, Timestamp};
use kiosk_db::models::display::{Display, DisplayFilter, NewDisplay};
use kiosk_db::models::status::DisplayStatus;
use kiosk_db::store::DisplayStore;
use tokio::sync::Mutex;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        pairing_code_ttl_secs: 300,
        pairing_sweep_interval_secs: 5,
    }
}

// ---------------------------------------------------------------------------
// In-memory display store
// ---------------------------------------------------------------------------

/// `DisplayStore` kept in a `Vec`, with a switch to make inserts fail.
#[derive(Default)]
pub struct MemoryDisplayStore {
    rows: Mutex<Vec<Display>>,
    next_id: AtomicI64,
    fail_creates: AtomicBool,
    healthy: AtomicBool,
}

impl MemoryDisplayStore {
    pub fn new() -> Self {
        Self {
            healthy: AtomicBool::new(true),
            ..Self::default()
        }
    }

    /// Make every subsequent `create` fail with a pool error.
    pub fn fail_creates(&self) {
        self.fail_creates.store(true, Ordering::SeqCst);
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }
}

#[async_trait]
impl DisplayStore for MemoryDisplayStore {
    async fn create(&self, input: NewDisplay) -> Result<Display, sqlx::Error> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        let now = chrono::Utc::now();
        let display = Display {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: input.name,
            store_id: input.store_id,
            module_id: input.module_id,
            status: input.status,
            code: input.code,
            last_seen: input.last_seen,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().await.push(display.clone());
        Ok(display)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Display>, sqlx::Error> {
        Ok(self.rows.lock().await.iter().find(|d| d.id == id).cloned())
    }

    async fn list(&self, filter: &DisplayFilter) -> Result<Vec<Display>, sqlx::Error> {
        let rows = self.rows.lock().await;
        let mut out: Vec<Display> = rows
            .iter()
            .filter(|d| filter.store_id.as_ref().map_or(true, |s| &d.store_id == s))
            .filter(|d| filter.module_id.as_ref().map_or(true, |m| &d.module_id == m))
            .filter(|d| filter.status.map_or(true, |s| d.status == s))
            .cloned()
            .collect();
        out.reverse();
        Ok(out)
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|d| d.id != id);
        Ok(rows.len() < before)
    }

    async fn update_status(
        &self,
        id: DbId,
        status: DisplayStatus,
        last_seen: Timestamp,
    ) -> Result<Option<Display>, sqlx::Error> {
        let mut rows = self.rows.lock().await;
        Ok(rows.iter_mut().find(|d| d.id == id).map(|d| {
            d.status = status;
            d.last_seen = Some(last_seen);
            d.updated_at = chrono::Utc::now();
            d.clone()
        }))
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(sqlx::Error::PoolClosed)
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build application state around the given store, with default pairing
/// settings and a catalog that accepts every store.
pub fn build_test_state(displays: Arc<MemoryDisplayStore>) -> AppState {
    build_test_state_with(displays, PairingConfig::default())
}

/// Like [`build_test_state`] with explicit pairing settings.
pub fn build_test_state_with(displays: Arc<MemoryDisplayStore>, pairing: PairingConfig) -> AppState {
    AppState {
        config: Arc::new(test_config()),
        ws_manager: Arc::new(WsManager::new()),
        pairing: Arc::new(PairingRegistry::new(pairing)),
        displays,
        store_catalog: Arc::new(OpenStoreCatalog),
    }
}

/// Build the full application router (same middleware stack as
/// production) over `state`.
pub fn build_test_app(state: AppState) -> Router {
    build_app_router(state, &test_config())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
