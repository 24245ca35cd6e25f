//! The display persistence seam.
//!
//! Handlers talk to an `Arc<dyn DisplayStore>` rather than a pool so the
//! binding flow can run against an in-memory store in tests.

use async_trait::async_trait;
use kiosk_core::types::{DbId, Timestamp};

use crate::models::display::{Display, DisplayFilter, NewDisplay};
use crate::models::status::DisplayStatus;
use crate::repositories::DisplayRepo;
use crate::DbPool;

/// Durable registry of bound displays.
#[async_trait]
pub trait DisplayStore: Send + Sync {
    async fn create(&self, input: NewDisplay) -> Result<Display, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Display>, sqlx::Error>;

    async fn list(&self, filter: &DisplayFilter) -> Result<Vec<Display>, sqlx::Error>;

    /// Returns `true` if a display was removed.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    async fn update_status(
        &self,
        id: DbId,
        status: DisplayStatus,
        last_seen: Timestamp,
    ) -> Result<Option<Display>, sqlx::Error>;

    /// Whether the backing storage is reachable.
    async fn health_check(&self) -> Result<(), sqlx::Error>;
}

/// PostgreSQL implementation backed by [`DisplayRepo`].
#[derive(Clone)]
pub struct PgDisplayStore {
    pool: DbPool,
}

impl PgDisplayStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DisplayStore for PgDisplayStore {
    async fn create(&self, input: NewDisplay) -> Result<Display, sqlx::Error> {
        let row = DisplayRepo::create(&self.pool, &input).await?;
        tracing::debug!(display_id = row.id, store_id = %row.store_id, "Display row inserted");
        Ok(row)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Display>, sqlx::Error> {
        DisplayRepo::find_by_id(&self.pool, id).await
    }

    async fn list(&self, filter: &DisplayFilter) -> Result<Vec<Display>, sqlx::Error> {
        DisplayRepo::list(&self.pool, filter).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        DisplayRepo::delete(&self.pool, id).await
    }

    async fn update_status(
        &self,
        id: DbId,
        status: DisplayStatus,
        last_seen: Timestamp,
    ) -> Result<Option<Display>, sqlx::Error> {
        DisplayRepo::update_status(&self.pool, id, status, last_seen).await
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
