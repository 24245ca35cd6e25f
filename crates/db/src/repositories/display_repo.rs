//! Repository for the `displays` table.

use kiosk_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::display::{Display, DisplayFilter, NewDisplay};
use crate::models::status::DisplayStatus;

/// Column list for `displays` queries.
const COLUMNS: &str = "\
    id, name, store_id, module_id, status_id, code, last_seen, \
    created_at, updated_at";

/// Provides CRUD operations for bound displays.
pub struct DisplayRepo;

impl DisplayRepo {
    /// Insert a new display, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewDisplay) -> Result<Display, sqlx::Error> {
        let query = format!(
            "INSERT INTO displays (name, store_id, module_id, status_id, code, last_seen)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Display>(&query)
            .bind(&input.name)
            .bind(&input.store_id)
            .bind(&input.module_id)
            .bind(input.status.id())
            .bind(&input.code)
            .bind(input.last_seen)
            .fetch_one(pool)
            .await
    }

    /// Find a display by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Display>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM displays WHERE id = $1");
        sqlx::query_as::<_, Display>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List displays matching the optional filters, newest first.
    pub async fn list(pool: &PgPool, filter: &DisplayFilter) -> Result<Vec<Display>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM displays
             WHERE ($1::TEXT IS NULL OR store_id = $1)
               AND ($2::TEXT IS NULL OR module_id = $2)
               AND ($3::SMALLINT IS NULL OR status_id = $3)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Display>(&query)
            .bind(filter.store_id.as_deref())
            .bind(filter.module_id.as_deref())
            .bind(filter.status.map(DisplayStatus::id))
            .fetch_all(pool)
            .await
    }

    /// Delete a display. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM displays WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a status report from the device.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: DisplayStatus,
        last_seen: Timestamp,
    ) -> Result<Option<Display>, sqlx::Error> {
        let query = format!(
            "UPDATE displays SET status_id = $2, last_seen = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Display>(&query)
            .bind(id)
            .bind(status.id())
            .bind(last_seen)
            .fetch_optional(pool)
            .await
    }
}
