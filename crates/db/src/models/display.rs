//! Display entity models and DTOs.

use kiosk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::DisplayStatus;

// ---------------------------------------------------------------------------
// Entity structs (match database tables)
// ---------------------------------------------------------------------------

/// A row from the `displays` table: a device bound to a store and module.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Display {
    pub id: DbId,
    pub name: String,
    pub store_id: String,
    pub module_id: String,
    #[sqlx(rename = "status_id")]
    pub status: DisplayStatus,
    /// Pairing code that bound this display. Kept for audit only.
    pub code: String,
    pub last_seen: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create / filter DTOs
// ---------------------------------------------------------------------------

/// DTO for inserting a freshly bound display.
#[derive(Debug, Clone)]
pub struct NewDisplay {
    pub name: String,
    pub store_id: String,
    pub module_id: String,
    pub code: String,
    pub status: DisplayStatus,
    pub last_seen: Option<Timestamp>,
}

/// Optional filters for listing displays. Doubles as the query string of
/// `GET /api/displays`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayFilter {
    pub store_id: Option<String>,
    pub module_id: Option<String>,
    pub status: Option<DisplayStatus>,
}

/// Body of `PUT /api/displays/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDisplayStatus {
    pub status: DisplayStatus,
}
