//! Handlers for bound displays.
//!
//! Provides:
//! - Binding a device by pairing code (admin dashboard).
//! - Listing, fetching and deleting displays (admin dashboard).
//! - Status reports from the device itself.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use kiosk_core::error::CoreError;
use kiosk_core::types::DbId;
use kiosk_db::models::display::{DisplayFilter, UpdateDisplayStatus};

use crate::binding::{self, BindDisplayRequest};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Unwrap a `Path` extraction, reporting a malformed id as a JSON 400.
fn display_id(path: Result<Path<DbId>, PathRejection>) -> AppResult<DbId> {
    path.map(|Path(id)| id).map_err(|e| AppError::BadRequest(e.body_text()))
}

fn display_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Display",
        id,
    })
}

// ---------------------------------------------------------------------------
// POST /displays
// ---------------------------------------------------------------------------

/// Bind the device currently showing `hexCode` to a store and module.
pub async fn bind_display(
    State(state): State<AppState>,
    payload: Result<Json<BindDisplayRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let display = binding::bind_display(&state, &request).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: display })))
}

// ---------------------------------------------------------------------------
// GET /displays
// ---------------------------------------------------------------------------

/// List displays, optionally filtered by `storeId`, `moduleId`, `status`.
pub async fn list_displays(
    State(state): State<AppState>,
    query: Result<Query<DisplayFilter>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(filter) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let displays = state.displays.list(&filter).await?;
    Ok(Json(DataResponse { data: displays }))
}

// ---------------------------------------------------------------------------
// GET /displays/{id}
// ---------------------------------------------------------------------------

/// Fetch a single display.
pub async fn get_display(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let id = display_id(path)?;
    let display = state
        .displays
        .find_by_id(id)
        .await?
        .ok_or_else(|| display_not_found(id))?;
    Ok(Json(DataResponse { data: display }))
}

// ---------------------------------------------------------------------------
// DELETE /displays/{id}
// ---------------------------------------------------------------------------

/// Unbind a display. Its pairing code stays retired.
pub async fn delete_display(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let id = display_id(path)?;
    if !state.displays.delete(id).await? {
        return Err(display_not_found(id));
    }
    tracing::info!(display_id = id, "Display deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// PUT /displays/{id}/status
// ---------------------------------------------------------------------------

/// Record a status report from the device and bump `lastSeen`.
pub async fn update_display_status(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<UpdateDisplayStatus>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let id = display_id(path)?;
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let updated = state
        .displays
        .update_status(id, input.status, chrono::Utc::now())
        .await?
        .ok_or_else(|| display_not_found(id))?;

    tracing::debug!(display_id = id, status = ?updated.status, "Display status updated");
    Ok(Json(DataResponse { data: updated }))
}
