//! Binding a paired device to a store.
//!
//! This is where an admin-submitted code turns into a permanent display
//! row. The order is fixed: validate, check the catalog, consume the code,
//! then persist. Consumption is never rolled back, so a failed insert burns
//! the code and the device has to show a new one.

use chrono::Utc;
use kiosk_core::display::{validate_display_name, validate_external_id};
use kiosk_core::error::CoreError;
use kiosk_core::pairing::normalize_code;
use kiosk_db::models::display::{Display, NewDisplay};
use kiosk_db::models::status::DisplayStatus;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::ws::ServerMessage;

/// Body of `POST /api/displays`.
///
/// Every field is optional at the serde level so a missing field is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindDisplayRequest {
    pub name: Option<String>,
    pub hex_code: Option<String>,
    pub store_id: Option<String>,
    pub module_id: Option<String>,
}

/// A bind request that passed validation. `code` is normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindDisplay {
    pub name: String,
    pub code: String,
    pub store_id: String,
    pub module_id: String,
}

fn required<'a>(field: &str, value: &'a Option<String>) -> Result<&'a str, CoreError> {
    value
        .as_deref()
        .ok_or_else(|| CoreError::Validation(format!("Missing required field: {field}")))
}

impl BindDisplayRequest {
    /// Check presence and shape of every field.
    pub fn validate(&self) -> Result<BindDisplay, CoreError> {
        let name = validate_display_name(required("name", &self.name)?)?;
        let store_id = validate_external_id("storeId", required("storeId", &self.store_id)?)?;
        let module_id = validate_external_id("moduleId", required("moduleId", &self.module_id)?)?;

        let code = normalize_code(required("hexCode", &self.hex_code)?);
        if code.is_empty() {
            return Err(CoreError::Validation(
                "hexCode must not be empty".to_string(),
            ));
        }

        Ok(BindDisplay {
            name,
            code,
            store_id,
            module_id,
        })
    }
}

/// Consume a pairing code and create the display it authorizes.
///
/// - Validation or unknown store/module: `400`, nothing consumed.
/// - No active session for the code: `409` (`CODE_NOT_FOUND` / `CODE_EXPIRED`).
/// - Insert failure after consumption: `500` (`PERSISTENCE_ERROR`), code stays burnt.
///
/// On success the device that owned the code is told it has been bound.
pub async fn bind_display(state: &AppState, request: &BindDisplayRequest) -> AppResult<Display> {
    let input = request.validate()?;

    if !state
        .store_catalog
        .module_exists(&input.store_id, &input.module_id)
        .await?
    {
        return Err(CoreError::Validation(format!(
            "Unknown store/module: {}/{}",
            input.store_id, input.module_id
        ))
        .into());
    }

    // Registry lock is held only inside try_consume; the insert below runs
    // without it.
    let conn_id = state.pairing.try_consume(&input.code).await.map_err(|e| {
        tracing::info!(store_id = %input.store_id, error = %e, "Display binding rejected");
        AppError::from(e)
    })?;

    let new_display = NewDisplay {
        name: input.name,
        store_id: input.store_id,
        module_id: input.module_id,
        code: input.code,
        status: DisplayStatus::Online,
        last_seen: Some(Utc::now()),
    };

    let created = state
        .displays
        .create(new_display)
        .await
        .map_err(|e| AppError::Persistence(e.to_string()))?;

    tracing::info!(
        display_id = created.id,
        store_id = %created.store_id,
        module_id = %created.module_id,
        conn_id = %conn_id,
        "Display bound",
    );

    let notice = ServerMessage::DisplayBound {
        display_id: created.id,
        name: created.name.clone(),
        store_id: created.store_id.clone(),
        module_id: created.module_id.clone(),
    };
    if !state.ws_manager.send_to(&conn_id, notice.to_message()).await {
        tracing::debug!(conn_id = %conn_id, "Bound device no longer connected");
    }

    Ok(created)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
