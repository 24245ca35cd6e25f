//! Validation rules for binding a display to a store.
//!
//! Pure functions used by the binding handler before a pairing code is
//! consumed, so malformed requests never burn a code.

use crate::error::CoreError;

/// Maximum length of a display name.
pub const MAX_DISPLAY_NAME_LEN: usize = 128;

/// Maximum length of a store or module identifier.
pub const MAX_EXTERNAL_ID_LEN: usize = 64;

/// Validate a display name and return it trimmed.
///
/// Rules:
/// - Must not be empty after trimming.
/// - Must not exceed `MAX_DISPLAY_NAME_LEN` characters.
pub fn validate_display_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Display name must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Display name must not exceed {MAX_DISPLAY_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a store or module identifier (`field` names it in the error)
/// and return it trimmed.
pub fn validate_external_id(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_EXTERNAL_ID_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must not exceed {MAX_EXTERNAL_ID_LEN} characters"
        )));
    }
    if trimmed.chars().any(char::is_control) {
        return Err(CoreError::Validation(format!(
            "{field} must not contain control characters"
        )));
    }
    Ok(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
