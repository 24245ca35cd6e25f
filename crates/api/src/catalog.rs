//! Store/module lookup consulted by the binding flow.
//!
//! Stores and modules are owned by the admin CRUD service; this crate only
//! needs to ask whether a pair exists before it burns a pairing code.

use async_trait::async_trait;
use kiosk_core::error::CoreError;

/// Answers whether a store/module pair can receive a display.
#[async_trait]
pub trait StoreCatalog: Send + Sync {
    async fn module_exists(&self, store_id: &str, module_id: &str) -> Result<bool, CoreError>;
}

/// Catalog that accepts every store/module pair. Used when no catalog
/// service is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenStoreCatalog;

#[async_trait]
impl StoreCatalog for OpenStoreCatalog {
    async fn module_exists(&self, _store_id: &str, _module_id: &str) -> Result<bool, CoreError> {
        Ok(true)
    }
}
