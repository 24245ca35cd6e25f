//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource and
//! maps errors via [`crate::error::AppError`].

pub mod displays;
