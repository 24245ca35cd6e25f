//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row plus the DTOs used to insert or filter it.

pub mod display;
pub mod status;
