//! Catalog consistency checks.

mod validate;

pub use validate::{validate_catalog, ValidationResult};
