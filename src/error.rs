//! Error types for catalog access and plate construction.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Catalog file not found (-1)
    CatalogNotFound = -1,
    /// Catalog could not be decoded (-2)
    InvalidCatalog = -2,
    /// Underlying storage failed (-3)
    Repository = -3,
}

/// Main error type for the constructor.
///
/// Only failures to read the catalog are errors. A plate that cannot be
/// built is reported as `None`, never as an error.
#[derive(Debug, Error)]
pub enum PlateError {
    #[error("Catalog not found: {path}")]
    CatalogNotFound { path: PathBuf },

    #[error("Empty catalog file: {path}")]
    EmptyCatalog { path: PathBuf },

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate {kind} id '{id}' in catalog")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Repository failure: {message}")]
    Repository { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlateError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PlateError::CatalogNotFound { .. } => ErrorCode::CatalogNotFound,
            PlateError::EmptyCatalog { .. } => ErrorCode::InvalidCatalog,
            PlateError::Json(_) => ErrorCode::InvalidCatalog,
            PlateError::DuplicateId { .. } => ErrorCode::InvalidCatalog,
            PlateError::Repository { .. } => ErrorCode::Repository,
            PlateError::Io(_) => ErrorCode::Repository,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for constructor operations.
pub type Result<T> = std::result::Result<T, PlateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = PlateError::CatalogNotFound {
            path: PathBuf::from("missing.json"),
        };
        assert_eq!(err.code(), ErrorCode::CatalogNotFound);
        assert_eq!(err.code_value(), -1);
        assert_eq!(err.to_string(), "Catalog not found: missing.json");

        let err = PlateError::DuplicateId {
            kind: "product",
            id: "p1".into(),
        };
        assert_eq!(err.code_value(), -2);
        assert_eq!(err.to_string(), "Duplicate product id 'p1' in catalog");
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: PlateError = json_err.into();
        assert_eq!(err.code(), ErrorCode::InvalidCatalog);
    }
}
