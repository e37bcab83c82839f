//! Catalog stored as a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use super::{GroupRecord, ProductRepository};
use crate::error::{PlateError, Result};
use crate::model::Catalog;

/// Repository backed by a JSON catalog file.
///
/// The file is read on every call, so each build sees the current stock.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the catalog file.
    pub fn load(&self) -> Result<Catalog> {
        load_catalog(&self.path)
    }
}

impl ProductRepository for JsonFileRepository {
    fn list_constructor_groups(&self) -> Result<Vec<GroupRecord>> {
        self.load()?.list_constructor_groups()
    }
}

/// Read and decode a catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(PlateError::CatalogNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(PlateError::EmptyCatalog {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!("Read catalog {} ({} bytes)", path.display(), content.len());
    Catalog::from_json_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_missing_file() {
        let repo = JsonFileRepository::new("definitely/not/here.json");
        let err = repo.list_constructor_groups().unwrap_err();
        assert_eq!(err.code(), ErrorCode::CatalogNotFound);
    }
}
