//! Product repository: the constructor's only source of catalog data.

mod json;
mod memory;

pub use json::{load_catalog, JsonFileRepository};

use crate::error::Result;
use crate::model::{Category, Product};

/// A product as returned by the repository, with its category if it exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub product: Product,
    pub category: Option<Category>,
}

/// A constructor group with its member products.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRecord {
    pub id: String,
    pub name: String,
    pub base_percent: f64,
    pub display_order: i32,
    pub products: Vec<ProductRecord>,
}

/// Read access to the catalog.
pub trait ProductRepository {
    /// Groups usable by the constructor, ordered by display order then name.
    ///
    /// Member products are returned unfiltered; eligibility is decided by the
    /// dataset loader.
    fn list_constructor_groups(&self) -> Result<Vec<GroupRecord>>;
}

impl<T: ProductRepository + ?Sized> ProductRepository for &T {
    fn list_constructor_groups(&self) -> Result<Vec<GroupRecord>> {
        (**self).list_constructor_groups()
    }
}
