//! Catalog records: categories, products and constructor groups.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{PlateError, Result};

/// Unit a product is sold by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Priced per kilogram, sold in packs of roughly `avg_pack_weight_grams`.
    #[default]
    Kg,
    /// Priced per piece. Any unit other than `kg` is read as a piece.
    #[serde(other)]
    Piece,
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Kg => write!(f, "kg"),
            Unit::Piece => write!(f, "piece"),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Mold cheeses (blue, white rind) can be excluded from a plate.
    #[serde(default)]
    pub is_mold: bool,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_active: true,
            is_mold: false,
        }
    }

    /// Mark this category as a mold category.
    pub fn mold(mut self) -> Self {
        self.is_mold = true;
        self
    }
}

/// Catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub unit: Unit,
    /// Price per unit (per kg or per piece).
    pub price: i64,
    /// Average pack weight in grams, meaningful for `kg` products.
    #[serde(default)]
    pub avg_pack_weight_grams: Option<u32>,
    /// Remaining stock, in units of `unit`.
    #[serde(default)]
    pub remainder: f64,
    pub category_id: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Product {
    /// Create an active `kg` product.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category_id: impl Into<String>,
        price: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: None,
            unit: Unit::Kg,
            price,
            avg_pack_weight_grams: None,
            remainder: 1.0,
            category_id: category_id.into(),
            is_active: true,
        }
    }

    /// Set the unit.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Set the average pack weight.
    pub fn with_pack_weight(mut self, grams: u32) -> Self {
        self.avg_pack_weight_grams = Some(grams);
        self
    }

    /// Set the remaining stock.
    pub fn with_remainder(mut self, remainder: f64) -> Self {
        self.remainder = remainder;
        self
    }

    /// Check if any stock is left.
    pub fn in_stock(&self) -> bool {
        self.remainder > 0.0
    }
}

/// Group of products with a share of the plate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductGroup {
    pub id: String,
    pub name: String,
    /// Relative weight, 0-100. Weights need not sum to 100.
    #[serde(default)]
    pub base_percent: f64,
    #[serde(default = "default_true")]
    pub use_in_constructor: bool,
    /// Display position; does not affect assembly.
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub product_ids: Vec<String>,
}

impl ProductGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_percent: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_percent,
            use_in_constructor: true,
            display_order: 0,
            product_ids: Vec::new(),
        }
    }

    /// Set the member products.
    pub fn with_products<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.product_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}

/// A complete shop catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub groups: Vec<ProductGroup>,
}

impl Catalog {
    /// Decode a catalog from JSON, rejecting duplicate ids.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.check_unique_ids()?;
        Ok(catalog)
    }

    /// Find a category by id.
    pub fn find_category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Find a product by id.
    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    fn check_unique_ids(&self) -> Result<()> {
        check_unique("category", self.categories.iter().map(|c| c.id.as_str()))?;
        check_unique("product", self.products.iter().map(|p| p.id.as_str()))?;
        check_unique("group", self.groups.iter().map(|g| g.id.as_str()))
    }
}

fn check_unique<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(PlateError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
