//! Assembled cheese plate.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::Unit;

/// One cheese on a plate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateItem {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub unit: Unit,
    /// Catalog price per unit.
    pub catalog_price: i64,
    /// Approximate price of one portion.
    pub approx_portion_price: i64,
    pub category_id: String,
    pub category_name: String,
}

/// An ordered set of distinct cheeses.
///
/// The total is always derived from the items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plate {
    items: Vec<PlateItem>,
}

impl Plate {
    /// Create a plate from items in pick order.
    pub fn new(items: Vec<PlateItem>) -> Self {
        Self { items }
    }

    /// Items in pick order.
    pub fn items(&self) -> &[PlateItem] {
        &self.items
    }

    /// Number of cheeses on the plate.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the plate has no cheeses.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of the items' approximate portion prices, saturating at `i64::MAX`.
    pub fn approx_total_price(&self) -> i64 {
        self.items
            .iter()
            .fold(0, |total, it| total.saturating_add(it.approx_portion_price))
    }

    /// Distance between the plate total and a target price.
    pub fn price_gap(&self, target: f64) -> f64 {
        (self.approx_total_price() as f64 - target).abs()
    }

    /// Sorted, comma-joined product ids; equal for plates with the same cheeses.
    pub fn signature(&self) -> String {
        let mut ids: Vec<&str> = self.items.iter().map(|it| it.id.as_str()).collect();
        ids.sort_unstable();
        ids.join(",")
    }
}

impl Serialize for Plate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Plate", 2)?;
        state.serialize_field("items", &self.items)?;
        state.serialize_field("approxTotalPrice", &self.approx_total_price())?;
        state.end()
    }
}
