//! Data model types for the shop catalog and assembled plates.

mod catalog;
mod plate;

pub use catalog::{Catalog, Category, Product, ProductGroup, Unit};
pub use plate::{Plate, PlateItem};
