//! cheese-plate - Cheese-plate constructor for a small cheese shop.
//!
//! Given a catalog of in-stock cheeses grouped into weighted groups, this
//! library assembles random "plates" of 3 to 7 distinct cheeses. A plate can
//! favor one category, leave out mold cheeses, or aim at a budget.
//!
//! # Example
//!
//! ```no_run
//! use cheese_plate::{build_cheese_plate, ConstructorConfig, JsonFileRepository, PlateRequest, ThreadRandom};
//!
//! let repo = JsonFileRepository::new("catalog.json");
//! let request = PlateRequest {
//!     exclude_mold: true,
//!     cheese_count: Some(5.0),
//!     target_price: Some(1500.0),
//!     ..Default::default()
//! };
//! let plate = build_cheese_plate(&repo, &request, &ConstructorConfig::default(), &mut ThreadRandom::new()).unwrap();
//! match plate {
//!     Some(plate) => println!("{} cheeses for ~{}", plate.len(), plate.approx_total_price()),
//!     None => println!("Nothing fits, relax the filters"),
//! }
//! ```

pub mod actions;
pub mod config;
pub mod constructor;
pub mod error;
pub mod model;
pub mod pricing;
pub mod random;
pub mod repository;
pub mod validation;

// Re-exports for convenience
pub use actions::{
    build_plate_action, suggestions_action, BuildPlateParams, PlateResponse, SuggestionsResponse,
};
pub use config::ConstructorConfig;
pub use constructor::{
    build_cheese_plate, build_random_plate, build_suggestions, load_dataset, ConstructorDataset,
    PlateRequest,
};
pub use error::{PlateError, Result};
pub use model::{Catalog, Category, Plate, PlateItem, Product, ProductGroup, Unit};
pub use pricing::approx_portion_price;
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use repository::{JsonFileRepository, ProductRepository};
pub use validation::{validate_catalog, ValidationResult};

/// Build one plate from a catalog file with default settings.
///
/// The file is read once, the plate is drawn with a thread-local generator.
pub fn build_plate_from_file(
    path: &std::path::Path,
    request: &PlateRequest,
) -> Result<Option<Plate>> {
    let repo = JsonFileRepository::new(path);
    let plate = build_cheese_plate(
        &repo,
        request,
        &ConstructorConfig::default(),
        &mut ThreadRandom::new(),
    )?;

    if plate.is_none() {
        tracing::debug!("No plate for {:?} from {}", request, path.display());
    }

    Ok(plate)
}
