//! Cheese-plate constructor: dataset loading, assembly, price search and suggestions.

mod assembler;
mod dataset;
mod search;
mod suggestions;

pub use assembler::{apportion, build_random_plate, favorite_target};
pub use dataset::{load_dataset, Candidate, ConstructorDataset, FavoriteCategory, GroupCandidates};
pub use search::{build_cheese_plate, search_target_price, PlateRequest};
pub use suggestions::{build_suggestions, suggest_plates};
