//! Ready-made plate suggestions.

use std::collections::HashSet;

use super::assembler::build_random_plate;
use super::dataset::{load_dataset, ConstructorDataset};
use crate::config::{clamp_cheese_count, clamp_suggestion_count, ConstructorConfig};
use crate::error::Result;
use crate::model::Plate;
use crate::random::RandomSource;
use crate::repository::ProductRepository;

/// Build up to `count` distinct random plates, mold cheeses included.
///
/// `count` is clamped into `[1, 6]`. Fewer plates come back when the catalog
/// is too small to produce enough distinct ones.
pub fn build_suggestions<P, R>(
    repo: &P,
    count: Option<f64>,
    config: &ConstructorConfig,
    rng: &mut R,
) -> Result<Vec<Plate>>
where
    P: ProductRepository + ?Sized,
    R: RandomSource + ?Sized,
{
    let dataset = load_dataset(repo, false)?;
    if dataset.is_empty() {
        return Ok(Vec::new());
    }

    let target = clamp_suggestion_count(count);
    Ok(suggest_plates(&dataset, target, config, rng))
}

/// Draw plates until `target` distinct ones are found or attempts run out.
///
/// Two plates are the same if they hold the same set of products. Stops at
/// the first failed assembly.
pub fn suggest_plates<R: RandomSource + ?Sized>(
    dataset: &ConstructorDataset,
    target: usize,
    config: &ConstructorConfig,
    rng: &mut R,
) -> Vec<Plate> {
    let mut plates = Vec::with_capacity(target);
    let mut seen = HashSet::new();
    let mut attempts = target * config.suggestion_attempts_per_plate;

    while plates.len() < target && attempts > 0 {
        attempts -= 1;
        let cheese_count = clamp_cheese_count(None, rng);
        let Some(plate) = build_random_plate(dataset, cheese_count, None, rng) else {
            break;
        };
        if seen.insert(plate.signature()) {
            plates.push(plate);
        }
    }

    tracing::debug!("Built {} of {} suggestion(s)", plates.len(), target);
    plates
}
