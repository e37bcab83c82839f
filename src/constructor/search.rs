//! Plate construction with an optional target price.

use super::assembler::build_random_plate;
use super::dataset::{load_dataset, ConstructorDataset};
use crate::config::{clamp_cheese_count, ConstructorConfig};
use crate::error::Result;
use crate::model::Plate;
use crate::random::RandomSource;
use crate::repository::ProductRepository;

/// What the customer asked for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlateRequest {
    /// Category to favor, if any.
    pub favorite_category_id: Option<String>,
    /// Leave mold cheeses out.
    pub exclude_mold: bool,
    /// Requested number of cheeses; clamped into `[3, 7]`.
    pub cheese_count: Option<f64>,
    /// Budget for the whole plate.
    pub target_price: Option<f64>,
}

impl PlateRequest {
    /// Favorite category, ignoring empty strings.
    pub fn favorite(&self) -> Option<&str> {
        self.favorite_category_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }

    /// Target price if it is a positive number.
    pub fn target(&self) -> Option<f64> {
        self.target_price.filter(|t| !t.is_nan() && *t > 0.0)
    }
}

/// Build a cheese plate for a request.
///
/// Returns `Ok(None)` when the catalog cannot satisfy the request: no eligible
/// stock, or no plate within the price tolerance of the target. Repository
/// errors propagate.
pub fn build_cheese_plate<P, R>(
    repo: &P,
    request: &PlateRequest,
    config: &ConstructorConfig,
    rng: &mut R,
) -> Result<Option<Plate>>
where
    P: ProductRepository + ?Sized,
    R: RandomSource + ?Sized,
{
    let cheese_count = clamp_cheese_count(request.cheese_count, rng);
    let dataset = load_dataset(repo, request.exclude_mold)?;

    if dataset.is_empty() {
        tracing::debug!(
            "No eligible cheeses (exclude_mold={})",
            request.exclude_mold
        );
        return Ok(None);
    }

    let plate = match request.target() {
        Some(target) => search_target_price(
            &dataset,
            cheese_count,
            request.favorite(),
            target,
            config,
            rng,
        ),
        None => build_random_plate(&dataset, cheese_count, request.favorite(), rng),
    };

    Ok(plate)
}

/// Best of `config.price_attempts` plates by distance to `target`.
///
/// The best plate is returned only if it lies within `config.price_tolerance`
/// of the target; otherwise `None`. Earlier attempts win ties.
pub fn search_target_price<R: RandomSource + ?Sized>(
    dataset: &ConstructorDataset,
    cheese_count: usize,
    favorite_category_id: Option<&str>,
    target: f64,
    config: &ConstructorConfig,
    rng: &mut R,
) -> Option<Plate> {
    let mut best: Option<(Plate, f64)> = None;

    for _ in 0..config.price_attempts {
        let Some(plate) = build_random_plate(dataset, cheese_count, favorite_category_id, rng)
        else {
            continue;
        };
        let gap = plate.price_gap(target);
        let closer = match &best {
            Some((_, best_gap)) => gap < *best_gap,
            None => true,
        };
        if closer {
            best = Some((plate, gap));
        }
    }

    match best {
        Some((plate, gap)) if gap <= config.price_tolerance as f64 => {
            tracing::debug!(
                "Target {} met with total {} (gap {})",
                target,
                plate.approx_total_price(),
                gap
            );
            Some(plate)
        }
        Some((plate, gap)) => {
            tracing::info!(
                "No plate near target {}: closest total {} (gap {} > {})",
                target,
                plate.approx_total_price(),
                gap,
                config.price_tolerance
            );
            None
        }
        None => None,
    }
}
