//! Configuration constants and settings for the plate constructor.

use crate::random::RandomSource;

/// Smallest number of cheeses on a plate.
pub const MIN_CHEESE_COUNT: usize = 3;

/// Largest number of cheeses on a plate.
pub const MAX_CHEESE_COUNT: usize = 7;

/// Cheese count used when the caller gives none (the other default is this + 1).
pub const DEFAULT_CHEESE_COUNT: usize = 4;

/// Share of the plate reserved for the favorite category.
pub const FAVORITE_SHARE: f64 = 0.6;

/// Portion weight in grams assumed for `kg` products without a pack weight.
pub const DEFAULT_PORTION_WEIGHT_GRAMS: u32 = 200;

/// Number of plates tried when aiming at a target price.
pub const PRICE_TARGET_ATTEMPTS: usize = 40;

/// Largest accepted gap between a plate's total and the target price.
pub const PRICE_TOLERANCE: i64 = 300;

/// Fewest suggestions returned by one request.
pub const MIN_SUGGESTIONS: usize = 1;

/// Most suggestions returned by one request.
pub const MAX_SUGGESTIONS: usize = 6;

/// Suggestion count used when the caller gives none.
pub const DEFAULT_SUGGESTIONS: usize = 4;

/// Assembly attempts allowed per requested suggestion.
pub const SUGGESTION_ATTEMPTS_PER_PLATE: usize = 4;

/// Upper bound for a group's base percent.
pub const MAX_BASE_PERCENT: f64 = 100.0;

/// Tunables for plate construction.
#[derive(Debug, Clone)]
pub struct ConstructorConfig {
    /// Plates tried when aiming at a target price.
    pub price_attempts: usize,
    /// Largest accepted price gap, in currency units.
    pub price_tolerance: i64,
    /// Assembly attempts allowed per requested suggestion.
    pub suggestion_attempts_per_plate: usize,
}

impl Default for ConstructorConfig {
    fn default() -> Self {
        Self {
            price_attempts: PRICE_TARGET_ATTEMPTS,
            price_tolerance: PRICE_TOLERANCE,
            suggestion_attempts_per_plate: SUGGESTION_ATTEMPTS_PER_PLATE,
        }
    }
}

impl ConstructorConfig {
    /// Create a configuration with a custom price tolerance.
    pub fn with_tolerance(price_tolerance: i64) -> Self {
        Self {
            price_tolerance,
            ..Default::default()
        }
    }
}

/// Resolve the requested cheese count.
///
/// The value is rounded and clamped into `[MIN_CHEESE_COUNT, MAX_CHEESE_COUNT]`.
/// A missing or NaN value picks 4 or 5 at random.
pub fn clamp_cheese_count<R: RandomSource + ?Sized>(requested: Option<f64>, rng: &mut R) -> usize {
    match requested {
        Some(n) if !n.is_nan() => {
            let rounded = n.round();
            if rounded < MIN_CHEESE_COUNT as f64 {
                MIN_CHEESE_COUNT
            } else if rounded > MAX_CHEESE_COUNT as f64 {
                MAX_CHEESE_COUNT
            } else {
                rounded as usize
            }
        }
        _ => {
            if rng.coin_flip() {
                DEFAULT_CHEESE_COUNT
            } else {
                DEFAULT_CHEESE_COUNT + 1
            }
        }
    }
}

/// Resolve the requested number of suggestions.
///
/// Missing, NaN and zero fall back to [`DEFAULT_SUGGESTIONS`]; anything else is
/// rounded and clamped into `[MIN_SUGGESTIONS, MAX_SUGGESTIONS]`.
pub fn clamp_suggestion_count(requested: Option<f64>) -> usize {
    let rounded = match requested {
        Some(n) if !n.is_nan() && n.round() != 0.0 => n.round(),
        _ => DEFAULT_SUGGESTIONS as f64,
    };
    rounded.clamp(MIN_SUGGESTIONS as f64, MAX_SUGGESTIONS as f64) as usize
}
