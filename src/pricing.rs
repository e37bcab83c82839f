//! Per-portion pricing.

use crate::config::DEFAULT_PORTION_WEIGHT_GRAMS;
use crate::model::{Product, Unit};

/// Approximate price of one portion of a product.
///
/// `piece` products cost their catalog price. `kg` products cost the price of
/// one average pack, or of [`DEFAULT_PORTION_WEIGHT_GRAMS`] when the pack
/// weight is unknown. Never negative.
pub fn approx_portion_price(product: &Product) -> i64 {
    portion_price(product.unit, product.price, product.avg_pack_weight_grams)
}

/// Portion price from raw fields.
pub fn portion_price(unit: Unit, price: i64, pack_weight_grams: Option<u32>) -> i64 {
    match unit {
        Unit::Piece => price.max(0),
        Unit::Kg => {
            let grams = effective_weight_grams(pack_weight_grams);
            let approx = (price as f64 * grams as f64 / 1000.0).round() as i64;
            approx.max(0)
        }
    }
}

/// Pack weight used for pricing: the given weight if positive, else the default.
pub fn effective_weight_grams(pack_weight_grams: Option<u32>) -> u32 {
    match pack_weight_grams {
        Some(grams) if grams > 0 => grams,
        _ => DEFAULT_PORTION_WEIGHT_GRAMS,
    }
}
