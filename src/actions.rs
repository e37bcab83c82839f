//! Storefront entry points: wrap constructor results into client responses.
//!
//! Repository failures are logged and turned into a generic error message.
//! An unsatisfiable request is not an error, but still answers `ok: false`
//! so the client can ask the customer to relax the filters.

use serde::{Deserialize, Serialize};

use crate::config::ConstructorConfig;
use crate::constructor::{build_cheese_plate, build_suggestions, PlateRequest};
use crate::model::Plate;
use crate::random::RandomSource;
use crate::repository::ProductRepository;

/// Shown when no plate fits the request.
pub const NO_PLATE_MESSAGE: &str = "Could not assemble a cheese plate for these conditions. \
     Try different settings (for example, allow mold cheeses or change the budget).";

/// Shown when building a plate failed unexpectedly.
pub const BUILD_FAILED_MESSAGE: &str = "Something went wrong while assembling the plate";

/// Shown when suggestions could not be loaded.
pub const SUGGESTIONS_FAILED_MESSAGE: &str = "Could not load plate suggestions";

/// Parameters of a plate request as sent by the client.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPlateParams {
    #[serde(default)]
    pub favorite_category_id: Option<String>,
    #[serde(default)]
    pub exclude_mold: bool,
    #[serde(default)]
    pub cheese_count: Option<f64>,
    #[serde(default)]
    pub target_price_rub: Option<f64>,
}

impl BuildPlateParams {
    /// Treat empty strings and zeros as "not given".
    pub fn into_request(self) -> PlateRequest {
        PlateRequest {
            favorite_category_id: self.favorite_category_id.filter(|id| !id.is_empty()),
            exclude_mold: self.exclude_mold,
            cheese_count: self.cheese_count.filter(|n| *n != 0.0),
            target_price: self.target_price_rub.filter(|t| *t != 0.0),
        }
    }
}

/// Response of [`build_plate_action`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate: Option<Plate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlateResponse {
    fn success(plate: Plate) -> Self {
        Self {
            ok: true,
            plate: Some(plate),
            error: None,
        }
    }

    fn failure(message: &str) -> Self {
        Self {
            ok: false,
            plate: None,
            error: Some(message.to_string()),
        }
    }
}

/// Response of [`suggestions_action`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionsResponse {
    pub ok: bool,
    pub suggestions: Vec<Plate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Build a plate for a client request.
pub fn build_plate_action<P, R>(
    repo: &P,
    params: BuildPlateParams,
    config: &ConstructorConfig,
    rng: &mut R,
) -> PlateResponse
where
    P: ProductRepository + ?Sized,
    R: RandomSource + ?Sized,
{
    match build_cheese_plate(repo, &params.into_request(), config, rng) {
        Ok(Some(plate)) => PlateResponse::success(plate),
        Ok(None) => PlateResponse::failure(NO_PLATE_MESSAGE),
        Err(err) => {
            tracing::error!("Plate build failed (code {}): {}", err.code_value(), err);
            PlateResponse::failure(BUILD_FAILED_MESSAGE)
        }
    }
}

/// Build ready-made suggestions for the storefront.
pub fn suggestions_action<P, R>(
    repo: &P,
    count: Option<f64>,
    config: &ConstructorConfig,
    rng: &mut R,
) -> SuggestionsResponse
where
    P: ProductRepository + ?Sized,
    R: RandomSource + ?Sized,
{
    match build_suggestions(repo, count, config, rng) {
        Ok(suggestions) => SuggestionsResponse {
            ok: true,
            suggestions,
            error: None,
        },
        Err(err) => {
            tracing::error!("Suggestions failed (code {}): {}", err.code_value(), err);
            SuggestionsResponse {
                ok: false,
                suggestions: Vec::new(),
                error: Some(SUGGESTIONS_FAILED_MESSAGE.to_string()),
            }
        }
    }
}
