use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Serialize;

use rent_to_own_core::market::{self, MarketSnapshot};
use rent_to_own_core::scenarios::{self, ScenarioComparisonInput};
use rent_to_own_core::validation;
use rent_to_own_core::CalculatorInput;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[derive(Serialize)]
struct ValidationReport {
    valid: bool,
    errors: Vec<String>,
}

// ---------------------------------------------------------------------------
// Affordability
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_affordability(input_json: String) -> NapiResult<String> {
    let input: CalculatorInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = rent_to_own_core::calculate_affordability(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Never throws for rule violations; they come back in `errors`.
#[napi]
pub fn validate_inputs(input_json: String) -> NapiResult<String> {
    let input: CalculatorInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let errors = validation::validate_inputs(&input);
    let report = ValidationReport {
        valid: errors.is_empty(),
        errors,
    };
    serde_json::to_string(&report).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_rent_to_equity(input_json: String) -> NapiResult<String> {
    let input: ScenarioComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = scenarios::compare_rent_to_equity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Market
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_market(input_json: String) -> NapiResult<String> {
    let snapshot: MarketSnapshot = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = market::analyze_market(&snapshot).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Takes `{ "snapshot": ..., "base": ... }` and returns the seeded
/// calculator input.
#[napi]
pub fn seed_input_from_market(input_json: String) -> NapiResult<String> {
    #[derive(serde::Deserialize)]
    struct SeedRequest {
        snapshot: MarketSnapshot,
        base: CalculatorInput,
    }

    let request: SeedRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let seeded = market::seed_input(&request.snapshot, &request.base);
    serde_json::to_string(&seeded).map_err(to_napi_error)
}
