//! Side-by-side comparison of rent-to-equity levels.
//!
//! Re-runs the affordability analysis for each requested rent-to-equity
//! percentage with everything else held fixed. A level that fails (for
//! example 0%, which never reaches the down payment) is reported alongside
//! the others rather than aborting the comparison.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::affordability::{calculate_affordability, AffordabilityResult, CalculatorInput};
use crate::error::RentToOwnError;
use crate::types::{with_metadata, ComputationOutput, Percent};
use crate::validation::ensure_valid;
use crate::RentToOwnResult;

/// Levels compared when the caller does not supply any.
pub const DEFAULT_RENT_TO_EQUITY_LEVELS: [Decimal; 3] = [dec!(15), dec!(25), dec!(35)];

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparisonInput {
    pub base: CalculatorInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent_to_equity_levels: Option<Vec<Percent>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentToEquityScenario {
    pub rent_to_equity_percent: Percent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AffordabilityResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparisonOutput {
    pub scenarios: Vec<RentToEquityScenario>,
    /// Level with the fewest months to down payment.
    pub fastest_to_down_payment: Option<Percent>,
    /// Level with the highest qualification score (lowest level on ties).
    pub highest_score: Option<Percent>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compare the affordability outcome across rent-to-equity levels.
pub fn compare_rent_to_equity(
    input: &ScenarioComparisonInput,
) -> RentToOwnResult<ComputationOutput<ScenarioComparisonOutput>> {
    let levels: Vec<Percent> = match &input.rent_to_equity_levels {
        Some(levels) if levels.is_empty() => {
            return Err(RentToOwnError::InvalidInput {
                field: "rent_to_equity_levels".into(),
                reason: "At least one rent-to-equity level is required".into(),
            });
        }
        Some(levels) => levels.clone(),
        None => DEFAULT_RENT_TO_EQUITY_LEVELS.to_vec(),
    };

    let mut warnings: Vec<String> = Vec::new();
    let mut scenarios = Vec::with_capacity(levels.len());

    for level in &levels {
        let scenario_input = CalculatorInput {
            rent_to_equity_percent: *level,
            ..input.base.clone()
        };
        let scenario = match calculate_affordability(&scenario_input) {
            Ok(out) => {
                warnings.extend(
                    out.warnings
                        .into_iter()
                        .map(|w| format!("{level}% rent-to-equity: {w}")),
                );
                RentToEquityScenario {
                    rent_to_equity_percent: *level,
                    result: Some(out.result),
                    error: None,
                }
            }
            Err(e) => RentToEquityScenario {
                rent_to_equity_percent: *level,
                result: None,
                error: Some(e.to_string()),
            },
        };
        scenarios.push(scenario);
    }

    // Surface input problems that are not caused by the level itself.
    if scenarios.iter().all(|s| s.result.is_none()) {
        ensure_valid(&input.base)?;
    }

    let fastest_to_down_payment = scenarios
        .iter()
        .filter_map(|s| s.result.as_ref().map(|r| (s.rent_to_equity_percent, r)))
        .min_by_key(|(_, r)| r.time_to_down_payment_months)
        .map(|(level, _)| level);

    let highest_score = scenarios
        .iter()
        .filter_map(|s| s.result.as_ref().map(|r| (s.rent_to_equity_percent, r)))
        .fold(None::<(Percent, u32)>, |best, (level, r)| match best {
            Some((_, score)) if score >= r.qualification_score => best,
            _ => Some((level, r.qualification_score)),
        })
        .map(|(level, _)| level);

    let assumptions = serde_json::json!({
        "rent_to_equity_levels": levels.iter().map(|l| l.to_string()).collect::<Vec<_>>(),
    });

    Ok(with_metadata(
        "Rent-to-Equity Scenario Comparison",
        &assumptions,
        warnings,
        ScenarioComparisonOutput {
            scenarios,
            fastest_to_down_payment,
            highest_score,
        },
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base() -> CalculatorInput {
        CalculatorInput {
            monthly_income: dec!(8000),
            current_rent: dec!(2400),
            property_value: dec!(300_000),
            rent_to_equity_percent: dec!(25),
            loan_term_years: 30,
            interest_rate: dec!(6),
            target_down_payment: dec!(10),
            monthly_debt_payments: dec!(300),
            credit_score: Some(700),
            property_tax_rate: dec!(1.1),
            home_insurance_annual: None,
            hoa_monthly: None,
            maintenance_percent: None,
            property_appreciation_rate: dec!(3),
        }
    }

    #[test]
    fn test_default_levels() {
        let input = ScenarioComparisonInput {
            base: base(),
            rent_to_equity_levels: None,
        };
        let out = compare_rent_to_equity(&input).unwrap();
        let levels: Vec<Decimal> = out
            .result
            .scenarios
            .iter()
            .map(|s| s.rent_to_equity_percent)
            .collect();
        assert_eq!(levels, vec![dec!(15), dec!(25), dec!(35)]);
        assert!(out.result.scenarios.iter().all(|s| s.result.is_some()));
    }

    #[test]
    fn test_higher_level_reaches_down_payment_sooner() {
        let input = ScenarioComparisonInput {
            base: base(),
            rent_to_equity_levels: None,
        };
        let out = compare_rent_to_equity(&input).unwrap();
        let months: Vec<u32> = out
            .result
            .scenarios
            .iter()
            .map(|s| s.result.as_ref().unwrap().time_to_down_payment_months)
            .collect();
        // 30k down: 360/mo -> 84, 600/mo -> 50, 840/mo -> 36
        assert_eq!(months, vec![84, 50, 36]);
        assert_eq!(out.result.fastest_to_down_payment, Some(dec!(35)));
        assert_eq!(out.result.highest_score, Some(dec!(35)));
    }

    #[test]
    fn test_zero_level_reported_not_fatal() {
        let input = ScenarioComparisonInput {
            base: base(),
            rent_to_equity_levels: Some(vec![Decimal::ZERO, dec!(20)]),
        };
        let out = compare_rent_to_equity(&input).unwrap();
        let zero = &out.result.scenarios[0];
        assert!(zero.result.is_none());
        assert!(zero.error.as_deref().unwrap().contains("Cannot reach down payment"));
        assert!(out.result.scenarios[1].result.is_some());
    }

    #[test]
    fn test_empty_levels_rejected() {
        let input = ScenarioComparisonInput {
            base: base(),
            rent_to_equity_levels: Some(vec![]),
        };
        assert!(compare_rent_to_equity(&input).is_err());
    }

    #[test]
    fn test_invalid_base_propagates_validation() {
        let mut b = base();
        b.monthly_income = Decimal::ZERO;
        let input = ScenarioComparisonInput {
            base: b,
            rent_to_equity_levels: None,
        };
        let err = compare_rent_to_equity(&input).unwrap_err();
        assert!(matches!(err, RentToOwnError::Validation(_)));
    }
}
