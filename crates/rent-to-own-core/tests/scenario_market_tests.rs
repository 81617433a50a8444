#![cfg(all(feature = "scenarios", feature = "market"))]

use pretty_assertions::assert_eq;
use rent_to_own_core::market::{analyze_market, seed_input, MarketSnapshot, OpportunityRating};
use rent_to_own_core::scenarios::{compare_rent_to_equity, ScenarioComparisonInput};
use rent_to_own_core::{calculate_affordability, CalculatorInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const AUSTIN: &str = include_str!("../../../demos/austin_market.json");
const SCENARIOS: &str = include_str!("../../../demos/scenarios.json");
const REFERENCE: &str = include_str!("../../../demos/reference_input.json");

fn austin() -> MarketSnapshot {
    serde_json::from_str(AUSTIN).unwrap()
}

#[test]
fn test_demo_market_analysis() {
    let out = analyze_market(&austin()).unwrap();
    assert_eq!(out.result.opportunity_rating, OpportunityRating::Excellent);
    assert!(out.warnings.is_empty());
    assert!((out.result.cap_rate - dec!(4.25)).abs() < dec!(0.01));
}

#[test]
fn test_seeded_input_runs_end_to_end() {
    let base: CalculatorInput = serde_json::from_str(REFERENCE).unwrap();
    let seeded = seed_input(&austin(), &base);
    let out = calculate_affordability(&seeded).unwrap();
    // 20% of 425k = 85k at 25% of 2150 (537.50/month) -> 159 months
    assert_eq!(out.result.total_down_payment_needed, dec!(85_000));
    assert_eq!(out.result.time_to_down_payment_months, 159);
    // 12 months at 6.8% appreciation
    assert!((out.result.equity_schedule[11].home_value - dec!(453_900)).abs() < dec!(0.01));
}

#[test]
fn test_demo_scenarios_ordering() {
    let input: ScenarioComparisonInput = serde_json::from_str(SCENARIOS).unwrap();
    let out = compare_rent_to_equity(&input).unwrap();
    let months: Vec<u32> = out
        .result
        .scenarios
        .iter()
        .map(|s| s.result.as_ref().unwrap().time_to_down_payment_months)
        .collect();
    // 30k down from 240, 480, 720 and 960 per month
    assert_eq!(months, vec![125, 63, 42, 32]);
    assert_eq!(out.result.fastest_to_down_payment, Some(dec!(40)));
}

#[test]
fn test_scenarios_match_direct_calculation() {
    let input: ScenarioComparisonInput = serde_json::from_str(SCENARIOS).unwrap();
    let out = compare_rent_to_equity(&input).unwrap();
    for scenario in &out.result.scenarios {
        let direct = calculate_affordability(&CalculatorInput {
            rent_to_equity_percent: scenario.rent_to_equity_percent,
            ..input.base.clone()
        })
        .unwrap();
        assert_eq!(scenario.result.as_ref(), Some(&direct.result));
    }
}

#[test]
fn test_scenario_months_non_increasing_in_level() {
    let demo: ScenarioComparisonInput = serde_json::from_str(SCENARIOS).unwrap();
    let input = ScenarioComparisonInput {
        rent_to_equity_levels: Some((1..=50).map(Decimal::from).collect()),
        ..demo
    };
    let out = compare_rent_to_equity(&input).unwrap();
    let months: Vec<u32> = out
        .result
        .scenarios
        .iter()
        .map(|s| s.result.as_ref().unwrap().time_to_down_payment_months)
        .collect();
    assert!(months.windows(2).all(|w| w[1] <= w[0]));
}
