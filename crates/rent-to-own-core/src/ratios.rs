//! Debt-to-income, loan-to-value and rate stress testing.
//!
//! Housing cost here is full PITI: principal and interest plus property tax,
//! insurance, PMI and HOA dues. Ratios are reported in percent.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::monthly_payment;
use crate::error::RentToOwnError;
use crate::policy::{
    PMI_ANNUAL_RATE, PMI_EXEMPT_DOWN_PAYMENT, STRESS_TEST_FLOOR, STRESS_TEST_MAX_BACK_END,
    STRESS_TEST_SHOCK,
};
use crate::types::{Money, Percent};
use crate::RentToOwnResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatioInput {
    pub monthly_income: Money,
    pub monthly_debt_payments: Money,
    pub property_value: Money,
    pub loan_amount: Money,
    /// Annual contract rate in percent.
    pub interest_rate: Percent,
    pub term_years: u32,
    /// Down payment as a percentage of property value.
    pub target_down_payment: Percent,
    pub monthly_property_tax: Money,
    pub monthly_insurance: Money,
    pub monthly_hoa: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioOutput {
    pub monthly_payment: Money,
    pub monthly_pmi: Money,
    pub monthly_piti: Money,
    pub front_end_ratio: Percent,
    pub back_end_ratio: Percent,
    pub loan_to_value_ratio: Percent,
    pub stress_test_rate: Percent,
    pub stress_test_payment: Money,
    pub stress_test_piti: Money,
    pub stress_test_back_end_ratio: Percent,
    pub passes_stress_test: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Monthly PMI premium. Zero once the down payment reaches the exemption
/// threshold (inclusive).
pub fn monthly_pmi(loan_amount: Money, target_down_payment: Percent) -> Money {
    if target_down_payment >= PMI_EXEMPT_DOWN_PAYMENT {
        Decimal::ZERO
    } else {
        loan_amount * PMI_ANNUAL_RATE / dec!(12)
    }
}

/// Qualifying rate for the stress test: contract rate plus the shock, never
/// below the floor.
pub fn stress_test_rate(interest_rate: Percent) -> Percent {
    (interest_rate + STRESS_TEST_SHOCK).max(STRESS_TEST_FLOOR)
}

/// Express `numerator` as a percentage of `monthly_income`.
pub fn percent_of_income(numerator: Money, monthly_income: Money) -> RentToOwnResult<Percent> {
    if monthly_income.is_zero() {
        return Err(RentToOwnError::DivisionByZero {
            context: "debt-to-income ratio".into(),
        });
    }
    numerator
        .checked_div(monthly_income)
        .and_then(|r| r.checked_mul(dec!(100)))
        .ok_or_else(|| RentToOwnError::InvalidInput {
            field: "monthly_income".into(),
            reason: format!("{numerator} is too large relative to income of {monthly_income}"),
        })
}

/// Compute DTI, LTV and the stress test for one loan.
pub fn calculate_ratios(input: &RatioInput) -> RentToOwnResult<RatioOutput> {
    validate_input(input)?;

    let pmi = monthly_pmi(input.loan_amount, input.target_down_payment);
    let escrow = input.monthly_property_tax + input.monthly_insurance + pmi + input.monthly_hoa;

    let payment = monthly_payment(input.loan_amount, input.interest_rate, input.term_years)?;
    let piti = payment + escrow;

    let front_end_ratio = percent_of_income(piti, input.monthly_income)?;
    let back_end_ratio =
        percent_of_income(piti + input.monthly_debt_payments, input.monthly_income)?;
    let loan_to_value_ratio = input.loan_amount / input.property_value * dec!(100);

    let stressed_rate = stress_test_rate(input.interest_rate);
    let stressed_payment = monthly_payment(input.loan_amount, stressed_rate, input.term_years)?;
    let stressed_piti = stressed_payment + escrow;
    let stressed_back_end = percent_of_income(
        stressed_piti + input.monthly_debt_payments,
        input.monthly_income,
    )?;

    Ok(RatioOutput {
        monthly_payment: payment,
        monthly_pmi: pmi,
        monthly_piti: piti,
        front_end_ratio,
        back_end_ratio,
        loan_to_value_ratio,
        stress_test_rate: stressed_rate,
        stress_test_payment: stressed_payment,
        stress_test_piti: stressed_piti,
        stress_test_back_end_ratio: stressed_back_end,
        passes_stress_test: stressed_back_end <= STRESS_TEST_MAX_BACK_END,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &RatioInput) -> RentToOwnResult<()> {
    if input.monthly_income <= Decimal::ZERO {
        return Err(RentToOwnError::InvalidInput {
            field: "monthly_income".into(),
            reason: "Monthly income must be positive".into(),
        });
    }
    if input.property_value <= Decimal::ZERO {
        return Err(RentToOwnError::InvalidInput {
            field: "property_value".into(),
            reason: "Property value must be positive".into(),
        });
    }
    if input.monthly_debt_payments < Decimal::ZERO {
        return Err(RentToOwnError::InvalidInput {
            field: "monthly_debt_payments".into(),
            reason: "Monthly debt payments cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_input() -> RatioInput {
        RatioInput {
            monthly_income: dec!(5000),
            monthly_debt_payments: dec!(500),
            property_value: dec!(350_000),
            loan_amount: dec!(280_000),
            interest_rate: dec!(6.5),
            term_years: 30,
            target_down_payment: dec!(20),
            monthly_property_tax: dec!(350),
            monthly_insurance: dec!(1225) / dec!(12),
            monthly_hoa: Decimal::ZERO,
        }
    }

    #[test]
    fn test_no_pmi_at_exactly_twenty_percent() {
        assert_eq!(monthly_pmi(dec!(280_000), dec!(20)), Decimal::ZERO);
        let out = calculate_ratios(&base_input()).unwrap();
        assert_eq!(out.monthly_pmi, Decimal::ZERO);
    }

    #[test]
    fn test_pmi_below_twenty_percent() {
        // 300k * 0.0075 / 12 = 187.5
        assert_eq!(monthly_pmi(dec!(300_000), dec!(19.99)), dec!(187.5));
    }

    #[test]
    fn test_ratios_use_full_piti() {
        let input = base_input();
        let out = calculate_ratios(&input).unwrap();
        let escrow = input.monthly_property_tax + input.monthly_insurance;
        assert_eq!(out.monthly_piti, out.monthly_payment + escrow);
        assert_eq!(out.front_end_ratio, out.monthly_piti / dec!(5000) * dec!(100));
        assert_eq!(
            out.back_end_ratio,
            (out.monthly_piti + dec!(500)) / dec!(5000) * dec!(100)
        );
        assert_eq!(out.loan_to_value_ratio, dec!(80));
    }

    #[test]
    fn test_hoa_counts_toward_piti() {
        let mut input = base_input();
        let without = calculate_ratios(&input).unwrap();
        input.monthly_hoa = dec!(150);
        let with = calculate_ratios(&input).unwrap();
        assert_eq!(with.monthly_piti - without.monthly_piti, dec!(150));
    }

    #[test]
    fn test_stress_rate_adds_shock() {
        assert_eq!(stress_test_rate(dec!(6.5)), dec!(8.5));
    }

    #[test]
    fn test_stress_rate_floor() {
        assert_eq!(stress_test_rate(dec!(2.5)), dec!(5.25));
        assert_eq!(stress_test_rate(dec!(3.25)), dec!(5.25));
        assert_eq!(stress_test_rate(dec!(3.5)), dec!(5.5));
    }

    #[test]
    fn test_stress_test_fails_for_base_scenario() {
        // 280k at 8.5% ≈ 2153 + 452 escrow + 500 debt ≈ 62% of 5000
        let out = calculate_ratios(&base_input()).unwrap();
        assert!(out.stress_test_payment > out.monthly_payment);
        assert!(out.stress_test_back_end_ratio > dec!(44));
        assert!(!out.passes_stress_test);
    }

    #[test]
    fn test_stress_test_passes_with_high_income() {
        let mut input = base_input();
        input.monthly_income = dec!(15_000);
        let out = calculate_ratios(&input).unwrap();
        assert!(out.passes_stress_test);
    }

    #[test]
    fn test_zero_income_rejected() {
        let mut input = base_input();
        input.monthly_income = Decimal::ZERO;
        let err = calculate_ratios(&input).unwrap_err();
        match err {
            RentToOwnError::InvalidInput { field, .. } => assert_eq!(field, "monthly_income"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_percent_of_income_division_guard() {
        let err = percent_of_income(dec!(100), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, RentToOwnError::DivisionByZero { .. }));
    }

    #[test]
    fn test_percent_of_income_overflow_is_an_error() {
        let err = percent_of_income(dec!(1_000_000_000_000_000), dec!(0.000_000_000_000_000_1))
            .unwrap_err();
        match err {
            RentToOwnError::InvalidInput { field, .. } => assert_eq!(field, "monthly_income"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }
}
