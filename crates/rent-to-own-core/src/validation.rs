//! Domain checks on raw calculator input.
//!
//! Every rule is evaluated and all violations are returned together, in a
//! fixed order. An empty list means the input can be calculated.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::affordability::CalculatorInput;
use crate::error::RentToOwnError;
use crate::RentToOwnResult;

const MAX_RENT_TO_EQUITY: Decimal = dec!(50);
const MAX_RENT_SHARE_OF_INCOME: Decimal = dec!(0.5);
const MIN_DOWN_PAYMENT: Decimal = dec!(3);
const MAX_DOWN_PAYMENT: Decimal = dec!(100);
const MAX_INTEREST_RATE: Decimal = dec!(20);
const MIN_TERM_YEARS: u32 = 10;
const MAX_TERM_YEARS: u32 = 30;
const MIN_CREDIT_SCORE: u32 = 300;
const MAX_CREDIT_SCORE: u32 = 850;
const MIN_APPRECIATION: Decimal = dec!(-100);
const MAX_APPRECIATION: Decimal = dec!(100);
/// Ceiling on any single money amount; keeps every product and ratio in the
/// pipeline inside `Decimal` range.
const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000_000);
const MAX_COST_PERCENT: Decimal = dec!(100);

/// Return every rule the input violates, as human-readable messages.
pub fn validate_inputs(input: &CalculatorInput) -> Vec<String> {
    let mut errors = Vec::new();

    if input.monthly_income <= Decimal::ZERO {
        errors.push("Monthly income must be greater than 0".to_string());
    }
    if input.current_rent <= Decimal::ZERO {
        errors.push("Current rent must be greater than 0".to_string());
    }
    if input.property_value <= Decimal::ZERO {
        errors.push("Property value must be greater than 0".to_string());
    }
    if input.rent_to_equity_percent < Decimal::ZERO
        || input.rent_to_equity_percent > MAX_RENT_TO_EQUITY
    {
        errors.push("Rent-to-equity percentage must be between 0 and 50".to_string());
    }
    if input.current_rent > input.monthly_income * MAX_RENT_SHARE_OF_INCOME {
        errors.push("Rent should not exceed 50% of monthly income".to_string());
    }
    if input.target_down_payment < MIN_DOWN_PAYMENT {
        errors.push("Target down payment must be at least 3%".to_string());
    }
    if input.interest_rate < Decimal::ZERO || input.interest_rate > MAX_INTEREST_RATE {
        errors.push("Interest rate must be between 0 and 20".to_string());
    }
    if !(MIN_TERM_YEARS..=MAX_TERM_YEARS).contains(&input.loan_term_years) {
        errors.push("Loan term must be between 10 and 30 years".to_string());
    }
    if let Some(score) = input.credit_score {
        if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&score) {
            errors.push("Credit score must be between 300 and 850".to_string());
        }
    }
    if input.monthly_debt_payments < Decimal::ZERO {
        errors.push("Monthly debt payments cannot be negative".to_string());
    }

    // Cost inputs that would otherwise break the projection.
    if input.target_down_payment >= MAX_DOWN_PAYMENT {
        errors.push("Target down payment must be less than 100%".to_string());
    }
    if input.property_tax_rate < Decimal::ZERO {
        errors.push("Property tax rate cannot be negative".to_string());
    }
    if input.maintenance_percent.is_some_and(|m| m < Decimal::ZERO) {
        errors.push("Maintenance percentage cannot be negative".to_string());
    }
    if input.home_insurance_annual.is_some_and(|i| i < Decimal::ZERO) {
        errors.push("Home insurance cannot be negative".to_string());
    }
    if input.hoa_monthly.is_some_and(|h| h < Decimal::ZERO) {
        errors.push("HOA dues cannot be negative".to_string());
    }
    if input.property_appreciation_rate <= MIN_APPRECIATION
        || input.property_appreciation_rate > MAX_APPRECIATION
    {
        errors.push("Property appreciation rate must be above -100% and at most 100%".to_string());
    }

    // Upper limits on magnitudes.
    let amounts = [
        ("Monthly income", Some(input.monthly_income)),
        ("Current rent", Some(input.current_rent)),
        ("Property value", Some(input.property_value)),
        ("Monthly debt payments", Some(input.monthly_debt_payments)),
        ("Home insurance", input.home_insurance_annual),
        ("HOA dues", input.hoa_monthly),
    ];
    for (label, amount) in amounts {
        if amount.is_some_and(|a| a > MAX_AMOUNT) {
            errors.push(format!("{label} must not exceed {MAX_AMOUNT}"));
        }
    }
    if input.property_tax_rate > MAX_COST_PERCENT {
        errors.push("Property tax rate must be at most 100%".to_string());
    }
    if input.maintenance_percent.is_some_and(|m| m > MAX_COST_PERCENT) {
        errors.push("Maintenance percentage must be at most 100%".to_string());
    }

    errors
}

/// Fail with every violation at once if the input is not calculable.
pub fn ensure_valid(input: &CalculatorInput) -> RentToOwnResult<()> {
    let errors = validate_inputs(input);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(RentToOwnError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn valid_input() -> CalculatorInput {
        CalculatorInput {
            monthly_income: dec!(5000),
            current_rent: dec!(2000),
            property_value: dec!(350_000),
            rent_to_equity_percent: dec!(25),
            loan_term_years: 30,
            interest_rate: dec!(6.5),
            target_down_payment: dec!(20),
            monthly_debt_payments: dec!(500),
            credit_score: Some(720),
            property_tax_rate: dec!(1.2),
            home_insurance_annual: Some(dec!(1225)),
            hoa_monthly: Some(Decimal::ZERO),
            maintenance_percent: Some(dec!(1.5)),
            property_appreciation_rate: dec!(3),
        }
    }

    #[test]
    fn test_valid_input_has_no_errors() {
        assert!(validate_inputs(&valid_input()).is_empty());
        assert!(ensure_valid(&valid_input()).is_ok());
    }

    #[test]
    fn test_all_violations_reported_in_order() {
        let mut input = valid_input();
        input.monthly_income = Decimal::ZERO;
        input.rent_to_equity_percent = dec!(60);
        input.interest_rate = dec!(25);
        input.loan_term_years = 40;
        input.credit_score = Some(900);
        input.monthly_debt_payments = dec!(-1);

        let errors = validate_inputs(&input);
        assert_eq!(
            errors,
            vec![
                "Monthly income must be greater than 0",
                "Rent-to-equity percentage must be between 0 and 50",
                "Rent should not exceed 50% of monthly income",
                "Interest rate must be between 0 and 20",
                "Loan term must be between 10 and 30 years",
                "Credit score must be between 300 and 850",
                "Monthly debt payments cannot be negative",
            ]
        );
    }

    #[test]
    fn test_rent_share_boundary_inclusive() {
        let mut input = valid_input();
        input.current_rent = dec!(2500);
        assert!(validate_inputs(&input).is_empty());
        input.current_rent = dec!(2500.01);
        assert_eq!(
            validate_inputs(&input),
            vec!["Rent should not exceed 50% of monthly income"]
        );
    }

    #[test]
    fn test_zero_rent_to_equity_is_valid() {
        let mut input = valid_input();
        input.rent_to_equity_percent = Decimal::ZERO;
        assert!(validate_inputs(&input).is_empty());
    }

    #[test]
    fn test_missing_credit_score_is_valid() {
        let mut input = valid_input();
        input.credit_score = None;
        assert!(validate_inputs(&input).is_empty());
    }

    #[test]
    fn test_down_payment_bounds() {
        let mut input = valid_input();
        input.target_down_payment = dec!(2.5);
        assert_eq!(
            validate_inputs(&input),
            vec!["Target down payment must be at least 3%"]
        );
        input.target_down_payment = dec!(100);
        assert_eq!(
            validate_inputs(&input),
            vec!["Target down payment must be less than 100%"]
        );
    }

    #[test]
    fn test_term_bounds_inclusive() {
        let mut input = valid_input();
        input.loan_term_years = 10;
        assert!(validate_inputs(&input).is_empty());
        input.loan_term_years = 9;
        assert_eq!(validate_inputs(&input).len(), 1);
    }

    #[test]
    fn test_oversized_amounts_rejected() {
        let mut input = valid_input();
        input.property_value = dec!(10_000_000_000_000_000_000_000_000_000);
        input.hoa_monthly = Some(dec!(1_000_000_000_000_001));
        assert_eq!(
            validate_inputs(&input),
            vec![
                "Property value must not exceed 1000000000000000",
                "HOA dues must not exceed 1000000000000000",
            ]
        );

        let mut input = valid_input();
        input.property_value = dec!(1_000_000_000_000_000);
        assert!(validate_inputs(&input).is_empty());
    }

    #[test]
    fn test_appreciation_bounds() {
        let mut input = valid_input();
        input.property_appreciation_rate = dec!(100);
        assert!(validate_inputs(&input).is_empty());
        for rate in [dec!(-100), dec!(100.01)] {
            input.property_appreciation_rate = rate;
            assert_eq!(
                validate_inputs(&input),
                vec!["Property appreciation rate must be above -100% and at most 100%"]
            );
        }
    }

    #[test]
    fn test_cost_percentages_capped() {
        let mut input = valid_input();
        input.property_tax_rate = dec!(100.5);
        input.maintenance_percent = Some(dec!(250));
        assert_eq!(
            validate_inputs(&input),
            vec![
                "Property tax rate must be at most 100%",
                "Maintenance percentage must be at most 100%",
            ]
        );
    }

    #[test]
    fn test_ensure_valid_wraps_messages() {
        let mut input = valid_input();
        input.current_rent = Decimal::ZERO;
        match ensure_valid(&input).unwrap_err() {
            RentToOwnError::Validation(errors) => {
                assert_eq!(errors, vec!["Current rent must be greater than 0"]);
            }
            other => panic!("Expected Validation, got {other:?}"),
        }
    }
}
