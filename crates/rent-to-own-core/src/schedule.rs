//! Month-by-month equity projection over the fixed 36-month horizon.
//!
//! Each month combines mortgage principal paydown, compounding property
//! appreciation and the rent-to-equity credit (paid only until the down
//! payment target is reached).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{amortize_month, monthly_rate};
use crate::error::RentToOwnError;
use crate::policy::SCHEDULE_MONTHS;
use crate::types::{Money, Percent, Rate};
use crate::RentToOwnResult;

const ROOT_TOLERANCE: Decimal = dec!(0.0000000000001);
const ROOT_MAX_ITERATIONS: u32 = 40;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub property_value: Money,
    pub down_payment: Money,
    pub loan_amount: Money,
    /// Annual contract rate in percent.
    pub interest_rate: Percent,
    pub monthly_payment: Money,
    /// Annual appreciation in percent.
    pub appreciation_rate: Percent,
    pub monthly_equity_contribution: Money,
    pub months_to_down_payment: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityScheduleEntry {
    pub month: u32,
    pub rent_equity_contribution: Money,
    pub principal_paid: Money,
    /// Appreciation accrued since origination.
    pub appreciation: Money,
    pub loan_balance: Money,
    pub home_value: Money,
    pub total_equity: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Months of rent-to-equity credit needed to cover the down payment,
/// rounded up.
pub fn time_to_down_payment(
    down_payment: Money,
    monthly_contribution: Money,
) -> RentToOwnResult<u32> {
    if monthly_contribution <= Decimal::ZERO {
        return Err(RentToOwnError::DownPaymentUnreachable {
            down_payment,
            monthly_contribution,
        });
    }
    let out_of_range = || RentToOwnError::InvalidInput {
        field: "monthly_equity_contribution".into(),
        reason: format!(
            "{down_payment} at {monthly_contribution} per month is out of range in months"
        ),
    };
    down_payment
        .checked_div(monthly_contribution)
        .map(|m| m.ceil())
        .and_then(|m| m.to_u32())
        .ok_or_else(out_of_range)
}

/// Monthly rate equivalent to an annual compound appreciation rate.
pub fn monthly_appreciation_rate(annual_rate: Percent) -> RentToOwnResult<Rate> {
    if annual_rate.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let base = Decimal::ONE + annual_rate / dec!(100);
    if base <= Decimal::ZERO {
        return Err(RentToOwnError::InvalidInput {
            field: "property_appreciation_rate".into(),
            reason: "Appreciation must be greater than -100%".into(),
        });
    }
    let monthly = nth_root(base, 12).ok_or_else(|| RentToOwnError::InvalidInput {
        field: "property_appreciation_rate".into(),
        reason: format!("Cannot take the monthly root of {base}"),
    })?;
    Ok(monthly - Decimal::ONE)
}

/// Project the 36-month equity schedule.
pub fn project_equity_schedule(input: &ScheduleInput) -> RentToOwnResult<Vec<EquityScheduleEntry>> {
    validate_input(input)?;

    let r = monthly_rate(input.interest_rate);
    let a = monthly_appreciation_rate(input.appreciation_rate)?;

    let mut balance = input.loan_amount;
    let mut home_value = input.property_value;
    let mut cumulative_principal = Decimal::ZERO;
    let mut cumulative_rent_equity = Decimal::ZERO;
    let mut entries = Vec::with_capacity(SCHEDULE_MONTHS as usize);

    for month in 1..=SCHEDULE_MONTHS {
        let step = amortize_month(balance, r, input.monthly_payment);
        balance = step.closing_balance;
        cumulative_principal += step.principal;

        home_value *= Decimal::ONE + a;
        let appreciation = home_value - input.property_value;

        let rent_equity = if month <= input.months_to_down_payment {
            input.monthly_equity_contribution
        } else {
            Decimal::ZERO
        };
        cumulative_rent_equity += rent_equity;

        entries.push(EquityScheduleEntry {
            month,
            rent_equity_contribution: rent_equity,
            principal_paid: step.principal,
            appreciation,
            loan_balance: balance,
            home_value,
            total_equity: input.down_payment
                + cumulative_principal
                + appreciation
                + cumulative_rent_equity,
        });
    }

    Ok(entries)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Newton's method for the nth root of a positive `x`. Returns `None` if an
/// intermediate power overflows.
fn nth_root(x: Decimal, n: u32) -> Option<Decimal> {
    if x == Decimal::ONE || n == 1 {
        return Some(x);
    }

    let n_dec = Decimal::from(n);
    let mut guess = Decimal::ONE;

    for _ in 0..ROOT_MAX_ITERATIONS {
        let g_n_minus_1 = checked_pow(guess, n - 1)?;
        let g_n = g_n_minus_1.checked_mul(guess)?;
        if g_n_minus_1.is_zero() {
            break;
        }

        let delta = (g_n - x) / (n_dec * g_n_minus_1);
        guess -= delta;

        if delta.abs() < ROOT_TOLERANCE {
            break;
        }
    }

    Some(guess)
}

fn checked_pow(base: Decimal, n: u32) -> Option<Decimal> {
    (0..n).try_fold(Decimal::ONE, |acc, _| acc.checked_mul(base))
}

fn validate_input(input: &ScheduleInput) -> RentToOwnResult<()> {
    if input.monthly_equity_contribution <= Decimal::ZERO {
        return Err(RentToOwnError::DownPaymentUnreachable {
            down_payment: input.down_payment,
            monthly_contribution: input.monthly_equity_contribution,
        });
    }
    if input.property_value <= Decimal::ZERO {
        return Err(RentToOwnError::InvalidInput {
            field: "property_value".into(),
            reason: "Property value must be positive".into(),
        });
    }
    if input.loan_amount < Decimal::ZERO {
        return Err(RentToOwnError::InvalidInput {
            field: "loan_amount".into(),
            reason: "Loan amount cannot be negative".into(),
        });
    }
    if input.monthly_payment < Decimal::ZERO {
        return Err(RentToOwnError::InvalidInput {
            field: "monthly_payment".into(),
            reason: "Monthly payment cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
