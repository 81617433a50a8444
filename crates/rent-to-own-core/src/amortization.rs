//! Fixed-rate, fixed-term loan amortization.
//!
//! Rates enter in percent (6.5 = 6.5% annual nominal) and are converted to a
//! monthly decimal rate internally. All math in `rust_decimal::Decimal`.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RentToOwnError;
use crate::types::{Money, Percent, Rate};
use crate::RentToOwnResult;

const MONTHS_PER_YEAR: u32 = 12;

/// One month of scheduled amortization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationStep {
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

/// Convert an annual nominal percentage to a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

/// Level payment per unit of principal.
pub fn payment_factor(annual_rate_percent: Percent, term_years: u32) -> RentToOwnResult<Rate> {
    if term_years == 0 {
        return Err(RentToOwnError::InvalidInput {
            field: "term_years".into(),
            reason: "Loan term must be at least one year".into(),
        });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(RentToOwnError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    let n = term_years * MONTHS_PER_YEAR;

    // The closed form divides by zero at 0%, so fall back to straight-line.
    if annual_rate_percent.is_zero() {
        return Ok(Decimal::ONE / Decimal::from(n));
    }

    let r = monthly_rate(annual_rate_percent);
    let growth = (Decimal::ONE + r).powu(u64::from(n));
    let denom = growth - Decimal::ONE;
    if denom.is_zero() {
        return Err(RentToOwnError::DivisionByZero {
            context: "payment factor".into(),
        });
    }

    Ok(r * growth / denom)
}

/// Monthly principal-and-interest payment for a fully amortizing loan.
pub fn monthly_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> RentToOwnResult<Money> {
    if principal <= Decimal::ZERO {
        return Err(RentToOwnError::InvalidInput {
            field: "principal".into(),
            reason: "Loan principal must be positive; down payment covers the full price".into(),
        });
    }

    let factor = payment_factor(annual_rate_percent, term_years)?;
    if annual_rate_percent.is_zero() {
        // Divide directly rather than multiply by a rounded 1/n.
        return Ok(principal / Decimal::from(term_years * MONTHS_PER_YEAR));
    }

    Ok(principal * factor)
}

/// Apply one scheduled payment to an outstanding balance.
///
/// Principal is capped at the balance so the loan never goes negative.
pub fn amortize_month(balance: Money, monthly_rate: Rate, payment: Money) -> AmortizationStep {
    let interest = balance * monthly_rate;
    let principal = (payment - interest).max(Decimal::ZERO).min(balance);
    AmortizationStep {
        interest,
        principal,
        closing_balance: balance - principal,
    }
}
