//! Qualification scoring.
//!
//! The score starts at 100 and subtracts one deduction per factor: back-end
//! DTI, credit score, down payment size and months needed to save the down
//! payment. Deductions are summed unclamped; only the final score is clamped
//! to [0, 100] and rounded half away from zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::policy::*;
use crate::types::Percent;

const MAX_SCORE: Decimal = Decimal::ONE_HUNDRED;
/// Back-end ratios beyond this already zero the score many times over.
const DTI_RATIO_CAP: Decimal = dec!(1_000_000);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Qualitative label derived from the score and the stress test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AffordabilityAssessment {
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl fmt::Display for AffordabilityAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AffordabilityAssessment::Excellent => "Excellent",
            AffordabilityAssessment::VeryGood => "Very Good",
            AffordabilityAssessment::Good => "Good",
            AffordabilityAssessment::Fair => "Fair",
            AffordabilityAssessment::NeedsImprovement => "Needs Improvement",
        };
        f.write_str(label)
    }
}

/// Per-factor deductions behind a qualification score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub dti_deduction: Decimal,
    pub credit_deduction: Decimal,
    pub down_payment_deduction: Decimal,
    pub time_deduction: Decimal,
    /// 100 minus all deductions, before clamping.
    pub raw_score: Decimal,
    pub score: u32,
}

// ---------------------------------------------------------------------------
// Deductions
// ---------------------------------------------------------------------------

/// Deduction for back-end DTI (percent).
pub fn dti_deduction(back_end_ratio: Percent) -> Decimal {
    let back_end_ratio = back_end_ratio.min(DTI_RATIO_CAP);
    if back_end_ratio <= DTI_BAND_1 {
        Decimal::ZERO
    } else if back_end_ratio <= DTI_BAND_2 {
        (back_end_ratio - DTI_BAND_1) * DTI_SLOPE_1
    } else if back_end_ratio <= DTI_BAND_3 {
        DTI_BASE_2 + (back_end_ratio - DTI_BAND_2) * DTI_SLOPE_2
    } else {
        DTI_BASE_3 + (back_end_ratio - DTI_BAND_3) * DTI_SLOPE_3
    }
}

/// Deduction for credit score. A missing score is treated as subprime.
///
/// Scores of exactly 620 take the flat deduction: the sloped band would
/// charge 20.02 there, more than the flat 20 below it.
pub fn credit_deduction(credit_score: Option<u32>) -> Decimal {
    let Some(score) = credit_score else {
        return CREDIT_FLAT;
    };
    if score >= CREDIT_PRIME {
        Decimal::ZERO
    } else if score >= CREDIT_NEAR_PRIME {
        Decimal::from(CREDIT_PRIME - score) * CREDIT_SLOPE
    } else if score > CREDIT_SUBPRIME {
        CREDIT_BASE_2 + Decimal::from(CREDIT_NEAR_PRIME - score) * CREDIT_SLOPE
    } else {
        CREDIT_FLAT
    }
}

/// Deduction for the down payment percentage.
pub fn down_payment_deduction(down_payment_percent: Percent) -> Decimal {
    if down_payment_percent >= DOWN_PAYMENT_FULL {
        Decimal::ZERO
    } else if down_payment_percent >= DOWN_PAYMENT_PARTIAL {
        (DOWN_PAYMENT_FULL - down_payment_percent) * DOWN_PAYMENT_SLOPE
    } else {
        DOWN_PAYMENT_BASE_2 + (DOWN_PAYMENT_PARTIAL - down_payment_percent) * DOWN_PAYMENT_SLOPE
    }
}

/// Deduction for the number of months needed to save the down payment.
pub fn time_deduction(months_to_down_payment: u32) -> Decimal {
    let m = months_to_down_payment;
    if m <= TIME_BAND_1 {
        Decimal::ZERO
    } else if m <= TIME_BAND_2 {
        Decimal::from(m - TIME_BAND_1) * TIME_SLOPE
    } else if m <= TIME_BAND_3 {
        TIME_BASE_2 + Decimal::from(m - TIME_BAND_2) * TIME_SLOPE
    } else {
        TIME_FLAT
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score with the per-factor deductions kept for display.
pub fn score_breakdown(
    back_end_ratio: Percent,
    credit_score: Option<u32>,
    down_payment_percent: Percent,
    months_to_down_payment: u32,
) -> ScoreBreakdown {
    let dti = dti_deduction(back_end_ratio);
    let credit = credit_deduction(credit_score);
    let down = down_payment_deduction(down_payment_percent);
    let time = time_deduction(months_to_down_payment);

    let raw = MAX_SCORE - dti - credit - down - time;
    let score = raw
        .max(Decimal::ZERO)
        .min(MAX_SCORE)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0);

    ScoreBreakdown {
        dti_deduction: dti,
        credit_deduction: credit,
        down_payment_deduction: down,
        time_deduction: time,
        raw_score: raw,
        score,
    }
}

/// Qualification score in [0, 100].
pub fn qualification_score(
    back_end_ratio: Percent,
    credit_score: Option<u32>,
    down_payment_percent: Percent,
    months_to_down_payment: u32,
) -> u32 {
    score_breakdown(
        back_end_ratio,
        credit_score,
        down_payment_percent,
        months_to_down_payment,
    )
    .score
}

/// Map a score to its label. Rules are checked in order; first match wins.
pub fn assess(
    score: u32,
    months_to_down_payment: u32,
    passes_stress_test: bool,
    back_end_ratio: Percent,
) -> AffordabilityAssessment {
    if score >= EXCELLENT_MIN_SCORE && months_to_down_payment <= TIME_BAND_1 && passes_stress_test
    {
        AffordabilityAssessment::Excellent
    } else if score >= VERY_GOOD_MIN_SCORE
        && months_to_down_payment <= TIME_BAND_2
        && passes_stress_test
    {
        AffordabilityAssessment::VeryGood
    } else if score >= GOOD_MIN_SCORE && back_end_ratio <= QUALIFIED_MAX_BACK_END {
        AffordabilityAssessment::Good
    } else if score >= FAIR_MIN_SCORE {
        AffordabilityAssessment::Fair
    } else {
        AffordabilityAssessment::NeedsImprovement
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
