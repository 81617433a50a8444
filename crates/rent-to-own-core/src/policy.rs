//! Underwriting policy constants.
//!
//! Every threshold and coefficient used by the ratio, scoring and schedule
//! modules lives here so the policy can be audited in one place. The scoring
//! coefficients are hand-tuned program values and are reproduced exactly.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Cost defaults
// ---------------------------------------------------------------------------

/// Annual PMI premium as a fraction of the loan amount.
pub const PMI_ANNUAL_RATE: Decimal = dec!(0.0075);

/// Down payment percentage at or above which no PMI is charged.
pub const PMI_EXEMPT_DOWN_PAYMENT: Decimal = dec!(20);

/// Default annual home insurance as a percentage of property value.
pub const DEFAULT_INSURANCE_PERCENT: Decimal = dec!(0.35);

/// Default annual maintenance as a percentage of property value.
pub const DEFAULT_MAINTENANCE_PERCENT: Decimal = dec!(1.5);

// ---------------------------------------------------------------------------
// Stress test
// ---------------------------------------------------------------------------

/// Shock added to the contract rate, in percentage points.
pub const STRESS_TEST_SHOCK: Decimal = dec!(2);

/// Minimum qualifying rate for the stress test, in percent.
pub const STRESS_TEST_FLOOR: Decimal = dec!(5.25);

/// Maximum back-end ratio (percent) at the stressed rate.
pub const STRESS_TEST_MAX_BACK_END: Decimal = dec!(44);

// ---------------------------------------------------------------------------
// Affordability headroom
// ---------------------------------------------------------------------------

/// Share of gross income available for housing when sizing the maximum price.
pub const MAX_FRONT_END_SHARE: Decimal = dec!(0.28);

/// Back-end ratio above which a loan is considered outside qualified limits.
pub const QUALIFIED_MAX_BACK_END: Decimal = dec!(43);

/// Months to down payment above which a warning is raised.
pub const LONG_SAVINGS_HORIZON_MONTHS: u32 = 60;

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Length of the projected equity schedule.
pub const SCHEDULE_MONTHS: u32 = 36;

// ---------------------------------------------------------------------------
// Qualification score: back-end DTI bands
// ---------------------------------------------------------------------------

pub const DTI_BAND_1: Decimal = dec!(28);
pub const DTI_BAND_2: Decimal = dec!(36);
pub const DTI_BAND_3: Decimal = dec!(43);
pub const DTI_SLOPE_1: Decimal = dec!(2.5);
pub const DTI_SLOPE_2: Decimal = dec!(2.85);
pub const DTI_SLOPE_3: Decimal = dec!(2);
pub const DTI_BASE_2: Decimal = dec!(20);
pub const DTI_BASE_3: Decimal = dec!(40);

// ---------------------------------------------------------------------------
// Qualification score: credit bands
// ---------------------------------------------------------------------------

pub const CREDIT_PRIME: u32 = 740;
pub const CREDIT_NEAR_PRIME: u32 = 680;
pub const CREDIT_SUBPRIME: u32 = 620;
pub const CREDIT_SLOPE: Decimal = dec!(0.167);
pub const CREDIT_BASE_2: Decimal = dec!(10);
pub const CREDIT_FLAT: Decimal = dec!(20);

// ---------------------------------------------------------------------------
// Qualification score: down payment bands
// ---------------------------------------------------------------------------

pub const DOWN_PAYMENT_FULL: Decimal = dec!(20);
pub const DOWN_PAYMENT_PARTIAL: Decimal = dec!(10);
pub const DOWN_PAYMENT_SLOPE: Decimal = dec!(1);
pub const DOWN_PAYMENT_BASE_2: Decimal = dec!(10);

// ---------------------------------------------------------------------------
// Qualification score: time-to-down-payment bands
// ---------------------------------------------------------------------------

pub const TIME_BAND_1: u32 = 24;
pub const TIME_BAND_2: u32 = 36;
pub const TIME_BAND_3: u32 = 48;
pub const TIME_SLOPE: Decimal = dec!(0.83);
pub const TIME_BASE_2: Decimal = dec!(10);
pub const TIME_FLAT: Decimal = dec!(20);

// ---------------------------------------------------------------------------
// Assessment thresholds
// ---------------------------------------------------------------------------

pub const EXCELLENT_MIN_SCORE: u32 = 85;
pub const VERY_GOOD_MIN_SCORE: u32 = 70;
pub const GOOD_MIN_SCORE: u32 = 60;
pub const FAIR_MIN_SCORE: u32 = 50;
