pub mod affordability;
pub mod amortization;
pub mod error;
pub mod observer;
pub mod policy;
pub mod ratios;
pub mod schedule;
pub mod scoring;
pub mod types;
pub mod validation;

#[cfg(feature = "scenarios")]
pub mod scenarios;

#[cfg(feature = "market")]
pub mod market;

pub use affordability::{calculate_affordability, calculate_affordability_with, CalculatorInput};
pub use error::RentToOwnError;
pub use types::*;

/// Standard result type for all rent-to-own operations
pub type RentToOwnResult<T> = Result<T, RentToOwnError>;
