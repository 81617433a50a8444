pub mod affordability;
pub mod market;
pub mod scenarios;
