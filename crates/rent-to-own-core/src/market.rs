//! Local market snapshot and derived market metrics.
//!
//! A snapshot is plain data supplied by the caller (from a file or a data
//! vendor); nothing here fetches anything. The analysis derives the gross
//! rent-to-price ratio, a simple cap rate and a 0-10 health score per market
//! indicator. `seed_input` copies the market medians into a calculator input.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::affordability::CalculatorInput;
use crate::error::RentToOwnError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::RentToOwnResult;

/// Share of gross rent assumed lost to operating expenses in the cap rate.
const OPERATING_EXPENSE_RATIO: Decimal = dec!(0.30);

/// Price-to-income multiple that scores zero on affordability.
const UNAFFORDABLE_PRICE_TO_INCOME: Decimal = dec!(5);

const INDICATOR_MAX: Decimal = dec!(10);

/// Raw indicator inputs are clamped to +/- this before scaling. Every
/// indicator saturates well inside the bound, so scores are unchanged.
const INDICATOR_INPUT_BOUND: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalMarket {
    pub median_rent: Money,
    /// Percent.
    pub year_over_year_growth: Percent,
    /// Percent.
    pub vacancy_rate: Percent,
    pub rent_per_sq_ft: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryLevel {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingMarket {
    pub median_price: Money,
    /// Annual appreciation, percent.
    pub appreciation: Percent,
    pub days_on_market: u32,
    pub inventory_level: InventoryLevel,
    pub price_per_sq_ft: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicIndicators {
    /// Percent.
    pub unemployment_rate: Percent,
    /// Percent.
    pub population_growth: Percent,
    /// Annual.
    pub median_household_income: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub location: Location,
    pub rental_market: RentalMarket,
    pub housing_market: HousingMarket,
    pub economic_indicators: EconomicIndicators,
    /// Vendor-supplied favourability score, 0-10.
    pub opportunity_score: Decimal,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpportunityRating {
    Excellent,
    Good,
    Fair,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketIndicator {
    pub name: String,
    /// 0-10, higher is more favourable for a buyer.
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    /// Annual rent as a percentage of price.
    pub rent_to_price_ratio: Percent,
    /// Net operating income as a percentage of price.
    pub cap_rate: Percent,
    pub opportunity_rating: OpportunityRating,
    pub indicators: Vec<MarketIndicator>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn opportunity_rating(score: Decimal) -> OpportunityRating {
    if score >= dec!(7) {
        OpportunityRating::Excellent
    } else if score >= dec!(5) {
        OpportunityRating::Good
    } else {
        OpportunityRating::Fair
    }
}

/// Derive yield metrics and indicator scores from a market snapshot.
pub fn analyze_market(snapshot: &MarketSnapshot) -> RentToOwnResult<ComputationOutput<MarketAnalysis>> {
    validate_snapshot(snapshot)?;
    let mut warnings: Vec<String> = Vec::new();

    let price = snapshot.housing_market.median_price;
    let annual_rent = snapshot.rental_market.median_rent * dec!(12);
    let noi = annual_rent * (Decimal::ONE - OPERATING_EXPENSE_RATIO);

    let rent_to_price_ratio = percent_of_price(annual_rent, price)?;
    let cap_rate = percent_of_price(noi, price)?;

    if snapshot.opportunity_score < Decimal::ZERO || snapshot.opportunity_score > INDICATOR_MAX {
        warnings.push(format!(
            "Opportunity score {} is outside the 0-10 scale",
            snapshot.opportunity_score
        ));
    }

    let output = MarketAnalysis {
        rent_to_price_ratio,
        cap_rate,
        opportunity_rating: opportunity_rating(snapshot.opportunity_score),
        indicators: market_indicators(snapshot)?,
    };

    let assumptions = serde_json::json!({
        "operating_expense_ratio": OPERATING_EXPENSE_RATIO.to_string(),
        "unaffordable_price_to_income": UNAFFORDABLE_PRICE_TO_INCOME.to_string(),
    });

    Ok(with_metadata(
        "Market Snapshot Analysis (gross yield, cap rate, indicator scores)",
        &assumptions,
        warnings,
        output,
    ))
}

/// Copy the market medians into a calculator input, keeping the buyer's own
/// figures for everything else.
pub fn seed_input(snapshot: &MarketSnapshot, base: &CalculatorInput) -> CalculatorInput {
    CalculatorInput {
        current_rent: snapshot.rental_market.median_rent,
        property_value: snapshot.housing_market.median_price,
        property_appreciation_rate: snapshot.housing_market.appreciation,
        ..base.clone()
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn percent_of_price(amount: Money, price: Money) -> RentToOwnResult<Percent> {
    amount
        .checked_div(price)
        .and_then(|r| r.checked_mul(dec!(100)))
        .ok_or_else(|| RentToOwnError::InvalidInput {
            field: "housing_market.median_price".into(),
            reason: format!("{amount} is out of range against a median price of {price}"),
        })
}

fn market_indicators(snapshot: &MarketSnapshot) -> RentToOwnResult<Vec<MarketIndicator>> {
    let housing = &snapshot.housing_market;
    let econ = &snapshot.economic_indicators;

    let price_to_income = housing
        .median_price
        .checked_div(econ.median_household_income)
        .ok_or_else(|| RentToOwnError::InvalidInput {
            field: "economic_indicators.median_household_income".into(),
            reason: "Price-to-income multiple is out of range".into(),
        })?;
    let inventory = match housing.inventory_level {
        InventoryLevel::Low => dec!(8),
        InventoryLevel::Moderate => dec!(5),
        InventoryLevel::High => dec!(2),
    };

    let indicators: Vec<MarketIndicator> = [
        (
            "Affordability",
            INDICATOR_MAX
                - bounded(price_to_income) / UNAFFORDABLE_PRICE_TO_INCOME * INDICATOR_MAX,
        ),
        ("Appreciation", housing.appreciation),
        (
            "Rent Growth",
            bounded(snapshot.rental_market.year_over_year_growth) * dec!(2),
        ),
        ("Job Market", INDICATOR_MAX - bounded(econ.unemployment_rate) * dec!(2)),
        ("Population", bounded(econ.population_growth) * dec!(3)),
        ("Inventory", inventory),
    ]
    .into_iter()
    .map(|(name, value)| MarketIndicator {
        name: name.to_string(),
        value: value.max(Decimal::ZERO).min(INDICATOR_MAX),
    })
    .collect();
    Ok(indicators)
}

fn bounded(value: Decimal) -> Decimal {
    value.max(-INDICATOR_INPUT_BOUND).min(INDICATOR_INPUT_BOUND)
}

fn validate_snapshot(snapshot: &MarketSnapshot) -> RentToOwnResult<()> {
    if snapshot.housing_market.median_price <= Decimal::ZERO {
        return Err(RentToOwnError::InvalidInput {
            field: "housing_market.median_price".into(),
            reason: "Median price must be positive".into(),
        });
    }
    if snapshot.rental_market.median_rent < Decimal::ZERO {
        return Err(RentToOwnError::InvalidInput {
            field: "rental_market.median_rent".into(),
            reason: "Median rent cannot be negative".into(),
        });
    }
    if snapshot.economic_indicators.median_household_income <= Decimal::ZERO {
        return Err(RentToOwnError::InvalidInput {
            field: "economic_indicators.median_household_income".into(),
            reason: "Median household income must be positive".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
