//! Rent-to-own affordability analysis.
//!
//! Composes amortization, ratio, schedule and scoring into one immutable
//! result. Input is validated first and every violation is reported at once;
//! a zero rent-to-equity contribution is rejected explicitly because the
//! down payment can never be reached.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::payment_factor;
use crate::observer::{CalculationObserver, NoopObserver};
use crate::policy::{
    DEFAULT_INSURANCE_PERCENT, DEFAULT_MAINTENANCE_PERCENT, LONG_SAVINGS_HORIZON_MONTHS,
    MAX_FRONT_END_SHARE, PMI_ANNUAL_RATE, QUALIFIED_MAX_BACK_END, SCHEDULE_MONTHS,
    STRESS_TEST_FLOOR, STRESS_TEST_MAX_BACK_END, STRESS_TEST_SHOCK,
};
use crate::ratios::{calculate_ratios, RatioInput};
use crate::schedule::{
    project_equity_schedule, time_to_down_payment, EquityScheduleEntry, ScheduleInput,
};
use crate::scoring::{assess, score_breakdown, AffordabilityAssessment, ScoreBreakdown};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::validation::ensure_valid;
use crate::RentToOwnResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PROJECTION_YEARS: Decimal = dec!(3);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Financial profile of a prospective rent-to-own buyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInput {
    pub monthly_income: Money,
    pub current_rent: Money,
    pub property_value: Money,
    /// Share of rent credited toward the down payment, in percent.
    pub rent_to_equity_percent: Percent,
    pub loan_term_years: u32,
    /// Annual nominal rate in percent.
    pub interest_rate: Percent,
    /// Down payment target as a percentage of property value.
    pub target_down_payment: Percent,
    pub monthly_debt_payments: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_score: Option<u32>,
    /// Annual property tax in percent of value.
    pub property_tax_rate: Percent,
    /// Defaults to 0.35% of property value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_insurance_annual: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoa_monthly: Option<Money>,
    /// Annual maintenance in percent of value. Defaults to 1.5%.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_percent: Option<Percent>,
    /// Annual appreciation in percent.
    pub property_appreciation_rate: Percent,
}

impl CalculatorInput {
    pub fn home_insurance_annual_or_default(&self) -> Money {
        self.home_insurance_annual
            .unwrap_or(self.property_value * DEFAULT_INSURANCE_PERCENT / dec!(100))
    }

    pub fn maintenance_percent_or_default(&self) -> Percent {
        self.maintenance_percent.unwrap_or(DEFAULT_MAINTENANCE_PERCENT)
    }

    pub fn hoa_monthly_or_default(&self) -> Money {
        self.hoa_monthly.unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    // Rent-to-equity
    pub monthly_equity_contribution: Money,
    pub effective_monthly_rent: Money,
    pub total_down_payment_needed: Money,
    pub time_to_down_payment_months: u32,
    // Loan and monthly costs
    pub loan_amount: Money,
    pub monthly_mortgage_payment: Money,
    pub monthly_property_tax: Money,
    pub monthly_insurance: Money,
    pub monthly_pmi: Money,
    pub monthly_hoa: Money,
    pub monthly_maintenance: Money,
    pub monthly_piti: Money,
    pub total_monthly_housing_cost: Money,
    // Ratios
    pub front_end_ratio: Percent,
    pub back_end_ratio: Percent,
    /// Same as the front-end ratio.
    pub debt_to_income_ratio: Percent,
    pub loan_to_value_ratio: Percent,
    // Stress test
    pub stress_test_rate: Percent,
    pub stress_test_payment: Money,
    pub stress_test_piti: Money,
    pub stress_test_back_end_ratio: Percent,
    pub passes_stress_test: bool,
    // Headroom and projections
    pub max_affordable_price: Money,
    pub projected_equity_in_3_years: Money,
    pub property_appreciation_impact: Money,
    pub equity_at_horizon: Money,
    // Qualification
    pub qualification_score: u32,
    pub score_breakdown: ScoreBreakdown,
    pub assessment: AffordabilityAssessment,
    pub equity_schedule: Vec<EquityScheduleEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full affordability analysis.
pub fn calculate_affordability(
    input: &CalculatorInput,
) -> RentToOwnResult<ComputationOutput<AffordabilityResult>> {
    calculate_affordability_with(input, &NoopObserver)
}

/// Run the full affordability analysis, reporting intermediate values to
/// `observer`.
pub fn calculate_affordability_with(
    input: &CalculatorInput,
    observer: &dyn CalculationObserver,
) -> RentToOwnResult<ComputationOutput<AffordabilityResult>> {
    ensure_valid(input)?;
    let mut warnings: Vec<String> = Vec::new();

    // -- Rent-to-equity -------------------------------------------------------
    let contribution = input.current_rent * input.rent_to_equity_percent / dec!(100);
    let down_payment = input.property_value * input.target_down_payment / dec!(100);
    observer.on_value("monthly_equity_contribution", contribution);
    observer.on_value("total_down_payment_needed", down_payment);

    let months = time_to_down_payment(down_payment, contribution)?;
    observer.on_value("time_to_down_payment_months", Decimal::from(months));

    // -- Monthly costs --------------------------------------------------------
    let loan_amount = input.property_value - down_payment;
    let monthly_tax = input.property_value * input.property_tax_rate / dec!(100) / MONTHS_PER_YEAR;
    let monthly_insurance = input.home_insurance_annual_or_default() / MONTHS_PER_YEAR;
    let monthly_maintenance =
        input.property_value * input.maintenance_percent_or_default() / dec!(100) / MONTHS_PER_YEAR;
    let monthly_hoa = input.hoa_monthly_or_default();

    // -- Ratios and stress test -----------------------------------------------
    let ratios = calculate_ratios(&RatioInput {
        monthly_income: input.monthly_income,
        monthly_debt_payments: input.monthly_debt_payments,
        property_value: input.property_value,
        loan_amount,
        interest_rate: input.interest_rate,
        term_years: input.loan_term_years,
        target_down_payment: input.target_down_payment,
        monthly_property_tax: monthly_tax,
        monthly_insurance,
        monthly_hoa,
    })?;
    observer.on_value("monthly_mortgage_payment", ratios.monthly_payment);
    observer.on_value("monthly_piti", ratios.monthly_piti);
    observer.on_value("front_end_ratio", ratios.front_end_ratio);
    observer.on_value("back_end_ratio", ratios.back_end_ratio);
    observer.on_value("stress_test_back_end_ratio", ratios.stress_test_back_end_ratio);

    if !ratios.monthly_pmi.is_zero() {
        warnings.push(format!(
            "Down payment below 20%: PMI of {} per month is included in housing cost",
            ratios.monthly_pmi.round_dp(2)
        ));
    }
    if !ratios.passes_stress_test {
        warnings.push(format!(
            "Fails stress test at {}%: back-end ratio {}% exceeds {}%",
            ratios.stress_test_rate,
            ratios.stress_test_back_end_ratio.round_dp(2),
            STRESS_TEST_MAX_BACK_END
        ));
    }
    if ratios.back_end_ratio > QUALIFIED_MAX_BACK_END {
        warnings.push(format!(
            "Back-end ratio {}% exceeds the {}% qualified-mortgage limit",
            ratios.back_end_ratio.round_dp(2),
            QUALIFIED_MAX_BACK_END
        ));
    }
    if months > LONG_SAVINGS_HORIZON_MONTHS {
        warnings.push(format!(
            "Reaching the down payment through rent credits takes {months} months"
        ));
    }

    let max_affordable_price =
        max_affordable_price(input, down_payment, monthly_tax, monthly_insurance)?;
    observer.on_value("max_affordable_price", max_affordable_price);

    // -- Equity schedule ------------------------------------------------------
    let equity_schedule = project_equity_schedule(&ScheduleInput {
        property_value: input.property_value,
        down_payment,
        loan_amount,
        interest_rate: input.interest_rate,
        monthly_payment: ratios.monthly_payment,
        appreciation_rate: input.property_appreciation_rate,
        monthly_equity_contribution: contribution,
        months_to_down_payment: months,
    })?;
    let equity_at_horizon = equity_schedule
        .last()
        .map(|e| e.total_equity)
        .unwrap_or(down_payment);
    observer.on_value("equity_at_horizon", equity_at_horizon);

    // -- Qualification --------------------------------------------------------
    let breakdown = score_breakdown(
        ratios.back_end_ratio,
        input.credit_score,
        input.target_down_payment,
        months,
    );
    let assessment = assess(
        breakdown.score,
        months,
        ratios.passes_stress_test,
        ratios.back_end_ratio,
    );
    observer.on_value("qualification_score", Decimal::from(breakdown.score));
    observer.on_note("assessment", &assessment.to_string());

    let output = AffordabilityResult {
        monthly_equity_contribution: contribution,
        effective_monthly_rent: input.current_rent - contribution,
        total_down_payment_needed: down_payment,
        time_to_down_payment_months: months,
        loan_amount,
        monthly_mortgage_payment: ratios.monthly_payment,
        monthly_property_tax: monthly_tax,
        monthly_insurance,
        monthly_pmi: ratios.monthly_pmi,
        monthly_hoa,
        monthly_maintenance,
        monthly_piti: ratios.monthly_piti,
        total_monthly_housing_cost: ratios.monthly_piti + monthly_maintenance,
        front_end_ratio: ratios.front_end_ratio,
        back_end_ratio: ratios.back_end_ratio,
        debt_to_income_ratio: ratios.front_end_ratio,
        loan_to_value_ratio: ratios.loan_to_value_ratio,
        stress_test_rate: ratios.stress_test_rate,
        stress_test_payment: ratios.stress_test_payment,
        stress_test_piti: ratios.stress_test_piti,
        stress_test_back_end_ratio: ratios.stress_test_back_end_ratio,
        passes_stress_test: ratios.passes_stress_test,
        max_affordable_price,
        projected_equity_in_3_years: contribution * Decimal::from(SCHEDULE_MONTHS),
        property_appreciation_impact: input.property_value * input.property_appreciation_rate
            / dec!(100)
            * PROJECTION_YEARS,
        equity_at_horizon,
        qualification_score: breakdown.score,
        score_breakdown: breakdown,
        assessment,
        equity_schedule,
    };

    let assumptions = serde_json::json!({
        "pmi_annual_rate": PMI_ANNUAL_RATE.to_string(),
        "stress_test_shock": STRESS_TEST_SHOCK.to_string(),
        "stress_test_floor": STRESS_TEST_FLOOR.to_string(),
        "stress_test_max_back_end": STRESS_TEST_MAX_BACK_END.to_string(),
        "home_insurance_annual": input.home_insurance_annual_or_default().to_string(),
        "maintenance_percent": input.maintenance_percent_or_default().to_string(),
        "schedule_months": SCHEDULE_MONTHS,
    });

    Ok(with_metadata(
        "Rent-to-Own Affordability (PITI, DTI, stress test, 36-month equity projection)",
        &assumptions,
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Highest price whose P&I fits in 28% of income after tax and insurance,
/// keeping the same down payment.
fn max_affordable_price(
    input: &CalculatorInput,
    down_payment: Money,
    monthly_tax: Money,
    monthly_insurance: Money,
) -> RentToOwnResult<Money> {
    let max_housing = input.monthly_income * MAX_FRONT_END_SHARE;
    let max_payment = max_housing - monthly_tax - monthly_insurance;
    if max_payment <= Decimal::ZERO {
        return Ok(down_payment);
    }
    let factor = payment_factor(input.interest_rate, input.loan_term_years)?;
    Ok(max_payment / factor + down_payment)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
