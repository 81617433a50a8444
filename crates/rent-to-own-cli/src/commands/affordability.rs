use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use rent_to_own_core::market::{self, MarketSnapshot};
use rent_to_own_core::observer::{CalculationObserver, NoopObserver, TracingObserver};
use rent_to_own_core::validation::validate_inputs;
use rent_to_own_core::{calculate_affordability_with, CalculatorInput};

use crate::input;

/// Calculator input, from a JSON file, piped stdin or individual flags
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CalculatorArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Market snapshot JSON; its median rent, price and appreciation replace
    /// the corresponding inputs
    #[arg(long)]
    pub market: Option<String>,

    /// Emit every intermediate value as a debug event
    #[arg(long)]
    pub trace: bool,

    /// Gross monthly income
    #[arg(long)]
    pub monthly_income: Option<Decimal>,

    /// Current monthly rent
    #[arg(long)]
    pub current_rent: Option<Decimal>,

    /// Purchase price of the target property
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Percentage of rent credited toward equity (0-50)
    #[arg(long, alias = "rte")]
    pub rent_to_equity_percent: Option<Decimal>,

    /// Loan term in years (10-30)
    #[arg(long, default_value_t = 30)]
    pub loan_term_years: u32,

    /// Annual interest rate, percent
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Down payment as a percentage of property value
    #[arg(long, default_value = "20")]
    pub target_down_payment: Decimal,

    /// Existing monthly debt obligations
    #[arg(long, default_value = "0")]
    pub monthly_debt_payments: Decimal,

    /// Credit score (300-850)
    #[arg(long)]
    pub credit_score: Option<u32>,

    /// Annual property tax, percent of value
    #[arg(long, default_value = "1.2")]
    pub property_tax_rate: Decimal,

    /// Annual home insurance (defaults to 0.35% of value)
    #[arg(long)]
    pub home_insurance_annual: Option<Decimal>,

    /// Monthly HOA dues
    #[arg(long)]
    pub hoa_monthly: Option<Decimal>,

    /// Annual maintenance, percent of value (defaults to 1.5)
    #[arg(long)]
    pub maintenance_percent: Option<Decimal>,

    /// Expected annual appreciation, percent
    #[arg(long, default_value = "3")]
    pub property_appreciation_rate: Decimal,
}

pub fn run_affordability(args: CalculatorArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let calc_input = resolve_input(&args)?;
    let observer: &dyn CalculationObserver = if args.trace {
        &TracingObserver
    } else {
        &NoopObserver
    };
    let result = calculate_affordability_with(&calc_input, observer)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_validate(args: CalculatorArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let calc_input = resolve_input(&args)?;
    let errors = validate_inputs(&calc_input);
    Ok(validation_report(&errors))
}

/// Resolve the calculator input: `--input`, then stdin, then flags. A
/// `--market` snapshot is applied on top of whichever source won.
pub fn resolve_input(args: &CalculatorArgs) -> Result<CalculatorInput, Box<dyn std::error::Error>> {
    let base: CalculatorInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        input_from_flags(args)?
    };

    match args.market {
        Some(ref path) => {
            let snapshot: MarketSnapshot = input::file::read_json(path)?;
            tracing::info!(city = %snapshot.location.city, "seeding input from market snapshot");
            Ok(market::seed_input(&snapshot, &base))
        }
        None => Ok(base),
    }
}

pub fn input_from_flags(args: &CalculatorArgs) -> Result<CalculatorInput, Box<dyn std::error::Error>> {
    // Rent, value and appreciation may come from a market snapshot instead.
    let seeded = args.market.is_some();
    Ok(CalculatorInput {
        monthly_income: args
            .monthly_income
            .ok_or("--monthly-income is required (or provide --input)")?,
        current_rent: match args.current_rent {
            Some(rent) => rent,
            None if seeded => Decimal::ZERO,
            None => return Err("--current-rent is required (or provide --input)".into()),
        },
        property_value: match args.property_value {
            Some(value) => value,
            None if seeded => Decimal::ZERO,
            None => return Err("--property-value is required (or provide --input)".into()),
        },
        rent_to_equity_percent: args
            .rent_to_equity_percent
            .ok_or("--rent-to-equity-percent is required (or provide --input)")?,
        loan_term_years: args.loan_term_years,
        interest_rate: args
            .interest_rate
            .ok_or("--interest-rate is required (or provide --input)")?,
        target_down_payment: args.target_down_payment,
        monthly_debt_payments: args.monthly_debt_payments,
        credit_score: args.credit_score,
        property_tax_rate: args.property_tax_rate,
        home_insurance_annual: args.home_insurance_annual,
        hoa_monthly: args.hoa_monthly,
        maintenance_percent: args.maintenance_percent,
        property_appreciation_rate: args.property_appreciation_rate,
    })
}

fn validation_report(errors: &[String]) -> Value {
    json!({
        "result": {
            "valid": errors.is_empty(),
            "error_count": errors.len(),
            "errors": errors,
        }
    })
}
