use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use rent_to_own_core::scenarios::{compare_rent_to_equity, ScenarioComparisonInput};

use crate::commands::affordability::{resolve_input, CalculatorArgs};
use crate::input;

/// Arguments for the rent-to-equity comparison
#[derive(Args)]
pub struct ScenariosArgs {
    /// Path to a JSON comparison input (`base` plus optional
    /// `rent_to_equity_levels`); overrides everything else
    #[arg(long)]
    pub comparison: Option<String>,

    /// Rent-to-equity levels to compare (default 15,25,35)
    #[arg(long, value_delimiter = ',')]
    pub levels: Vec<Decimal>,

    #[command(flatten)]
    pub base: CalculatorArgs,
}

pub fn run_scenarios(args: ScenariosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let comparison: ScenarioComparisonInput = match args.comparison {
        Some(ref path) => input::file::read_json(path)?,
        None => ScenarioComparisonInput {
            base: resolve_input(&args.base)?,
            rent_to_equity_levels: levels_arg(&args.levels),
        },
    };
    let result = compare_rent_to_equity(&comparison)?;
    Ok(serde_json::to_value(result)?)
}

fn levels_arg(levels: &[Decimal]) -> Option<Vec<Decimal>> {
    if levels.is_empty() {
        None
    } else {
        Some(levels.to_vec())
    }
}
