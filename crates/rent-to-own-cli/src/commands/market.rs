use clap::Args;
use serde_json::Value;

use rent_to_own_core::market::{analyze_market, MarketSnapshot};

use crate::input;

/// Arguments for market snapshot analysis
#[derive(Args)]
pub struct MarketArgs {
    /// Path to a market snapshot JSON file (reads stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_market(args: MarketArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let snapshot: MarketSnapshot = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("Market analysis requires --input <file.json> or JSON on stdin".into());
    };

    let result = analyze_market(&snapshot)?;
    Ok(serde_json::to_value(result)?)
}
