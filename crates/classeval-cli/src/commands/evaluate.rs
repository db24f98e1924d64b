use clap::Args;
use serde_json::Value;

use classeval_core::evaluation::{self, EvaluationInput};

use super::{load_with_config, ConfigOverrides, DataArgs};

/// Arguments for combined discrimination and calibration evaluation
#[derive(Args)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (observations, config) =
        load_with_config(&args.data, &args.overrides, |parsed: EvaluationInput| {
            (parsed.observations, parsed.config)
        })?;
    let result = evaluation::evaluate_classifier(&EvaluationInput {
        observations,
        config,
    })?;
    Ok(serde_json::to_value(result)?)
}
