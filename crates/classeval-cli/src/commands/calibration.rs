use clap::Args;
use serde_json::Value;

use classeval_core::calibration::HosmerLemeshow;
use classeval_core::evaluation::{self, CalibrationInput};
use classeval_core::SampleSet;

use super::{load_with_config, ConfigOverrides, DataArgs};

/// Arguments for Hosmer-Lemeshow calibration
#[derive(Args)]
pub struct CalibrationArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

fn resolve_input(args: &CalibrationArgs) -> Result<CalibrationInput, Box<dyn std::error::Error>> {
    let (observations, config) =
        load_with_config(&args.data, &args.overrides, |parsed: CalibrationInput| {
            (parsed.observations, parsed.config)
        })?;
    Ok(CalibrationInput {
        observations,
        config,
    })
}

pub fn run_calibration(args: CalibrationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cal_input = resolve_input(&args)?;
    let result = evaluation::evaluate_calibration(&cal_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Text summary table instead of structured output.
pub fn run_hl_report(args: CalibrationArgs) -> Result<String, Box<dyn std::error::Error>> {
    let cal_input = resolve_input(&args)?;
    let samples = SampleSet::new(cal_input.observations)?;
    let hl = HosmerLemeshow::from_samples(&samples, &cal_input.config)?;
    Ok(hl.report())
}
