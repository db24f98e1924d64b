use clap::Args;
use serde_json::Value;

use classeval_core::calibration::CalibrationConfig;
use classeval_core::evaluation::{self, RocInput};

use super::{DataArgs, Loaded};

/// Arguments for ROC/AUC analysis
#[derive(Args)]
pub struct RocArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Normal critical value for the AUC intervals (1.96 for 95%)
    #[arg(long)]
    pub critical_value: Option<f64>,
}

pub fn run_roc(args: RocArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut roc_input: RocInput = match args.data.load::<RocInput>()? {
        Loaded::Json(parsed) => parsed,
        Loaded::Delimited(observations) => RocInput {
            observations,
            critical_value: CalibrationConfig::default().critical_value,
        },
    };
    if args.data.config.is_some() {
        let config = args.data.resolve_config(CalibrationConfig::default())?;
        roc_input.critical_value = config.critical_value;
    }
    if let Some(z) = args.critical_value {
        roc_input.critical_value = z;
    }

    let result = evaluation::evaluate_roc(&roc_input)?;
    Ok(serde_json::to_value(result)?)
}
