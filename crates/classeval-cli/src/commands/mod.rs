pub mod calibration;
pub mod evaluate;
pub mod roc;

use clap::{Args, ValueEnum};
use classeval_core::calibration::{BinningStrategy, CalibrationConfig};
use classeval_core::Sample;
use serde::de::DeserializeOwned;

use crate::input;
use crate::input::delimited::{DelimitedOptions, Delimiter};

/// Where the observations come from and how to read them.
#[derive(Args)]
pub struct DataArgs {
    /// Path to a JSON input file or a delimited observed/predicted file
    #[arg(long)]
    pub input: Option<String>,

    /// Field delimiter for delimited input
    #[arg(long, value_enum, default_value = "comma")]
    pub delimiter: Delimiter,

    /// 1-based column of the observed 0/1 outcome
    #[arg(long, default_value_t = 1)]
    pub observed_column: usize,

    /// 1-based column of the predicted probability
    #[arg(long, default_value_t = 2)]
    pub predicted_column: usize,

    /// Skip the first row of delimited input
    #[arg(long)]
    pub has_header: bool,

    /// YAML or JSON file with critical_value, num_groups and strategy
    #[arg(long)]
    pub config: Option<String>,
}

/// Explicit settings that override the config file and JSON input.
#[derive(Args)]
pub struct ConfigOverrides {
    /// Normal critical value for intervals (1.96 for 95%)
    #[arg(long)]
    pub critical_value: Option<f64>,

    /// Number of Hosmer-Lemeshow groups before empty groups are dropped
    #[arg(long)]
    pub groups: Option<usize>,

    /// Risk grouping strategy
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Decile,
    FixedRisk,
}

impl From<StrategyArg> for BinningStrategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::Decile => BinningStrategy::Decile,
            StrategyArg::FixedRisk => BinningStrategy::FixedRisk,
        }
    }
}

/// Observations loaded either as a full JSON input struct or as bare
/// samples from a delimited file.
pub enum Loaded<T> {
    Json(T),
    Delimited(Vec<Sample>),
}

impl DataArgs {
    pub fn load<T: DeserializeOwned>(&self) -> Result<Loaded<T>, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            if input::file::is_json(path) {
                Ok(Loaded::Json(input::file::read_json(path)?))
            } else {
                let samples = input::delimited::read_samples(path, &self.delimited_options())?;
                Ok(Loaded::Delimited(samples))
            }
        } else if let Some(data) = input::stdin::read_stdin_json()? {
            Ok(Loaded::Json(data))
        } else {
            Err("--input <file> or JSON on stdin required".into())
        }
    }

    fn delimited_options(&self) -> DelimitedOptions {
        DelimitedOptions {
            delimiter: self.delimiter,
            observed_column: self.observed_column,
            predicted_column: self.predicted_column,
            has_header: self.has_header,
        }
    }

    /// `--config` replaces `base` when given.
    pub fn resolve_config(
        &self,
        base: CalibrationConfig,
    ) -> Result<CalibrationConfig, Box<dyn std::error::Error>> {
        match self.config {
            Some(ref path) => input::file::read_config(path),
            None => Ok(base),
        }
    }
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: CalibrationConfig) -> CalibrationConfig {
        if let Some(z) = self.critical_value {
            config.critical_value = z;
        }
        if let Some(g) = self.groups {
            config.num_groups = g;
        }
        if let Some(s) = self.strategy {
            config.strategy = s.into();
        }
        config
    }
}

/// Observations plus the fully resolved configuration.
pub fn load_with_config<T, F>(
    data: &DataArgs,
    overrides: &ConfigOverrides,
    split: F,
) -> Result<(Vec<Sample>, CalibrationConfig), Box<dyn std::error::Error>>
where
    T: DeserializeOwned,
    F: FnOnce(T) -> (Vec<Sample>, CalibrationConfig),
{
    let (observations, base) = match data.load::<T>()? {
        Loaded::Json(parsed) => split(parsed),
        Loaded::Delimited(samples) => (samples, CalibrationConfig::default()),
    };
    let config = overrides.apply(data.resolve_config(base)?);
    Ok((observations, config))
}
