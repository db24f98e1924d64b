//! Calibration assessment: Hosmer-Lemeshow risk grouping, goodness-of-fit
//! test and calibration error summaries.

pub mod binning;
pub mod goodness_of_fit;
pub mod report;

use serde::{Deserialize, Serialize};

use crate::sample::SampleSet;
use crate::ClassEvalResult;

pub use binning::{BinningStrategy, CalibrationConfig, CalibrationGroup};
pub use goodness_of_fit::{
    calibration_errors, chi_squared_upper_tail, hosmer_lemeshow_test, CalibrationErrors,
    GoodnessOfFit, UNDEFINED_P_VALUE,
};

/// Full Hosmer-Lemeshow assessment of one sample set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HosmerLemeshow {
    pub strategy: BinningStrategy,
    pub num_predictions: u64,
    /// Normal critical value behind each group's margin of error.
    pub critical_value: f64,
    /// Retained (non-empty) groups, lowest predictions first.
    pub groups: Vec<CalibrationGroup>,
    pub goodness_of_fit: GoodnessOfFit,
    pub calibration_errors: CalibrationErrors,
}

impl HosmerLemeshow {
    pub fn from_samples(samples: &SampleSet, config: &CalibrationConfig) -> ClassEvalResult<Self> {
        config.validate()?;

        let groups =
            config
                .strategy
                .build_groups(samples.ascending(), config.num_groups, config.critical_value);
        let num_predictions = samples.len() as u64;
        let goodness_of_fit = hosmer_lemeshow_test(&groups)?;
        let calibration_errors = calibration_errors(&groups, num_predictions);

        Ok(HosmerLemeshow {
            strategy: config.strategy,
            num_predictions,
            critical_value: config.critical_value,
            groups,
            goodness_of_fit,
            calibration_errors,
        })
    }

    /// `(x, y)` pairs for a calibration plot: expected rate against
    /// observed rate, one per group.
    pub fn calibration_points(&self) -> Vec<(f64, f64)> {
        self.groups
            .iter()
            .map(|g| (g.expected_rate, g.observed_rate))
            .collect()
    }

    /// Groups whose chi-square contribution is infinite or NaN.
    pub fn non_finite_groups(&self) -> Vec<u32> {
        self.groups
            .iter()
            .filter(|g| !g.chi_square_contribution.is_finite())
            .map(|g| g.group_number)
            .collect()
    }
}
