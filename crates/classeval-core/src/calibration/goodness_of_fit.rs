//! Hosmer-Lemeshow goodness-of-fit test and the calibration error summaries
//! derived from the same groups.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::warn;

use super::binning::CalibrationGroup;
use crate::error::ClassEvalError;
use crate::ClassEvalResult;

/// Reported in place of a p-value that cannot be computed.
pub const UNDEFINED_P_VALUE: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoodnessOfFit {
    /// Number of retained groups minus two. May be zero or negative.
    pub degrees_of_freedom: i64,
    pub chi_square: f64,
    /// Upper-tail probability, or [`UNDEFINED_P_VALUE`].
    pub p_value: f64,
}

impl GoodnessOfFit {
    pub fn is_defined(&self) -> bool {
        self.p_value != UNDEFINED_P_VALUE
    }
}

/// Sum the group contributions and look the total up in the chi-squared
/// distribution with `groups - 2` degrees of freedom.
pub fn hosmer_lemeshow_test(groups: &[CalibrationGroup]) -> ClassEvalResult<GoodnessOfFit> {
    let degrees_of_freedom = groups.len() as i64 - 2;
    let chi_square: f64 = groups.iter().map(|g| g.chi_square_contribution).sum();

    let p_value = if degrees_of_freedom > 0 && chi_square.is_finite() {
        chi_squared_upper_tail(chi_square, degrees_of_freedom as u64)?
    } else {
        warn!(
            degrees_of_freedom,
            chi_square, "Hosmer-Lemeshow p-value undefined"
        );
        UNDEFINED_P_VALUE
    };

    Ok(GoodnessOfFit {
        degrees_of_freedom,
        chi_square,
        p_value,
    })
}

/// `P(X > x)` for `X ~ χ²(df)`.
pub fn chi_squared_upper_tail(x: f64, degrees_of_freedom: u64) -> ClassEvalResult<f64> {
    let dist = ChiSquared::new(degrees_of_freedom as f64)
        .map_err(|e| ClassEvalError::Distribution(e.to_string()))?;
    Ok(1.0 - dist.cdf(x))
}

/// Group-level calibration gaps `|y - x|` summarised three ways.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationErrors {
    /// ECE: gaps weighted by group share of all predictions.
    pub expected_calibration_error: f64,
    /// MCE: largest gap.
    pub maximum_calibration_error: f64,
    /// ACE: unweighted mean gap.
    pub average_calibration_error: f64,
}

pub fn calibration_errors(groups: &[CalibrationGroup], num_predictions: u64) -> CalibrationErrors {
    if groups.is_empty() || num_predictions == 0 {
        return CalibrationErrors {
            expected_calibration_error: 0.0,
            maximum_calibration_error: 0.0,
            average_calibration_error: 0.0,
        };
    }

    let total = num_predictions as f64;
    let mut expected = 0.0;
    let mut maximum = 0.0_f64;
    let mut gap_sum = 0.0;
    for g in groups {
        let gap = g.calibration_gap();
        expected += g.count as f64 / total * gap;
        maximum = maximum.max(gap);
        gap_sum += gap;
    }

    CalibrationErrors {
        expected_calibration_error: expected,
        maximum_calibration_error: maximum,
        average_calibration_error: gap_sum / groups.len() as f64,
    }
}
