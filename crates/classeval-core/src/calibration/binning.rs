//! Risk grouping for the Hosmer-Lemeshow test.
//!
//! Both strategies walk the samples in ascending predicted order and hand
//! out contiguous, non-overlapping index ranges, so every sample lands in
//! exactly one group and group 1 always holds the lowest predictions.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ClassEvalError;
use crate::sample::Sample;
use crate::types::{DEFAULT_CRITICAL_VALUE, DEFAULT_NUM_GROUPS};
use crate::ClassEvalResult;

/// How samples are split into calibration groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinningStrategy {
    /// Quantile groups: group `k` takes everything up to the predicted value
    /// at rank `⌊k·N/G⌋`, ties included.
    #[default]
    Decile,
    /// Fixed-width risk bands `[(k-1)/G, k/G)`, the last band closed at 1.
    FixedRisk,
}

/// Grouping parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    #[serde(default)]
    pub strategy: BinningStrategy,
    /// Number of intervals before empty groups are dropped.
    #[serde(default = "default_num_groups")]
    pub num_groups: usize,
    /// Normal critical value for the per-group margin of error.
    #[serde(default = "default_critical_value")]
    pub critical_value: f64,
}

fn default_num_groups() -> usize {
    DEFAULT_NUM_GROUPS
}

fn default_critical_value() -> f64 {
    DEFAULT_CRITICAL_VALUE
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        CalibrationConfig {
            strategy: BinningStrategy::default(),
            num_groups: DEFAULT_NUM_GROUPS,
            critical_value: DEFAULT_CRITICAL_VALUE,
        }
    }
}

impl CalibrationConfig {
    pub fn with_strategy(strategy: BinningStrategy) -> Self {
        CalibrationConfig {
            strategy,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ClassEvalResult<()> {
        if self.num_groups == 0 {
            return Err(ClassEvalError::InvalidInput {
                field: "num_groups".into(),
                reason: "Number of groups must be positive.".into(),
            });
        }
        if !self.critical_value.is_finite() || self.critical_value <= 0.0 {
            return Err(ClassEvalError::InvalidInput {
                field: "critical_value".into(),
                reason: "Critical value must be a positive finite number.".into(),
            });
        }
        Ok(())
    }
}

/// Aggregates of one retained calibration group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationGroup {
    /// 1-based, sequential over retained groups.
    pub group_number: u32,
    pub count: u64,
    pub positive_observed_sum: u64,
    pub predicted_sum: f64,
    /// Observed positive rate `posSum / n` (y-axis of a calibration plot).
    pub observed_rate: f64,
    /// Mean prediction `predSum / n` (x-axis of a calibration plot).
    pub expected_rate: f64,
    /// `(posSum - predSum)² / (predSum·(1 - predSum/n))`. Not finite when
    /// `predSum` is exactly 0 or `n`.
    pub chi_square_contribution: f64,
    /// `z·sqrt(x(1-x)/n)` around `expected_rate`.
    pub margin_of_error: f64,
}

impl CalibrationGroup {
    pub fn from_samples(group_number: u32, samples: &[Sample], critical_value: f64) -> Self {
        let count = samples.len() as u64;
        let n = count as f64;
        let positive_observed_sum = samples.iter().filter(|s| s.is_positive()).count() as u64;
        let predicted_sum: f64 = samples.iter().map(|s| s.predicted).sum();

        let expected_rate = predicted_sum / n;
        let observed_rate = positive_observed_sum as f64 / n;
        let margin_of_error = critical_value * (expected_rate * (1.0 - expected_rate) / n).sqrt();
        let diff = positive_observed_sum as f64 - predicted_sum;
        let chi_square_contribution = diff * diff / (predicted_sum * (1.0 - predicted_sum / n));

        if !chi_square_contribution.is_finite() {
            warn!(group_number, predicted_sum, count, "non-finite Hosmer-Lemeshow contribution");
        }

        CalibrationGroup {
            group_number,
            count,
            positive_observed_sum,
            predicted_sum,
            observed_rate,
            expected_rate,
            chi_square_contribution,
            margin_of_error,
        }
    }

    /// `|y - x|`, the group's calibration gap.
    pub fn calibration_gap(&self) -> f64 {
        (self.observed_rate - self.expected_rate).abs()
    }
}

impl BinningStrategy {
    /// Split ascending samples into non-empty contiguous ranges.
    ///
    /// Empty intervals are never visited: each step jumps to the first
    /// interval that can hold `ascending[start]`, so the work is bounded by
    /// the number of samples rather than by `num_groups`.
    pub fn partition(&self, ascending: &[Sample], num_groups: usize) -> Vec<Range<usize>> {
        let n = ascending.len();
        let mut ranges = Vec::with_capacity(num_groups.min(n));
        if num_groups == 0 {
            return ranges;
        }
        let mut start = 0usize;

        while start < n {
            let remaining = &ascending[start..];
            let taken = match self {
                BinningStrategy::Decile => {
                    let k = first_decile_reaching(start, n, num_groups);
                    let threshold = ascending[decile_rank(k, n, num_groups)].predicted;
                    remaining
                        .iter()
                        .take_while(|s| s.predicted <= threshold)
                        .count()
                }
                BinningStrategy::FixedRisk => {
                    let k = risk_band(ascending[start].predicted, num_groups);
                    if k == num_groups {
                        remaining.iter().take_while(|s| s.predicted <= 1.0).count()
                    } else {
                        let upper = k as f64 / num_groups as f64;
                        remaining.iter().take_while(|s| s.predicted < upper).count()
                    }
                }
            };
            if taken == 0 {
                // Only reachable with a prediction outside [0, 1].
                warn!(start, "sample outside every calibration interval");
                break;
            }
            ranges.push(start..start + taken);
            start += taken;
        }

        debug!(strategy = ?self, groups = ranges.len(), "calibration groups assigned");
        ranges
    }

    /// Partition and aggregate, renumbering retained groups from 1.
    pub fn build_groups(
        &self,
        ascending: &[Sample],
        num_groups: usize,
        critical_value: f64,
    ) -> Vec<CalibrationGroup> {
        self.partition(ascending, num_groups)
            .into_iter()
            .enumerate()
            .map(|(i, range)| {
                CalibrationGroup::from_samples(i as u32 + 1, &ascending[range], critical_value)
            })
            .collect()
    }
}

/// `⌊k·n/g⌋` clamped to the last index. Computed in `u128` so large group
/// counts cannot overflow.
fn decile_rank(k: usize, n: usize, num_groups: usize) -> usize {
    let rank = k as u128 * n as u128 / num_groups as u128;
    rank.min(n as u128 - 1) as usize
}

/// Smallest `k >= 1` with `⌊k·n/g⌋ >= start`. Every earlier quantile
/// threshold lies below `ascending[start]` and would take nothing.
fn first_decile_reaching(start: usize, n: usize, num_groups: usize) -> usize {
    let k = (start as u128 * num_groups as u128).div_ceil(n as u128);
    k.clamp(1, num_groups as u128) as usize
}

/// 1-based band `k` with `(k-1)/g <= p < k/g`, or `g` for the closed last
/// band. The bounds use the same float division as the band test.
fn risk_band(predicted: f64, num_groups: usize) -> usize {
    let g = num_groups as f64;
    let mut k = ((predicted * g).floor() as usize).saturating_add(1).clamp(1, num_groups);
    while k > 1 && predicted < (k - 1) as f64 / g {
        k -= 1;
    }
    while k < num_groups && predicted >= k as f64 / g {
        k += 1;
    }
    k
}
