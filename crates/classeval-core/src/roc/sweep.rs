//! Threshold sweep: one confusion matrix and ROC point per distinct
//! predicted value, highest threshold first.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::auc::trapezoidal_auc;
use super::confusion::ConfusionMatrix;
use crate::sample::{Sample, SampleSet};
use crate::ClassEvalResult;

/// A point on the ROC curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    pub threshold: f64,
    pub false_positive_rate: f64,
    pub true_positive_rate: f64,
}

impl From<&ConfusionMatrix> for RocPoint {
    fn from(cm: &ConfusionMatrix) -> Self {
        RocPoint {
            threshold: cm.threshold,
            false_positive_rate: cm.false_positive_rate(),
            true_positive_rate: cm.true_positive_rate(),
        }
    }
}

/// Empirical ROC curve of one sample set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocCurve {
    pub num_positives: u64,
    pub num_negatives: u64,
    /// Ordered from highest threshold to lowest.
    pub confusion_matrices: Vec<ConfusionMatrix>,
    /// Same order as `confusion_matrices`.
    pub points: Vec<RocPoint>,
    pub area_under_curve: f64,
    /// Predicted values of observed positives, descending.
    pub positive_predicted_values: Vec<f64>,
    /// Predicted values of observed negatives, descending.
    pub negative_predicted_values: Vec<f64>,
}

impl RocCurve {
    pub fn from_samples(samples: &SampleSet) -> Self {
        let confusion_matrices = sweep_confusion_matrices(samples);
        let points: Vec<RocPoint> = confusion_matrices.iter().map(RocPoint::from).collect();
        let area_under_curve = trapezoidal_auc(&points);

        if samples.num_positives() == 0 || samples.num_negatives() == 0 {
            warn!(
                positives = samples.num_positives(),
                negatives = samples.num_negatives(),
                "single-class data; ROC rates degenerate to zero"
            );
        }

        RocCurve {
            num_positives: samples.num_positives(),
            num_negatives: samples.num_negatives(),
            confusion_matrices,
            points,
            area_under_curve,
            positive_predicted_values: samples.positive_values(),
            negative_predicted_values: samples.negative_values(),
        }
    }

    pub fn true_positive_rates(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.true_positive_rate).collect()
    }

    pub fn false_positive_rates(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.false_positive_rate).collect()
    }

    pub fn thresholds(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.threshold).collect()
    }
}

/// Build the ROC curve straight from raw samples.
pub fn compute_roc_curve(samples: Vec<Sample>) -> ClassEvalResult<RocCurve> {
    let set = SampleSet::new(samples)?;
    Ok(RocCurve::from_samples(&set))
}

/// Walk descending tie groups, accumulating counts; emit one matrix after
/// each group so a tie is never split across two thresholds.
pub fn sweep_confusion_matrices(samples: &SampleSet) -> Vec<ConfusionMatrix> {
    let mut true_positives = 0u64;
    let mut false_positives = 0u64;
    let mut true_negatives = samples.num_negatives();
    let mut false_negatives = samples.num_positives();

    let mut matrices = Vec::new();
    for group in samples.tie_groups_descending() {
        for s in group {
            if s.is_positive() {
                true_positives += 1;
                false_negatives -= 1;
            } else {
                false_positives += 1;
                true_negatives -= 1;
            }
        }
        matrices.push(ConfusionMatrix {
            true_positives,
            true_negatives,
            false_positives,
            false_negatives,
            threshold: group[0].predicted,
        });
    }

    debug!(thresholds = matrices.len(), "confusion matrix sweep complete");
    matrices
}
