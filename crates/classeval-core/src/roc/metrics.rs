use serde::{Deserialize, Serialize};

use super::confusion::ConfusionMatrix;
use super::sweep::RocCurve;

/// Classification quality at one operating threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdMetrics {
    pub threshold: f64,
    pub true_positive_rate: f64,
    pub false_positive_rate: f64,
    pub specificity: f64,
    pub precision: f64,
    pub negative_predictive_value: f64,
    pub false_discovery_rate: f64,
    pub accuracy: f64,
    pub misclassification_rate: f64,
    pub f1_score: f64,
    pub prevalence: f64,
    /// Cases with a predicted value at or above the threshold.
    pub cases_flagged: u64,
}

impl From<&ConfusionMatrix> for ThresholdMetrics {
    fn from(cm: &ConfusionMatrix) -> Self {
        ThresholdMetrics {
            threshold: cm.threshold,
            true_positive_rate: cm.true_positive_rate(),
            false_positive_rate: cm.false_positive_rate(),
            specificity: cm.true_negative_rate(),
            precision: cm.positive_predictive_value(),
            negative_predictive_value: cm.negative_predictive_value(),
            false_discovery_rate: cm.false_discovery_rate(),
            accuracy: cm.accuracy(),
            misclassification_rate: cm.misclassification_rate(),
            f1_score: cm.f1_score(),
            prevalence: cm.prevalence(),
            cases_flagged: cm.predicted_positives(),
        }
    }
}

/// A (recall, precision) point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecisionRecallPoint {
    pub threshold: f64,
    pub recall: f64,
    pub precision: f64,
}

/// Per-threshold metrics in sweep order (highest threshold first).
pub fn threshold_metrics(roc: &RocCurve) -> Vec<ThresholdMetrics> {
    roc.confusion_matrices
        .iter()
        .map(ThresholdMetrics::from)
        .collect()
}

pub fn precision_recall_points(roc: &RocCurve) -> Vec<PrecisionRecallPoint> {
    roc.confusion_matrices
        .iter()
        .map(|cm| PrecisionRecallPoint {
            threshold: cm.threshold,
            recall: cm.true_positive_rate(),
            precision: cm.positive_predictive_value(),
        })
        .collect()
}
