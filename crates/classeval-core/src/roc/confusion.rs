use serde::{Deserialize, Serialize};

use crate::types::ratio;

/// Classification counts at one threshold.
///
/// A case is predicted positive when its predicted value is at or above
/// `threshold`. Every rate returns 0 when its denominator is 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: u64,
    pub true_negatives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
    pub threshold: f64,
}

impl ConfusionMatrix {
    pub fn num_positives(&self) -> u64 {
        self.true_positives + self.false_negatives
    }

    pub fn num_negatives(&self) -> u64 {
        self.true_negatives + self.false_positives
    }

    pub fn total(&self) -> u64 {
        self.num_positives() + self.num_negatives()
    }

    /// Cases predicted positive (TP + FP).
    pub fn predicted_positives(&self) -> u64 {
        self.true_positives + self.false_positives
    }

    /// Cases predicted negative (TN + FN).
    pub fn predicted_negatives(&self) -> u64 {
        self.true_negatives + self.false_negatives
    }

    /// Sensitivity / recall / hit rate.
    pub fn true_positive_rate(&self) -> f64 {
        ratio(self.true_positives, self.num_positives())
    }

    /// 1 - specificity.
    pub fn false_positive_rate(&self) -> f64 {
        ratio(self.false_positives, self.num_negatives())
    }

    /// Specificity.
    pub fn true_negative_rate(&self) -> f64 {
        ratio(self.true_negatives, self.num_negatives())
    }

    /// Precision.
    pub fn positive_predictive_value(&self) -> f64 {
        ratio(self.true_positives, self.predicted_positives())
    }

    pub fn negative_predictive_value(&self) -> f64 {
        ratio(self.true_negatives, self.predicted_negatives())
    }

    pub fn false_discovery_rate(&self) -> f64 {
        ratio(self.false_positives, self.predicted_positives())
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    pub fn misclassification_rate(&self) -> f64 {
        ratio(self.false_positives + self.false_negatives, self.total())
    }

    pub fn prevalence(&self) -> f64 {
        ratio(self.num_positives(), self.total())
    }

    /// Harmonic mean of precision and recall: 2TP / (P + TP + FP).
    pub fn f1_score(&self) -> f64 {
        ratio(
            2 * self.true_positives,
            self.num_positives() + self.predicted_positives(),
        )
    }
}
