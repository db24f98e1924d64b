//! Observed/predicted sample pairs and the sorted set every evaluator reads.
//!
//! A [`SampleSet`] is validated once at construction and then only read:
//! samples are kept sorted ascending by predicted value, which is the order
//! calibration binning consumes them in, and the ROC sweep walks the same
//! storage backwards in [`TieGroups`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClassEvalError;
use crate::ClassEvalResult;

/// A single classified case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Actual outcome: 0 = negative, 1 = positive.
    pub observed: u8,
    /// Predicted probability of the positive outcome.
    pub predicted: f64,
}

impl Sample {
    pub fn new(observed: u8, predicted: f64) -> Self {
        Sample {
            observed,
            predicted,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.observed == 1
    }
}

impl From<(u8, f64)> for Sample {
    fn from((observed, predicted): (u8, f64)) -> Self {
        Sample::new(observed, predicted)
    }
}

/// Immutable, ascending-sorted collection of samples.
#[derive(Debug, Clone)]
pub struct SampleSet {
    samples: Vec<Sample>,
    num_positives: u64,
    num_negatives: u64,
}

impl SampleSet {
    /// Validate and sort. Fails on empty input or out-of-range values.
    pub fn new(mut samples: Vec<Sample>) -> ClassEvalResult<Self> {
        if samples.is_empty() {
            return Err(ClassEvalError::InsufficientData(
                "At least one observed/predicted pair is required.".into(),
            ));
        }
        for s in &samples {
            validate_sample(s)?;
        }

        // Values are finite after validation, so total_cmp matches numeric order.
        samples.sort_by(|a, b| a.predicted.total_cmp(&b.predicted));

        let num_positives = samples.iter().filter(|s| s.is_positive()).count() as u64;
        let num_negatives = samples.len() as u64 - num_positives;
        debug!(
            samples = samples.len(),
            positives = num_positives,
            negatives = num_negatives,
            "sample set constructed"
        );

        Ok(SampleSet {
            samples,
            num_positives,
            num_negatives,
        })
    }

    /// Build from `(observed, predicted)` pairs.
    pub fn from_pairs<I>(pairs: I) -> ClassEvalResult<Self>
    where
        I: IntoIterator<Item = (u8, f64)>,
    {
        Self::new(pairs.into_iter().map(Sample::from).collect())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn num_positives(&self) -> u64 {
        self.num_positives
    }

    pub fn num_negatives(&self) -> u64 {
        self.num_negatives
    }

    /// Samples in ascending predicted order.
    pub fn ascending(&self) -> &[Sample] {
        &self.samples
    }

    /// Samples in descending predicted order.
    pub fn descending(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.samples.iter().rev()
    }

    /// Runs of equal predicted value, highest value first.
    pub fn tie_groups_descending(&self) -> TieGroups<'_> {
        TieGroups {
            samples: &self.samples,
        }
    }

    /// Predicted values of the observed positives, in descending order.
    pub fn positive_values(&self) -> Vec<f64> {
        self.descending()
            .filter(|s| s.is_positive())
            .map(|s| s.predicted)
            .collect()
    }

    /// Predicted values of the observed negatives, in descending order.
    pub fn negative_values(&self) -> Vec<f64> {
        self.descending()
            .filter(|s| !s.is_positive())
            .map(|s| s.predicted)
            .collect()
    }
}

/// Iterator over descending tie groups of a [`SampleSet`].
///
/// Each item is a non-empty slice whose samples share one predicted value.
/// Slices are views into the ascending storage, so the samples inside a
/// group keep their ascending (stable sort) order.
pub struct TieGroups<'a> {
    samples: &'a [Sample],
}

impl<'a> Iterator for TieGroups<'a> {
    type Item = &'a [Sample];

    fn next(&mut self) -> Option<Self::Item> {
        let last = self.samples.last()?.predicted;
        let start = self
            .samples
            .iter()
            .rposition(|s| s.predicted != last)
            .map_or(0, |i| i + 1);
        let (rest, group) = self.samples.split_at(start);
        self.samples = rest;
        Some(group)
    }
}

fn validate_sample(s: &Sample) -> ClassEvalResult<()> {
    if s.observed > 1 {
        return Err(ClassEvalError::InvalidInput {
            field: "observed".into(),
            reason: format!("Observed value must be 0 or 1, got {}.", s.observed),
        });
    }
    if !s.predicted.is_finite() || !(0.0..=1.0).contains(&s.predicted) {
        return Err(ClassEvalError::InvalidInput {
            field: "predicted".into(),
            reason: format!(
                "Predicted probability must be in [0, 1], got {}.",
                s.predicted
            ),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
