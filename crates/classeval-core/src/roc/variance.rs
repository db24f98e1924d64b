//! Standard error and confidence interval of the AUC.
//!
//! Covers:
//! 1. **Hanley & McNeil** -- parametric, from the class sizes and the AUC alone.
//! 2. **DeLong** -- nonparametric, from the U-statistic placement values of
//!    every positive and every negative case.
//!
//! Both produce `AUC ± z·SE` with `z` supplied by the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::sweep::RocCurve;
use crate::error::ClassEvalError;
use crate::types::Interval;
use crate::ClassEvalResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceMethod {
    Hanley,
    DeLong,
}

/// AUC with its standard error and confidence interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AucConfidenceInterval {
    pub method: VarianceMethod,
    pub area_under_curve: f64,
    pub standard_error: f64,
    pub critical_value: f64,
    pub interval: Interval,
}

/// Compute the interval for a ROC curve with the chosen estimator.
pub fn auc_confidence_interval(
    roc: &RocCurve,
    method: VarianceMethod,
    critical_value: f64,
) -> ClassEvalResult<AucConfidenceInterval> {
    validate_critical_value(critical_value)?;

    let standard_error = match method {
        VarianceMethod::Hanley => hanley_standard_error(
            roc.num_positives,
            roc.num_negatives,
            roc.area_under_curve,
        )?,
        VarianceMethod::DeLong => delong_standard_error(
            &roc.positive_predicted_values,
            &roc.negative_predicted_values,
        )?,
    };
    debug!(?method, standard_error, "AUC standard error computed");

    Ok(AucConfidenceInterval {
        method,
        area_under_curve: roc.area_under_curve,
        standard_error,
        critical_value,
        interval: Interval::around(roc.area_under_curve, critical_value * standard_error),
    })
}

// ---------------------------------------------------------------------------
// Hanley & McNeil (1982)
// ---------------------------------------------------------------------------

/// `SE = sqrt[(A(1-A) + (m-1)(Q1-A²) + (n-1)(Q2-A²)) / (m·n)]` with
/// `Q1 = A/(2-A)` and `Q2 = 2A²/(1+A)`.
pub fn hanley_standard_error(
    num_positives: u64,
    num_negatives: u64,
    area_under_curve: f64,
) -> ClassEvalResult<f64> {
    if num_positives == 0 || num_negatives == 0 {
        return Err(ClassEvalError::DivisionByZero {
            context: "Hanley standard error requires both positive and negative cases".into(),
        });
    }
    let a = area_under_curve;
    let a_sq = a * a;
    let q1 = a / (2.0 - a);
    let q2 = 2.0 * a_sq / (1.0 + a);
    let m = num_positives as f64;
    let n = num_negatives as f64;

    let variance = (a * (1.0 - a) + (m - 1.0) * (q1 - a_sq) + (n - 1.0) * (q2 - a_sq)) / (m * n);
    Ok(variance.sqrt())
}

// ---------------------------------------------------------------------------
// DeLong, DeLong & Clarke-Pearson (1988)
// ---------------------------------------------------------------------------

/// `SE = sqrt(S10/n + S01/m)` where `S10` is the sample variance of the
/// negative-case placements `V10(y_j)` and `S01` that of the positive-case
/// placements `V01(x_i)`.
///
/// Placements are counted by binary search over sorted copies, which gives
/// the same values as the pairwise definition in O((m+n)·log(m+n)).
pub fn delong_standard_error(positives: &[f64], negatives: &[f64]) -> ClassEvalResult<f64> {
    if positives.len() < 2 || negatives.len() < 2 {
        return Err(ClassEvalError::InsufficientData(format!(
            "DeLong standard error requires at least 2 positive and 2 negative cases \
             (got {} positive, {} negative).",
            positives.len(),
            negatives.len()
        )));
    }

    let mut sorted_pos = positives.to_vec();
    sorted_pos.sort_by(f64::total_cmp);
    let mut sorted_neg = negatives.to_vec();
    sorted_neg.sort_by(f64::total_cmp);

    let v10: Vec<f64> = negatives
        .iter()
        .map(|&y| negative_placement(y, &sorted_pos))
        .collect();
    let v01: Vec<f64> = positives
        .iter()
        .map(|&x| positive_placement(x, &sorted_neg))
        .collect();

    let s10 = sample_variance(&v10);
    let s01 = sample_variance(&v01);
    let m = positives.len() as f64;
    let n = negatives.len() as f64;

    Ok((s10 / n + s01 / m).sqrt())
}

/// `V10(y)`: share of positives ranked above `y`, ties counting half.
fn negative_placement(y: f64, sorted_positives: &[f64]) -> f64 {
    let below = sorted_positives.partition_point(|&x| x < y);
    let at_or_below = sorted_positives.partition_point(|&x| x <= y);
    let above = sorted_positives.len() - at_or_below;
    let ties = at_or_below - below;
    (above as f64 + 0.5 * ties as f64) / sorted_positives.len() as f64
}

/// `V01(x)`: share of negatives ranked below `x`, ties counting half.
fn positive_placement(x: f64, sorted_negatives: &[f64]) -> f64 {
    let below = sorted_negatives.partition_point(|&y| y < x);
    let at_or_below = sorted_negatives.partition_point(|&y| y <= x);
    let ties = at_or_below - below;
    (below as f64 + 0.5 * ties as f64) / sorted_negatives.len() as f64
}

/// Sample variance with an n-1 denominator. Callers guarantee `len >= 2`.
fn sample_variance(values: &[f64]) -> f64 {
    let k = values.len() as f64;
    let mean = values.iter().sum::<f64>() / k;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (k - 1.0)
}

pub(crate) fn validate_critical_value(critical_value: f64) -> ClassEvalResult<()> {
    if !critical_value.is_finite() || critical_value <= 0.0 {
        return Err(ClassEvalError::InvalidInput {
            field: "critical_value".into(),
            reason: "Critical value must be a positive finite number.".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roc::auc::indicator;
    use crate::sample::SampleSet;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn brute_force_delong(positives: &[f64], negatives: &[f64]) -> f64 {
        let m = positives.len() as f64;
        let n = negatives.len() as f64;
        let v10: Vec<f64> = negatives
            .iter()
            .map(|&y| positives.iter().map(|&x| indicator(x, y)).sum::<f64>() / m)
            .collect();
        let v01: Vec<f64> = positives
            .iter()
            .map(|&x| negatives.iter().map(|&y| indicator(x, y)).sum::<f64>() / n)
            .collect();
        (sample_variance(&v10) / n + sample_variance(&v01) / m).sqrt()
    }

    #[test]
    fn test_hanley_known_value() {
        // A = 0.8, m = n = 50
        let a: f64 = 0.8;
        let q1 = a / (2.0 - a);
        let q2 = 2.0 * a * a / (1.0 + a);
        let expected =
            ((a * (1.0 - a) + 49.0 * (q1 - a * a) + 49.0 * (q2 - a * a)) / 2500.0).sqrt();
        let se = hanley_standard_error(50, 50, a).unwrap();
        assert!(approx_eq(se, expected, 1e-15));
        assert!(approx_eq(se, 0.0445, 1e-3));
    }

    #[test]
    fn test_hanley_perfect_auc_zero_error() {
        let se = hanley_standard_error(10, 10, 1.0).unwrap();
        assert!(approx_eq(se, 0.0, 1e-15));
    }

    #[test]
    fn test_hanley_rejects_single_class() {
        let err = hanley_standard_error(0, 10, 0.5).unwrap_err();
        assert!(matches!(err, ClassEvalError::DivisionByZero { .. }));
    }

    #[test]
    fn test_delong_matches_pairwise_definition() {
        let pos = [0.9, 0.8, 0.55, 0.55, 0.3, 0.7];
        let neg = [0.1, 0.55, 0.4, 0.2, 0.8, 0.35, 0.05];
        let fast = delong_standard_error(&pos, &neg).unwrap();
        let slow = brute_force_delong(&pos, &neg);
        assert!(approx_eq(fast, slow, 1e-12), "{fast} vs {slow}");
    }

    #[test]
    fn test_delong_placement_means_equal_auc() {
        let pos = [0.9, 0.6, 0.6, 0.3];
        let neg = [0.6, 0.2, 0.1];
        let mut sorted_pos = pos.to_vec();
        sorted_pos.sort_by(f64::total_cmp);
        let mean_v10: f64 = neg
            .iter()
            .map(|&y| negative_placement(y, &sorted_pos))
            .sum::<f64>()
            / neg.len() as f64;
        let auc = crate::roc::auc::mann_whitney_auc(&pos, &neg);
        assert!(approx_eq(mean_v10, auc, 1e-12));
    }

    #[test]
    fn test_delong_requires_two_per_class() {
        let err = delong_standard_error(&[0.9], &[0.1, 0.2]).unwrap_err();
        assert!(matches!(err, ClassEvalError::InsufficientData(_)));
        assert!(delong_standard_error(&[0.9, 0.8], &[0.1]).is_err());
    }

    #[test]
    fn test_interval_symmetric_around_auc() {
        let set = SampleSet::from_pairs(vec![
            (1, 0.9),
            (1, 0.7),
            (0, 0.75),
            (1, 0.4),
            (0, 0.3),
            (0, 0.1),
        ])
        .unwrap();
        let roc = RocCurve::from_samples(&set);
        for method in [VarianceMethod::Hanley, VarianceMethod::DeLong] {
            let ci = auc_confidence_interval(&roc, method, 1.96).unwrap();
            let margin = 1.96 * ci.standard_error;
            assert!(approx_eq(ci.interval.lower, roc.area_under_curve - margin, 1e-15));
            assert!(approx_eq(ci.interval.upper, roc.area_under_curve + margin, 1e-15));
            assert_eq!(ci.method, method);
        }
    }

    #[test]
    fn test_wider_critical_value_widens_interval() {
        let set = SampleSet::from_pairs(vec![(1, 0.9), (1, 0.4), (0, 0.5), (0, 0.1)]).unwrap();
        let roc = RocCurve::from_samples(&set);
        let narrow = auc_confidence_interval(&roc, VarianceMethod::Hanley, 1.645).unwrap();
        let wide = auc_confidence_interval(&roc, VarianceMethod::Hanley, 2.576).unwrap();
        assert!(wide.interval.lower < narrow.interval.lower);
        assert!(wide.interval.upper > narrow.interval.upper);
    }

    #[test]
    fn test_reject_bad_critical_value() {
        let set = SampleSet::from_pairs(vec![(1, 0.9), (0, 0.1)]).unwrap();
        let roc = RocCurve::from_samples(&set);
        assert!(auc_confidence_interval(&roc, VarianceMethod::Hanley, 0.0).is_err());
        assert!(auc_confidence_interval(&roc, VarianceMethod::Hanley, f64::NAN).is_err());
    }
}
