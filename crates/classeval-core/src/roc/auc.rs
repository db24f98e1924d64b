//! Area under the ROC curve.

use super::sweep::RocPoint;

/// Trapezoidal integration of ROC points taken in sweep order, starting
/// from the origin.
pub fn trapezoidal_auc(points: &[RocPoint]) -> f64 {
    let mut area = 0.0;
    let (mut x1, mut y1) = (0.0, 0.0);
    for p in points {
        let (x2, y2) = (p.false_positive_rate, p.true_positive_rate);
        area += (x2 - x1).abs() * (y1 + y2) / 2.0;
        x1 = x2;
        y1 = y2;
    }
    area
}

/// Mann-Whitney comparison kernel: 1 if the positive outranks the negative,
/// 0.5 on a tie, 0 otherwise.
pub fn indicator(positive: f64, negative: f64) -> f64 {
    if negative < positive {
        1.0
    } else if negative == positive {
        0.5
    } else {
        0.0
    }
}

/// Brute-force P(positive > negative) + 0.5 P(tie) over all pairs.
///
/// O(m·n). Returns 0 when either class is empty.
pub fn mann_whitney_auc(positives: &[f64], negatives: &[f64]) -> f64 {
    if positives.is_empty() || negatives.is_empty() {
        return 0.0;
    }
    let sum: f64 = positives
        .iter()
        .map(|&x| negatives.iter().map(|&y| indicator(x, y)).sum::<f64>())
        .sum();
    sum / (positives.len() as f64 * negatives.len() as f64)
}

/// Gini coefficient (Somers' D for a binary outcome): 2·AUC - 1.
pub fn gini(area_under_curve: f64) -> f64 {
    2.0 * area_under_curve - 1.0
}
