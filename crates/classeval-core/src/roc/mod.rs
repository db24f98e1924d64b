//! Receiver operating characteristic analysis.
//!
//! Covers:
//! 1. **Threshold sweep** -- one confusion matrix per distinct predicted value.
//! 2. **AUC** -- trapezoidal integration, equal to the Mann-Whitney statistic.
//! 3. **AUC intervals** -- Hanley (parametric) and DeLong (nonparametric).
//! 4. **Operating points** -- precision, NPV, F1 etc. per threshold.

pub mod auc;
pub mod confusion;
pub mod metrics;
pub mod sweep;
pub mod variance;

pub use auc::{gini, mann_whitney_auc, trapezoidal_auc};
pub use confusion::ConfusionMatrix;
pub use metrics::{
    precision_recall_points, threshold_metrics, PrecisionRecallPoint, ThresholdMetrics,
};
pub use sweep::{compute_roc_curve, sweep_confusion_matrices, RocCurve, RocPoint};
pub use variance::{
    auc_confidence_interval, delong_standard_error, hanley_standard_error, AucConfidenceInterval,
    VarianceMethod,
};
