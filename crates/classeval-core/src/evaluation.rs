//! Serde-facing entry points that wrap the ROC and calibration analyses in
//! the standard [`ComputationOutput`] envelope.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::sample::{Sample, SampleSet};
use crate::types::{with_metadata, ComputationOutput, DEFAULT_CRITICAL_VALUE};
use crate::ClassEvalResult;

#[cfg(feature = "calibration")]
use crate::calibration::{CalibrationConfig, HosmerLemeshow};
#[cfg(feature = "roc")]
use crate::roc::{
    auc_confidence_interval, gini, precision_recall_points, threshold_metrics,
    variance::validate_critical_value, AucConfidenceInterval, ConfusionMatrix,
    PrecisionRecallPoint, RocCurve, RocPoint, ThresholdMetrics, VarianceMethod,
};

#[cfg(feature = "roc")]
fn default_critical_value() -> f64 {
    DEFAULT_CRITICAL_VALUE
}

// ---------------------------------------------------------------------------
// ROC
// ---------------------------------------------------------------------------

#[cfg(feature = "roc")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocInput {
    pub observations: Vec<Sample>,
    /// Normal critical value for the AUC intervals (1.96 → 95%).
    #[serde(default = "default_critical_value")]
    pub critical_value: f64,
}

#[cfg(feature = "roc")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocOutput {
    pub num_positives: u64,
    pub num_negatives: u64,
    pub area_under_curve: f64,
    pub gini: f64,
    /// `None` when the estimator could not be computed; see warnings.
    pub hanley: Option<AucConfidenceInterval>,
    pub delong: Option<AucConfidenceInterval>,
    pub points: Vec<RocPoint>,
    pub confusion_matrices: Vec<ConfusionMatrix>,
    pub threshold_metrics: Vec<ThresholdMetrics>,
    pub precision_recall: Vec<PrecisionRecallPoint>,
}

#[cfg(feature = "roc")]
impl RocOutput {
    fn from_curve(roc: &RocCurve, critical_value: f64, warnings: &mut Vec<String>) -> Self {
        if roc.num_positives == 0 || roc.num_negatives == 0 {
            warnings.push(format!(
                "Only one outcome class present ({} positive, {} negative); \
                 ROC rates and AUC are degenerate.",
                roc.num_positives, roc.num_negatives
            ));
        }

        let mut interval = |method: VarianceMethod| {
            match auc_confidence_interval(roc, method, critical_value) {
                Ok(ci) => Some(ci),
                Err(e) => {
                    warnings.push(format!("{method:?} interval skipped: {e}"));
                    None
                }
            }
        };
        let hanley = interval(VarianceMethod::Hanley);
        let delong = interval(VarianceMethod::DeLong);

        RocOutput {
            num_positives: roc.num_positives,
            num_negatives: roc.num_negatives,
            area_under_curve: roc.area_under_curve,
            gini: gini(roc.area_under_curve),
            hanley,
            delong,
            points: roc.points.clone(),
            confusion_matrices: roc.confusion_matrices.clone(),
            threshold_metrics: threshold_metrics(roc),
            precision_recall: precision_recall_points(roc),
        }
    }
}

/// ROC curve, AUC, Gini and both AUC intervals.
///
/// A failing interval estimator (single-class data, fewer than two cases of
/// a class for DeLong) is reported as `None` with a warning instead of
/// failing the whole evaluation.
#[cfg(feature = "roc")]
pub fn evaluate_roc(input: &RocInput) -> ClassEvalResult<ComputationOutput<RocOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_critical_value(input.critical_value)?;
    let samples = SampleSet::new(input.observations.clone())?;
    let roc = RocCurve::from_samples(&samples);
    let output = RocOutput::from_curve(&roc, input.critical_value, &mut warnings);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Empirical ROC (trapezoidal AUC) with Hanley-McNeil and DeLong intervals",
        &serde_json::json!({
            "observations": samples.len(),
            "critical_value": input.critical_value,
            "threshold_rule": "predicted >= threshold is classified positive",
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Calibration
// ---------------------------------------------------------------------------

#[cfg(feature = "calibration")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationInput {
    pub observations: Vec<Sample>,
    #[serde(flatten)]
    pub config: CalibrationConfig,
}

#[cfg(feature = "calibration")]
fn calibration_warnings(hl: &HosmerLemeshow, warnings: &mut Vec<String>) {
    let bad = hl.non_finite_groups();
    if !bad.is_empty() {
        warnings.push(format!(
            "Groups {bad:?} have an expected count of 0 or n; their chi-square \
             contribution is not finite."
        ));
    }
    if !hl.goodness_of_fit.is_defined() {
        warnings.push(format!(
            "Hosmer-Lemeshow p-value undefined ({} groups, {} degrees of freedom).",
            hl.groups.len(),
            hl.goodness_of_fit.degrees_of_freedom
        ));
    }
}

/// Hosmer-Lemeshow grouping, goodness-of-fit test and ECE/MCE/ACE.
#[cfg(feature = "calibration")]
pub fn evaluate_calibration(
    input: &CalibrationInput,
) -> ClassEvalResult<ComputationOutput<HosmerLemeshow>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let samples = SampleSet::new(input.observations.clone())?;
    let hl = HosmerLemeshow::from_samples(&samples, &input.config)?;
    calibration_warnings(&hl, &mut warnings);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Hosmer-Lemeshow goodness-of-fit with calibration error summaries",
        &serde_json::json!({
            "observations": samples.len(),
            "strategy": input.config.strategy,
            "num_groups": input.config.num_groups,
            "critical_value": input.config.critical_value,
            "degrees_of_freedom": "retained groups - 2",
        }),
        warnings,
        elapsed,
        hl,
    ))
}

// ---------------------------------------------------------------------------
// Combined
// ---------------------------------------------------------------------------

#[cfg(all(feature = "roc", feature = "calibration"))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub observations: Vec<Sample>,
    /// The critical value is shared by the AUC intervals and the per-group
    /// margins of error.
    #[serde(flatten)]
    pub config: CalibrationConfig,
}

#[cfg(all(feature = "roc", feature = "calibration"))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationOutput {
    pub discrimination: RocOutput,
    pub calibration: HosmerLemeshow,
}

/// Discrimination and calibration of one classifier from a single sample set.
#[cfg(all(feature = "roc", feature = "calibration"))]
pub fn evaluate_classifier(
    input: &EvaluationInput,
) -> ClassEvalResult<ComputationOutput<EvaluationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.config.validate()?;
    let samples = SampleSet::new(input.observations.clone())?;

    let roc = RocCurve::from_samples(&samples);
    let discrimination = RocOutput::from_curve(&roc, input.config.critical_value, &mut warnings);
    let calibration = HosmerLemeshow::from_samples(&samples, &input.config)?;
    calibration_warnings(&calibration, &mut warnings);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Classifier evaluation: ROC/AUC discrimination and Hosmer-Lemeshow calibration",
        &serde_json::json!({
            "observations": samples.len(),
            "strategy": input.config.strategy,
            "num_groups": input.config.num_groups,
            "critical_value": input.config.critical_value,
        }),
        warnings,
        elapsed,
        EvaluationOutput {
            discrimination,
            calibration,
        },
    ))
}
