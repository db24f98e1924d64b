use classeval_core::evaluation::{evaluate_roc, RocInput};
use classeval_core::roc::{
    auc_confidence_interval, mann_whitney_auc, sweep_confusion_matrices, RocCurve, VarianceMethod,
};
use classeval_core::{ClassEvalError, Sample, SampleSet};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_set(rng: &mut StdRng, n: usize, coarse: bool) -> SampleSet {
    let pairs: Vec<(u8, f64)> = (0..n)
        .map(|_| {
            let predicted: f64 = if coarse {
                // Heavy ties: only eleven distinct values.
                rng.gen_range(0u32..=10) as f64 / 10.0
            } else {
                rng.gen_range(0.0..=1.0)
            };
            let observed = rng.gen_bool(0.25 + 0.5 * predicted) as u8;
            (observed, predicted)
        })
        .collect();
    SampleSet::from_pairs(pairs).unwrap()
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn test_perfect_ranking_scenario() {
    let set = SampleSet::from_pairs(vec![(1, 0.9), (1, 0.8), (0, 0.6), (0, 0.3)]).unwrap();
    let roc = RocCurve::from_samples(&set);
    let path: Vec<(f64, f64)> = roc
        .points
        .iter()
        .map(|p| (p.false_positive_rate, p.true_positive_rate))
        .collect();
    assert_eq!(path, vec![(0.0, 0.5), (0.0, 1.0), (0.5, 1.0), (1.0, 1.0)]);
    assert_eq!(roc.area_under_curve, 1.0);
}

#[test]
fn test_single_tie_group_scenario() {
    let set = SampleSet::from_pairs(vec![(1, 0.5), (0, 0.5)]).unwrap();
    let roc = RocCurve::from_samples(&set);
    assert_eq!(roc.confusion_matrices.len(), 1);
    let cm = roc.confusion_matrices[0];
    assert_eq!((cm.true_positives, cm.false_positives), (1, 1));
    assert_eq!(cm.threshold, 0.5);
    assert_eq!(roc.area_under_curve, 0.5);
}

#[test]
fn test_invalid_samples_rejected() {
    let err = SampleSet::new(vec![Sample::new(2, 0.5)]).unwrap_err();
    assert!(matches!(err, ClassEvalError::InvalidInput { .. }));
    assert!(SampleSet::new(vec![Sample::new(1, 1.5)]).is_err());
    assert!(SampleSet::new(vec![Sample::new(1, f64::NAN)]).is_err());
    assert!(matches!(
        SampleSet::new(vec![]),
        Err(ClassEvalError::InsufficientData(_))
    ));
}

// ===========================================================================
// Properties over seeded random data
// ===========================================================================

#[test]
fn test_auc_equals_mann_whitney() {
    let mut rng = StdRng::seed_from_u64(7);
    for trial in 0..40 {
        let set = random_set(&mut rng, 20 + trial * 5, trial % 2 == 0);
        let roc = RocCurve::from_samples(&set);
        let mw = mann_whitney_auc(&roc.positive_predicted_values, &roc.negative_predicted_values);
        assert!(
            (roc.area_under_curve - mw).abs() < 1e-9,
            "trial {trial}: trapezoid {} vs Mann-Whitney {mw}",
            roc.area_under_curve
        );
    }
}

#[test]
fn test_confusion_matrix_conservation() {
    let mut rng = StdRng::seed_from_u64(11);
    for trial in 0..20 {
        let set = random_set(&mut rng, 50, trial % 2 == 1);
        for cm in sweep_confusion_matrices(&set) {
            assert_eq!(cm.true_positives + cm.false_negatives, set.num_positives());
            assert_eq!(cm.true_negatives + cm.false_positives, set.num_negatives());
            assert_eq!(cm.total(), set.len() as u64);
        }
    }
}

#[test]
fn test_roc_monotonic_and_ends_at_one_one() {
    let mut rng = StdRng::seed_from_u64(23);
    for trial in 0..20 {
        let set = random_set(&mut rng, 80, trial % 3 == 0);
        let roc = RocCurve::from_samples(&set);
        for w in roc.points.windows(2) {
            assert!(w[1].true_positive_rate >= w[0].true_positive_rate);
            assert!(w[1].false_positive_rate >= w[0].false_positive_rate);
            assert!(w[1].threshold < w[0].threshold);
        }
        if set.num_positives() > 0 && set.num_negatives() > 0 {
            let last = roc.points.last().unwrap();
            assert_eq!((last.false_positive_rate, last.true_positive_rate), (1.0, 1.0));
        }
    }
}

#[test]
fn test_delong_and_hanley_agree_roughly_on_large_samples() {
    let mut rng = StdRng::seed_from_u64(99);
    let set = random_set(&mut rng, 2000, false);
    let roc = RocCurve::from_samples(&set);
    let hanley = auc_confidence_interval(&roc, VarianceMethod::Hanley, 1.96).unwrap();
    let delong = auc_confidence_interval(&roc, VarianceMethod::DeLong, 1.96).unwrap();
    assert!(hanley.standard_error > 0.0);
    assert!(delong.standard_error > 0.0);
    let ratio = hanley.standard_error / delong.standard_error;
    assert!(ratio > 0.7 && ratio < 1.3, "ratio {ratio}");
    assert!(delong.interval.lower < roc.area_under_curve);
    assert!(delong.interval.upper > roc.area_under_curve);
}

// ===========================================================================
// Evaluation envelope
// ===========================================================================

#[test]
fn test_evaluate_roc_from_json() {
    let input: RocInput = serde_json::from_str(
        r#"{
            "observations": [
                {"observed": 1, "predicted": 0.9},
                {"observed": 1, "predicted": 0.7},
                {"observed": 0, "predicted": 0.6},
                {"observed": 1, "predicted": 0.4},
                {"observed": 0, "predicted": 0.2},
                {"observed": 0, "predicted": 0.1}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(input.critical_value, 1.96);

    let out = evaluate_roc(&input).unwrap();
    // 8 of 9 pairs ranked correctly
    assert!((out.result.area_under_curve - 8.0 / 9.0).abs() < 1e-12);
    assert!(out.result.delong.is_some());

    let json = serde_json::to_value(&out).unwrap();
    assert!(json["result"]["points"].is_array());
    assert_eq!(json["metadata"]["precision"], "ieee754_f64");
}
