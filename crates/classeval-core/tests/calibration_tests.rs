use classeval_core::calibration::{
    BinningStrategy, CalibrationConfig, HosmerLemeshow, UNDEFINED_P_VALUE,
};
use classeval_core::evaluation::{
    evaluate_calibration, evaluate_classifier, CalibrationInput, EvaluationInput,
};
use classeval_core::SampleSet;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn well_calibrated(rng: &mut StdRng, n: usize) -> SampleSet {
    let pairs: Vec<(u8, f64)> = (0..n)
        .map(|_| {
            let p: f64 = rng.gen_range(0.0..=1.0);
            (rng.gen_bool(p) as u8, p)
        })
        .collect();
    SampleSet::from_pairs(pairs).unwrap()
}

fn hl(set: &SampleSet, strategy: BinningStrategy) -> HosmerLemeshow {
    HosmerLemeshow::from_samples(set, &CalibrationConfig::with_strategy(strategy)).unwrap()
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn test_hundred_identical_predictions() {
    let pairs: Vec<(u8, f64)> = (0..100).map(|i| ((i < 50) as u8, 0.5)).collect();
    let set = SampleSet::from_pairs(pairs).unwrap();
    let result = hl(&set, BinningStrategy::Decile);

    assert_eq!(result.groups.len(), 1);
    assert_eq!(result.groups[0].count, 100);
    assert_eq!(result.goodness_of_fit.degrees_of_freedom, -1);
    assert_eq!(result.goodness_of_fit.p_value, UNDEFINED_P_VALUE);
}

#[test]
fn test_single_group_ece_is_group_gap() {
    let set = SampleSet::from_pairs(vec![(1, 0.3), (1, 0.3), (0, 0.3), (1, 0.3)]).unwrap();
    let result = hl(&set, BinningStrategy::Decile);
    assert_eq!(result.groups.len(), 1);
    let gap = (0.75_f64 - 0.3).abs();
    let errs = result.calibration_errors;
    assert!((errs.expected_calibration_error - gap).abs() < 1e-12);
    assert!((errs.maximum_calibration_error - gap).abs() < 1e-12);
    assert!((errs.average_calibration_error - gap).abs() < 1e-12);
}

#[test]
fn test_fixed_risk_skips_empty_bands_and_renumbers() {
    let set = SampleSet::from_pairs(vec![(0, 0.02), (0, 0.04), (1, 0.93), (1, 0.97)]).unwrap();
    let result = hl(&set, BinningStrategy::FixedRisk);
    let numbers: Vec<u32> = result.groups.iter().map(|g| g.group_number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(result.goodness_of_fit.degrees_of_freedom, 0);
}

// ===========================================================================
// Properties over seeded random data
// ===========================================================================

#[test]
fn test_group_coverage_and_order() {
    let mut rng = StdRng::seed_from_u64(3);
    for trial in 0..20 {
        let set = well_calibrated(&mut rng, 30 + trial * 17);
        for strategy in [BinningStrategy::Decile, BinningStrategy::FixedRisk] {
            let result = hl(&set, strategy);
            let total: u64 = result.groups.iter().map(|g| g.count).sum();
            assert_eq!(total, set.len() as u64);
            assert!(result.groups.iter().all(|g| g.count > 0));
            assert!(result.groups.len() <= 10);
            for w in result.groups.windows(2) {
                assert_eq!(w[1].group_number, w[0].group_number + 1);
                assert!(w[1].expected_rate > w[0].expected_rate);
            }
        }
    }
}

#[test]
fn test_well_calibrated_model_is_not_rejected() {
    let mut rng = StdRng::seed_from_u64(2024);
    let set = well_calibrated(&mut rng, 5000);
    let result = hl(&set, BinningStrategy::Decile);
    assert_eq!(result.groups.len(), 10);
    assert_eq!(result.goodness_of_fit.degrees_of_freedom, 8);
    assert!(result.goodness_of_fit.p_value > 1e-4);
    assert!(result.calibration_errors.expected_calibration_error < 0.05);
}

#[test]
fn test_miscalibrated_model_is_rejected() {
    let mut rng = StdRng::seed_from_u64(17);
    let pairs: Vec<(u8, f64)> = (0..5000)
        .map(|_| {
            let p: f64 = rng.gen_range(0.05..=0.95);
            // Outcomes follow p², predictions overstate risk.
            (rng.gen_bool(p * p) as u8, p)
        })
        .collect();
    let set = SampleSet::from_pairs(pairs).unwrap();
    let result = hl(&set, BinningStrategy::Decile);
    assert!(result.goodness_of_fit.p_value >= 0.0);
    assert!(result.goodness_of_fit.p_value < 1e-6);
    assert!(result.calibration_errors.maximum_calibration_error > 0.1);
}

// ===========================================================================
// Evaluation envelope
// ===========================================================================

#[test]
fn test_evaluate_calibration_from_json() {
    let input: CalibrationInput = serde_json::from_str(
        r#"{
            "observations": [
                {"observed": 0, "predicted": 0.1},
                {"observed": 0, "predicted": 0.2},
                {"observed": 1, "predicted": 0.6},
                {"observed": 1, "predicted": 0.9}
            ],
            "strategy": "fixed_risk",
            "num_groups": 5
        }"#,
    )
    .unwrap();
    let out = evaluate_calibration(&input).unwrap();
    assert_eq!(out.result.strategy, BinningStrategy::FixedRisk);
    let total: u64 = out.result.groups.iter().map(|g| g.count).sum();
    assert_eq!(total, 4);
    assert!(out.result.report().contains("Total Number of Groups"));
}

#[test]
fn test_evaluate_classifier_rejects_zero_groups() {
    let input = EvaluationInput {
        observations: vec![(1, 0.9).into(), (0, 0.1).into()],
        config: CalibrationConfig {
            num_groups: 0,
            ..CalibrationConfig::default()
        },
    };
    assert!(evaluate_classifier(&input).is_err());
}
