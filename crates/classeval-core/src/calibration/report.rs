//! Plain-text Hosmer-Lemeshow summary table.

use std::fmt;

use statrs::distribution::{ContinuousCDF, Normal};

use super::HosmerLemeshow;

const RULE_HEAVY: &str =
    "========================================================================";
const RULE_LIGHT: &str =
    "------------------------------------------------------------------------";

impl HosmerLemeshow {
    pub fn report(&self) -> String {
        self.to_string()
    }
}

/// Two-sided coverage of `±z` as a column label, e.g. `95% CI` for 1.96.
fn interval_label(critical_value: f64) -> String {
    let coverage = Normal::new(0.0, 1.0)
        .map(|n| 2.0 * n.cdf(critical_value) - 1.0)
        .ok()
        .filter(|c| c.is_finite() && *c > 0.0);
    match coverage {
        Some(c) => {
            let pct = (c * 1000.0).round() / 10.0;
            if pct.fract() == 0.0 {
                format!("{pct:.0}% CI")
            } else {
                format!("{pct:.1}% CI")
            }
        }
        None => format!("CI (z={critical_value})"),
    }
}

impl fmt::Display for HosmerLemeshow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE_HEAVY}")?;
        writeln!(
            f,
            "{:<6} {:<8} {:<13} {:<15} {:<8} {}",
            "Group",
            "N",
            "Obs (%)",
            "Exp (%)",
            "HL",
            interval_label(self.critical_value)
        )?;
        writeln!(f, "{RULE_HEAVY}")?;

        let mut observed_total = 0u64;
        let mut predicted_total = 0.0;
        for g in &self.groups {
            observed_total += g.positive_observed_sum;
            predicted_total += g.predicted_sum;
            let obs = format!("{} ({:.1})", g.positive_observed_sum, g.observed_rate * 100.0);
            let exp = format!("{:.1} ({:.1})", g.predicted_sum, g.expected_rate * 100.0);
            let ci = format!(
                "({:.4}, {:.4})",
                g.expected_rate - g.margin_of_error,
                g.expected_rate + g.margin_of_error
            );
            writeln!(
                f,
                "{:<6} {:<8} {:<13} {:<15} {:<8.2} {}",
                g.group_number, g.count, obs, exp, g.chi_square_contribution, ci
            )?;
        }

        writeln!(f, "{RULE_LIGHT}")?;
        let n = self.num_predictions as f64;
        let (obs_pct, exp_pct) = if n > 0.0 {
            (observed_total as f64 / n * 100.0, predicted_total / n * 100.0)
        } else {
            (0.0, 0.0)
        };
        let gof = &self.goodness_of_fit;
        writeln!(
            f,
            "{:<6} {:<8} {:<13} {:<15} {:.2}",
            "Total",
            self.num_predictions,
            format!("{observed_total} ({obs_pct:.1})"),
            format!("{predicted_total:.1} ({exp_pct:.1})"),
            gof.chi_square
        )?;
        writeln!(f)?;
        writeln!(f, "Total Number of Groups: {}", self.groups.len())?;
        writeln!(
            f,
            "Hosmer-Lemeshow Chi2({}): {:.2}",
            self.groups.len(),
            gof.chi_square
        )?;
        writeln!(f, "Degrees of Freedom: {}", gof.degrees_of_freedom)?;
        writeln!(f, "P-Value: {:.6}", gof.p_value)?;
        writeln!(f)?;

        let errs = &self.calibration_errors;
        writeln!(f, "Calibration Metrics")?;
        writeln!(f, "------------------------------------")?;
        writeln!(
            f,
            "Expected Calibration Error (ECE): {:.6}",
            errs.expected_calibration_error
        )?;
        writeln!(
            f,
            "Maximum Calibration Error (MCE): {:.6}",
            errs.maximum_calibration_error
        )?;
        writeln!(
            f,
            "Average Calibration Error (ACE): {:.6}",
            errs.average_calibration_error
        )?;
        write!(f, "{RULE_HEAVY}")
    }
}

#[cfg(test)]
mod tests {
    use super::interval_label;
    use crate::calibration::{BinningStrategy, CalibrationConfig, HosmerLemeshow};
    use crate::sample::SampleSet;

    fn hl() -> HosmerLemeshow {
        let set = SampleSet::from_pairs(vec![
            (0, 0.05),
            (0, 0.15),
            (1, 0.35),
            (0, 0.45),
            (1, 0.65),
            (1, 0.85),
        ])
        .unwrap();
        HosmerLemeshow::from_samples(
            &set,
            &CalibrationConfig {
                strategy: BinningStrategy::FixedRisk,
                num_groups: 5,
                critical_value: 1.96,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_report_has_one_row_per_group() {
        let report = hl().report();
        let rows = report
            .lines()
            .skip(3)
            .take_while(|l| !l.starts_with("---"))
            .count();
        assert_eq!(rows, hl().groups.len());
    }

    #[test]
    fn test_report_summary_lines() {
        let hl = hl();
        let report = hl.report();
        assert!(report.starts_with("===="));
        assert!(report.lines().nth(1).unwrap().starts_with("Group "));
        assert!(report.contains(&format!("Total Number of Groups: {}", hl.groups.len())));
        assert!(report.contains(&format!(
            "Degrees of Freedom: {}",
            hl.goodness_of_fit.degrees_of_freedom
        )));
        assert!(report.contains("Expected Calibration Error (ECE):"));
        assert!(report.lines().any(|l| l.starts_with("Total ")));
    }

    #[test]
    fn test_undefined_p_value_printed_as_sentinel() {
        let set = SampleSet::from_pairs(vec![(1, 0.5), (0, 0.5)]).unwrap();
        let hl = HosmerLemeshow::from_samples(&set, &CalibrationConfig::default()).unwrap();
        assert!(hl.report().contains("P-Value: -1.000000"));
    }

    #[test]
    fn test_interval_label_follows_critical_value() {
        assert_eq!(interval_label(1.96), "95% CI");
        assert_eq!(interval_label(2.576), "99% CI");
        assert_eq!(interval_label(1.645), "90% CI");
        assert_eq!(interval_label(3.0), "99.7% CI");
    }

    #[test]
    fn test_report_header_uses_configured_critical_value() {
        let set = SampleSet::from_pairs(vec![(0, 0.2), (1, 0.4), (0, 0.6), (1, 0.8)]).unwrap();
        let config = CalibrationConfig {
            critical_value: 2.576,
            ..CalibrationConfig::default()
        };
        let report = HosmerLemeshow::from_samples(&set, &config).unwrap().report();
        let header = report.lines().nth(1).unwrap();
        assert!(header.ends_with("99% CI"), "{header}");
        assert!(!report.contains("95% CI"));
    }
}
