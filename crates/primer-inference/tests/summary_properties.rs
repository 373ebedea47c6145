//! Property and end-to-end tests for the two-sample summary and friends

use approx::assert_abs_diff_eq;
use primer_core::{Error, Significance, TestOutcome, TwoSampleTest};
use primer_inference::{
    chi_square_contingency, pearson, shapiro_wilk, summarize, summarize_with, TTest,
    VarianceAssumption,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use statrs::distribution::{ContinuousCDF, Normal as StatrsNormal};

fn sample_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e4..1.0e4f64, 2..40)
}

proptest! {
    #[test]
    fn identical_samples_show_no_difference(a in sample_values()) {
        let result = summarize(&a, &a).unwrap();
        prop_assert_eq!(result.t_statistic, 0.0);
        prop_assert!((result.p_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn swapping_samples_negates_t(a in sample_values(), b in sample_values()) {
        let ab = summarize(&a, &b).unwrap();
        let ba = summarize(&b, &a).unwrap();
        prop_assert_eq!(ab.t_statistic, -ba.t_statistic);
        prop_assert_eq!(ab.p_value, ba.p_value);
        prop_assert_eq!(ab.mean_a, ba.mean_b);
    }

    #[test]
    fn reported_mean_matches_sample(a in sample_values(), b in sample_values()) {
        let result = summarize(&a, &b).unwrap();
        let mean = a.iter().sum::<f64>() / a.len() as f64;
        prop_assert!((result.mean_a - mean).abs() <= 1e-9);
        prop_assert!(result.sd_a >= 0.0 && result.sd_b >= 0.0);
        prop_assert!((0.0..=1.0).contains(&result.p_value));
    }

    #[test]
    fn welch_df_is_bounded(a in sample_values(), b in sample_values()) {
        let result = summarize_with(&a, &b, VarianceAssumption::Unequal).unwrap();
        let lower = (a.len().min(b.len()) - 1) as f64;
        let upper = (a.len() + b.len() - 2) as f64;
        prop_assert!(result.df >= lower - 1e-9 && result.df <= upper + 1e-9);
    }
}

#[test]
fn test_seeded_score_groups() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let group_a: Vec<f64> = Normal::new(75.0, 10.0)
        .unwrap()
        .sample_iter(&mut rng)
        .take(30)
        .collect();
    let group_b: Vec<f64> = Normal::new(90.0, 10.0)
        .unwrap()
        .sample_iter(&mut rng)
        .take(30)
        .collect();

    let student = TTest::student().test(&group_a, &group_b).unwrap();
    let welch = TTest::welch().test(&group_a, &group_b).unwrap();

    assert!(student.statistic < 0.0);
    assert_abs_diff_eq!(student.statistic, welch.statistic, epsilon = 1e-12);
    assert!(welch.df <= student.df);
    // A 1.5 standard deviation shift over 30 observations per group
    assert!(matches!(
        student.significance(0.05).unwrap(),
        Significance::Significant { .. }
    ));
}

#[test]
fn test_normal_quantiles_pass_normality() {
    let normal = StatrsNormal::new(0.0, 1.0).unwrap();
    let values: Vec<f64> = (0..50)
        .map(|i| normal.inverse_cdf((i as f64 + 0.5) / 50.0))
        .collect();
    let result = shapiro_wilk(&values).unwrap();
    assert!(result.w > 0.98);
    assert!(result.p_value > 0.9);
    assert!(result.appears_normal(0.05).unwrap());
}

#[test]
fn test_skewed_data_fails_normality() {
    let values: Vec<f64> = (1..=40).map(|i| (i as f64 / 4.0).exp()).collect();
    let result = shapiro_wilk(&values).unwrap();
    assert!(result.p_value < 0.001);
}

#[test]
fn test_strong_linear_relationship() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let noise = Normal::new(0.0, 0.5).unwrap();
    let x: Vec<f64> = (0..50).map(|i| i as f64 / 5.0).collect();
    let y: Vec<f64> = x.iter().map(|&xi| 2.0 * xi + 1.0 + noise.sample(&mut rng)).collect();

    let result = pearson(&x, &y).unwrap();
    assert!(result.r > 0.95);
    assert!(result.is_significant(0.01).unwrap());
}

#[test]
fn test_errors_propagate_through_every_test() {
    assert!(matches!(
        summarize(&[], &[1.0, 2.0]),
        Err(Error::InsufficientData { .. })
    ));
    assert!(matches!(
        shapiro_wilk(&[1.0, f64::INFINITY, 2.0]),
        Err(Error::InvalidValue { .. })
    ));
    assert!(chi_square_contingency(&[[1.0, 2.0], [f64::NAN, 4.0]], true).is_err());
    assert!(TTest::welch().test(&[1.0], &[2.0, 3.0]).is_err());
}
