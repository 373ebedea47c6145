//! Property tests for sample statistics

use approx::assert_relative_eq;
use primer_core::{numeric, Error, Sample};
use proptest::prelude::*;

fn finite_values(min_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6..1.0e6f64, min_len..64)
}

proptest! {
    #[test]
    fn std_dev_invariant_under_reordering(
        (values, shuffled) in finite_values(2)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let sample = Sample::new(values).unwrap();
        let reordered = Sample::new(shuffled).unwrap();

        prop_assert!((sample.std_dev() - reordered.std_dev()).abs() <= 1e-9 * (1.0 + sample.std_dev()));
    }

    #[test]
    fn sample_mean_matches_numeric_mean(values in finite_values(2)) {
        let sample = Sample::new(values.clone()).unwrap();
        prop_assert!((sample.mean() - numeric::mean(&values).unwrap()).abs() <= 1e-9);
    }

    #[test]
    fn quantiles_are_monotone(values in finite_values(1)) {
        let sorted = numeric::sorted_copy(&values);
        let q1 = numeric::quantile_sorted(&sorted, 0.25).unwrap();
        let q2 = numeric::quantile_sorted(&sorted, 0.5).unwrap();
        let q3 = numeric::quantile_sorted(&sorted, 0.75).unwrap();
        prop_assert!(sorted[0] <= q1 && q1 <= q2 && q2 <= q3 && q3 <= sorted[sorted.len() - 1]);
    }
}

#[test]
fn test_variance_of_constant_sample_is_zero() {
    let sample = Sample::new(vec![4.0; 10]).unwrap();
    assert_relative_eq!(sample.variance(), 0.0);
}

#[test]
fn test_nan_anywhere_is_rejected() {
    for position in 0..5 {
        let mut values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        values[position] = f64::NAN;
        match Sample::new(values) {
            Err(Error::InvalidValue { index, value }) => {
                assert_eq!(index, position);
                assert!(value.is_nan());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
