//! Grouped score tables read from CSV and generated synthetically

use approx::assert_abs_diff_eq;
use primer_core::Error;
use primer_describe::{describe, GroupedSamples, Histogram};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

const SCORES: &str = "\
Group,Score
A,71.5
B,80.25
A,68.0
B,83.0
A,74.5
B,79.0
";

#[test]
fn test_csv_scores_grouped_by_label() {
    let grouped = GroupedSamples::from_csv_reader(SCORES.as_bytes()).unwrap();
    assert_eq!(grouped.labels().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(grouped.get("A").unwrap(), &[71.5, 68.0, 74.5]);

    let summary = grouped.describe_groups().unwrap();
    let a = summary.get("A").unwrap();
    assert_eq!(a.count, 3);
    assert_abs_diff_eq!(a.mean, 71.333333333333, epsilon = 1e-9);
    assert_eq!(a.min, 68.0);
    assert_eq!(a.max, 74.5);
    let b = summary.get("B").unwrap();
    assert_abs_diff_eq!(b.median, 80.25, epsilon = 1e-12);
}

#[test]
fn test_csv_with_bad_score_rejected() {
    let table = "Group,Score\nA,1.0\nA,not-a-number\n";
    match GroupedSamples::from_csv_reader(table.as_bytes()) {
        Err(Error::InvalidInput(msg)) => assert!(msg.contains("row 2")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_missing_csv_file_is_io_error() {
    let result = GroupedSamples::from_csv_path("/definitely/not/here/scores.csv");
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_synthetic_groups_describe_near_parameters() {
    let mut rng = StdRng::seed_from_u64(42);
    let normal_a = Normal::new(75.0, 10.0).unwrap();
    let normal_b = Normal::new(80.0, 10.0).unwrap();
    let a: Vec<f64> = (0..5000).map(|_| normal_a.sample(&mut rng)).collect();
    let b: Vec<f64> = (0..5000).map(|_| normal_b.sample(&mut rng)).collect();

    let grouped = GroupedSamples::from_groups(vec![("A", a.clone()), ("B", b)]).unwrap();
    let summary = grouped.describe_groups().unwrap();

    let desc_a = summary.get("A").unwrap();
    assert_abs_diff_eq!(desc_a.mean, 75.0, epsilon = 0.5);
    assert_abs_diff_eq!(desc_a.std.unwrap(), 10.0, epsilon = 0.5);
    assert_abs_diff_eq!(summary.get("B").unwrap().mean, 80.0, epsilon = 0.5);

    // Ungrouped and grouped descriptions agree
    assert_eq!(describe(&a).unwrap(), *desc_a);

    let hist = Histogram::new(&a, 30).unwrap();
    assert_eq!(hist.total_count(), a.len());
}
