//! Labelled observations grouped for per-group summaries

use crate::describe::{describe, Description};
use primer_core::{numeric, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// One labelled observation, the row of a long-format score table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "Group")]
    pub group: String,
    #[serde(rename = "Score")]
    pub score: f64,
}

/// Observations partitioned by label
///
/// Labels iterate in sorted order; observations keep their insertion order
/// within a group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedSamples {
    groups: BTreeMap<String, Vec<f64>>,
}

impl GroupedSamples {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(label, value)` pairs
    pub fn from_records<I, S>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut grouped = Self::new();
        for (label, value) in records {
            grouped.push(label, value)?;
        }
        Ok(grouped)
    }

    /// Build from whole groups, e.g. two synthetic samples labelled "A" and "B"
    pub fn from_groups<I, S>(groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut grouped = Self::new();
        for (label, values) in groups {
            numeric::ensure_finite(&values)?;
            grouped.groups.entry(label.into()).or_default().extend(values);
        }
        Ok(grouped)
    }

    /// Add one observation
    pub fn push(&mut self, label: impl Into<String>, value: f64) -> Result<()> {
        let label = label.into();
        if !value.is_finite() {
            let index = self.groups.get(&label).map_or(0, Vec::len);
            return Err(Error::InvalidValue { index, value });
        }
        self.groups.entry(label).or_default().push(value);
        Ok(())
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Labels in sorted order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Observations of one group
    pub fn get(&self, label: &str) -> Option<&[f64]> {
        self.groups.get(label).map(Vec::as_slice)
    }

    /// `(label, observations)` pairs in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.groups
            .iter()
            .map(|(label, values)| (label.as_str(), values.as_slice()))
    }

    /// Describe every group
    pub fn describe_groups(&self) -> Result<GroupSummary> {
        let rows = self
            .iter()
            .map(|(label, values)| {
                describe(values).map(|description| (label.to_string(), description))
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(groups = rows.len(), "described grouped samples");
        Ok(GroupSummary { rows })
    }

    /// Read a `Group,Score` CSV table
    #[cfg(feature = "csv")]
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut grouped = Self::new();
        for (line, row) in csv_reader.deserialize::<ScoreRecord>().enumerate() {
            let record = row.map_err(|e| {
                Error::InvalidInput(format!("score table row {}: {e}", line + 1))
            })?;
            grouped.push(record.group, record.score)?;
        }
        debug!(groups = grouped.len(), "loaded score table");
        Ok(grouped)
    }

    /// Read a `Group,Score` CSV file
    #[cfg(feature = "csv")]
    pub fn from_csv_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }
}

/// Per-group descriptions, one row per label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub rows: Vec<(String, Description)>,
}

impl GroupSummary {
    /// Description of one group
    pub fn get(&self, label: &str) -> Option<&Description> {
        self.rows
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, description)| description)
    }
}

impl fmt::Display for GroupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0)
            .max("Group".len());

        writeln!(
            f,
            "{:<width$} {:>6} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
            "Group", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        )?;
        for (label, d) in &self.rows {
            let std = d
                .std
                .map(|s| format!("{s:.6}"))
                .unwrap_or_else(|| "NaN".to_string());
            writeln!(
                f,
                "{:<width$} {:>6} {:>9.6} {:>9} {:>9.6} {:>9.6} {:>9.6} {:>9.6} {:>9.6}",
                label, d.count, d.mean, std, d.min, d.q25, d.median, d.q75, d.max
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_grouped_and_sorted() {
        let grouped = GroupedSamples::from_records(vec![
            ("B", 6.0),
            ("A", 1.0),
            ("B", 7.0),
            ("A", 2.0),
            ("A", 3.0),
        ])
        .unwrap();

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.labels().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(grouped.get("A").unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(grouped.get("B").unwrap(), &[6.0, 7.0]);
        assert!(grouped.get("C").is_none());
    }

    #[test]
    fn test_non_finite_observation_rejected() {
        let mut grouped = GroupedSamples::new();
        grouped.push("A", 1.0).unwrap();
        assert!(matches!(
            grouped.push("A", f64::INFINITY),
            Err(Error::InvalidValue { index: 1, .. })
        ));
        assert!(GroupedSamples::from_groups(vec![("A", vec![1.0, f64::NAN])]).is_err());
    }

    #[test]
    fn test_describe_groups() {
        let grouped = GroupedSamples::from_groups(vec![
            ("A", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            ("B", vec![6.0, 7.0, 8.0, 9.0, 10.0]),
        ])
        .unwrap();

        let summary = grouped.describe_groups().unwrap();
        assert_eq!(summary.rows.len(), 2);
        assert_eq!(summary.get("A").unwrap().mean, 3.0);
        assert_eq!(summary.get("B").unwrap().median, 8.0);

        let table = summary.to_string();
        assert!(table.starts_with("Group"));
        assert!(table.contains("25%"));
        assert_eq!(table.lines().count(), 3);
    }
}
