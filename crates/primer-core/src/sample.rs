//! Validated numeric samples

use crate::numeric;
use crate::{Error, Result};
use num_traits::ToPrimitive;
use std::ops::Deref;

/// An ordered sequence of finite real numbers with a guaranteed minimum length
///
/// The default minimum is two elements, the smallest sample for which a
/// Bessel-corrected standard deviation is defined.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Minimum length of a sample built with [`Sample::new`]
    pub const MIN_LEN: usize = 2;

    /// Build a sample of at least [`Sample::MIN_LEN`] finite values
    pub fn new(values: Vec<f64>) -> Result<Self> {
        Self::with_min_len(values, Self::MIN_LEN)
    }

    /// Build a sample with a custom minimum length
    pub fn with_min_len(values: Vec<f64>, min_len: usize) -> Result<Self> {
        validate(&values, min_len)?;
        Ok(Self { values })
    }

    /// Convert any primitive numeric slice into a sample
    pub fn from_values<T: ToPrimitive + Copy>(values: &[T]) -> Result<Self> {
        let converted = values
            .iter()
            .enumerate()
            .map(|(index, v)| {
                v.to_f64().ok_or(Error::InvalidValue {
                    index,
                    value: f64::NAN,
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        Self::new(converted)
    }

    /// The underlying values, in their original order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consume the sample, returning its values
    pub fn into_inner(self) -> Vec<f64> {
        self.values
    }

    /// Arithmetic mean
    pub fn mean(&self) -> f64 {
        numeric::mean_unchecked(&self.values)
    }

    /// Bessel-corrected variance (divisor n - 1)
    pub fn variance(&self) -> f64 {
        numeric::variance_unchecked(&self.values, 1)
    }

    /// Bessel-corrected standard deviation
    pub fn std_dev(&self) -> f64 {
        numeric::std_dev_unchecked(&self.values, 1)
    }

    /// Ascending copy of the values
    pub fn sorted(&self) -> Vec<f64> {
        numeric::sorted_copy(&self.values)
    }
}

/// Validate a borrowed slice against the sample invariants
///
/// The length is checked before finiteness, so a one-element slice holding NaN
/// reports `InsufficientData`.
pub fn validate(values: &[f64], min_len: usize) -> Result<()> {
    if values.len() < min_len {
        return Err(Error::InsufficientData {
            expected: min_len,
            actual: values.len(),
        });
    }
    numeric::ensure_finite(values)
}

impl Deref for Sample {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl AsRef<[f64]> for Sample {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl TryFrom<Vec<f64>> for Sample {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl TryFrom<&[f64]> for Sample {
    type Error = Error;

    fn try_from(values: &[f64]) -> Result<Self> {
        Self::new(values.to_vec())
    }
}
