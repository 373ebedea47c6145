//! Plain numeric helpers over `f64` slices
//!
//! These are the building blocks every other primer crate computes with:
//! moments with an explicit delta-degrees-of-freedom, order statistics and
//! linearly interpolated quantiles. All functions reject empty input instead
//! of returning NaN.

use crate::{Error, Result};

/// Reject empty input with `InsufficientData`
fn require_len(data: &[f64], expected: usize) -> Result<()> {
    if data.len() < expected {
        return Err(Error::InsufficientData {
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Check that every element is finite
///
/// Reports the first offending element.
pub fn ensure_finite(data: &[f64]) -> Result<()> {
    match data.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(Error::InvalidValue {
            index,
            value: data[index],
        }),
        None => Ok(()),
    }
}

/// Power of two at or below the largest magnitude, never below one
///
/// Dividing by it is exact, so moments computed on the rescaled values match
/// the plain ones bit for bit while squares stay in range near `f64::MAX`.
pub fn magnitude_scale(data: &[f64]) -> f64 {
    let largest = data.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    if largest.is_finite() && largest >= 2.0 {
        2f64.powi(largest.log2().floor() as i32)
    } else {
        1.0
    }
}

fn scaled_mean(data: &[f64], scale: f64) -> f64 {
    data.iter().map(|x| x / scale).sum::<f64>() / data.len() as f64
}

fn scaled_variance(data: &[f64], scale: f64, ddof: usize) -> f64 {
    let m = scaled_mean(data, scale);
    let ss: f64 = data
        .iter()
        .map(|x| {
            let d = x / scale - m;
            d * d
        })
        .sum();
    ss / (data.len() - ddof) as f64
}

pub(crate) fn mean_unchecked(data: &[f64]) -> f64 {
    let scale = magnitude_scale(data);
    scaled_mean(data, scale) * scale
}

pub(crate) fn variance_unchecked(data: &[f64], ddof: usize) -> f64 {
    let scale = magnitude_scale(data);
    scaled_variance(data, scale, ddof) * scale * scale
}

pub(crate) fn std_dev_unchecked(data: &[f64], ddof: usize) -> f64 {
    let scale = magnitude_scale(data);
    scaled_variance(data, scale, ddof).sqrt() * scale
}

/// Arithmetic mean
pub fn mean(data: &[f64]) -> Result<f64> {
    require_len(data, 1)?;
    Ok(mean_unchecked(data))
}

/// Sum of squared deviations from `center`
pub fn sum_squared_deviations(data: &[f64], center: f64) -> f64 {
    data.iter().map(|&x| (x - center) * (x - center)).sum()
}

/// Variance with divisor `n - ddof`
///
/// `ddof = 1` gives the Bessel-corrected sample variance, `ddof = 0` the
/// population variance. Infinite only when the variance itself exceeds
/// `f64::MAX`; the standard deviation stays finite for any finite input.
pub fn variance(data: &[f64], ddof: usize) -> Result<f64> {
    require_len(data, ddof + 1)?;
    Ok(variance_unchecked(data, ddof))
}

/// Standard deviation with divisor `n - ddof`
pub fn std_dev(data: &[f64], ddof: usize) -> Result<f64> {
    require_len(data, ddof + 1)?;
    Ok(std_dev_unchecked(data, ddof))
}

/// Smallest element
pub fn min(data: &[f64]) -> Result<f64> {
    require_len(data, 1)?;
    Ok(data.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Largest element
pub fn max(data: &[f64]) -> Result<f64> {
    require_len(data, 1)?;
    Ok(data.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// Ascending copy of the data
///
/// NaN sorts last under `total_cmp`; callers validate finiteness first.
pub fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Quantile of pre-sorted data by linear interpolation between order statistics
///
/// Uses position `h = (n - 1) * p`, the default of numpy and pandas.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Result<f64> {
    require_len(sorted, 1)?;
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::invalid_quantile(p));
    }

    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;

    Ok(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Quantile of unsorted data
pub fn quantile(data: &[f64], p: f64) -> Result<f64> {
    quantile_sorted(&sorted_copy(data), p)
}

/// Median of unsorted data
pub fn median(data: &[f64]) -> Result<f64> {
    quantile(data, 0.5)
}

/// Evenly spaced values over `[start, stop]`, both ends included
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num).map(|i| start + step * i as f64).collect()
        }
    }
}
