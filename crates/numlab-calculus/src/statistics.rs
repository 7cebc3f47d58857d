//! Sample standard deviation, computed two ways.
//!
//! The two-pass form subtracts the mean before squaring. The one-pass form
//! accumulates `sum(x^2)` and subtracts `n * mean^2` at the end, which
//! cancels catastrophically when the spread is small relative to the mean.

use log::warn;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum StatsError {
    #[error("sample standard deviation needs at least 2 values, got {0}")]
    TooFewSamples(usize),

    /// Cancellation in the one-pass formula drove the variance below zero.
    #[error("one-pass variance is negative ({0:e})")]
    NegativeVariance(f64),
}

/// `|(actual - approximate) / actual|`
pub fn relative_error(actual: f64, approximate: f64) -> f64 {
    ((actual - approximate) / actual).abs()
}

pub fn two_pass_std(data: &[f64]) -> Result<f64, StatsError> {
    let n = sample_count(data)?;
    let mean = data.iter().sum::<f64>() / n;
    let var = data.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Ok(var.sqrt())
}

pub fn one_pass_std(data: &[f64]) -> Result<f64, StatsError> {
    let n = sample_count(data)?;
    let (sum, sum_sq) = data
        .iter()
        .fold((0.0, 0.0), |(s, sq), value| (s + value, sq + value * value));
    let mean = sum / n;
    let centered = sum_sq - n * (mean * mean);
    if centered < 0.0 {
        warn!("one-pass variance went negative: {centered:e}");
        return Err(StatsError::NegativeVariance(centered / (n - 1.0)));
    }
    Ok((centered / (n - 1.0)).sqrt())
}

fn sample_count(data: &[f64]) -> Result<f64, StatsError> {
    if data.len() < 2 {
        return Err(StatsError::TooFewSamples(data.len()));
    }
    Ok(data.len() as f64)
}
