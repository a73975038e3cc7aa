//! Descriptive statistics over a sample.

use crate::error::OperandError;
use crate::operations::Arity;

fn require(values: &[f64], min: usize) -> Result<(), OperandError> {
    if values.len() < min {
        return Err(OperandError::WrongCount {
            expected: Arity::AtLeast(min),
            got: values.len(),
        });
    }
    Ok(())
}

/// Running mean and sum of squared deviations (Welford).
///
/// Never forms the plain sum, so large finite samples stay finite.
fn running_moments(values: &[f64]) -> (f64, f64) {
    let mut mean = 0.0;
    let mut squares = 0.0;
    for (i, &value) in values.iter().enumerate() {
        let count = (i + 1) as f64;
        let delta = value - mean;
        mean += value / count - mean / count;
        squares += delta * (value - mean);
    }
    (mean, squares)
}

pub(super) fn mean(values: &[f64]) -> Result<f64, OperandError> {
    require(values, 1)?;
    Ok(running_moments(values).0)
}

pub(super) fn median(values: &[f64]) -> Result<f64, OperandError> {
    require(values, 1)?;
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok(sorted[mid - 1] / 2.0 + sorted[mid] / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Sample variance, with an `n - 1` denominator.
pub(super) fn variance(values: &[f64]) -> Result<f64, OperandError> {
    require(values, 2)?;
    let (_, squares) = running_moments(values);
    Ok(squares / (values.len() - 1) as f64)
}

pub(super) fn stdev(values: &[f64]) -> Result<f64, OperandError> {
    variance(values).map(f64::sqrt)
}
