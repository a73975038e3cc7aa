//! Arithmetic operation bodies.
//!
//! The variadic operations fold left to right: `subtract 10 3 2` is
//! `(10 - 3) - 2`.

use crate::error::OperandError;
use crate::operations::Arity;

fn fold(values: &[f64], step: fn(f64, f64) -> f64) -> Result<f64, OperandError> {
    let (first, rest) = values.split_first().ok_or(OperandError::WrongCount {
        expected: Arity::AtLeast(1),
        got: 0,
    })?;
    Ok(rest.iter().fold(*first, |acc, v| step(acc, *v)))
}

fn pair(values: &[f64]) -> Result<(f64, f64), OperandError> {
    match values {
        [a, b] => Ok((*a, *b)),
        _ => Err(OperandError::WrongCount {
            expected: Arity::Exactly(2),
            got: values.len(),
        }),
    }
}

pub(super) fn add(values: &[f64]) -> Result<f64, OperandError> {
    fold(values, |a, b| a + b)
}

pub(super) fn subtract(values: &[f64]) -> Result<f64, OperandError> {
    fold(values, |a, b| a - b)
}

pub(super) fn multiply(values: &[f64]) -> Result<f64, OperandError> {
    fold(values, |a, b| a * b)
}

pub(super) fn divide(values: &[f64]) -> Result<f64, OperandError> {
    if values.iter().skip(1).any(|v| *v == 0.0) {
        return Err(OperandError::DivisionByZero);
    }
    fold(values, |a, b| a / b)
}

pub(super) fn power(values: &[f64]) -> Result<f64, OperandError> {
    let (base, exponent) = pair(values)?;
    if base == 0.0 && exponent < 0.0 {
        return Err(OperandError::DivisionByZero);
    }
    Ok(base.powf(exponent))
}

/// `root value degree`: the `degree`-th root of `value`.
pub(super) fn root(values: &[f64]) -> Result<f64, OperandError> {
    let (value, degree) = pair(values)?;
    if degree == 0.0 {
        return Err(OperandError::Undefined("the zeroth root is undefined".into()));
    }
    if value >= 0.0 {
        return Ok(principal_root(value, degree));
    }

    let odd_integer = degree.fract() == 0.0 && degree % 2.0 != 0.0;
    if odd_integer {
        Ok(-principal_root(-value, degree))
    } else {
        Err(OperandError::Undefined(format!(
            "no real {degree}-th root of a negative number"
        )))
    }
}

// sqrt and cbrt are exact for perfect squares and cubes; powf is not.
fn principal_root(value: f64, degree: f64) -> f64 {
    if degree == 2.0 {
        value.sqrt()
    } else if degree == 3.0 {
        value.cbrt()
    } else {
        value.powf(degree.recip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sums_all_operands() {
        assert_eq!(add(&[5.0, 3.0]).unwrap(), 8.0);
        assert_eq!(add(&[-2.0, 3.0]).unwrap(), 1.0);
        assert_eq!(add(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 10.0);
    }

    #[test]
    fn subtract_folds_left() {
        assert_eq!(subtract(&[5.0, 3.0]).unwrap(), 2.0);
        assert_eq!(subtract(&[3.0, 5.0]).unwrap(), -2.0);
        assert_eq!(subtract(&[10.0, 3.0, 2.0]).unwrap(), 5.0);
    }

    #[test]
    fn multiply_folds_left() {
        assert_eq!(multiply(&[5.0, 3.0]).unwrap(), 15.0);
        assert_eq!(multiply(&[0.0, 5.0]).unwrap(), 0.0);
        assert_eq!(multiply(&[2.0, 3.0, 4.0]).unwrap(), 24.0);
    }

    #[test]
    fn divide_folds_left() {
        assert_eq!(divide(&[6.0, 3.0]).unwrap(), 2.0);
        assert_eq!(divide(&[5.0, 2.0]).unwrap(), 2.5);
        assert_eq!(divide(&[0.0, 5.0]).unwrap(), 0.0);
        assert_eq!(divide(&[100.0, 5.0, 2.0]).unwrap(), 10.0);
    }

    #[test]
    fn divide_by_zero_fails() {
        assert_eq!(divide(&[1.0, 0.0]), Err(OperandError::DivisionByZero));
        assert_eq!(divide(&[1.0, 2.0, -0.0]), Err(OperandError::DivisionByZero));
    }

    #[test]
    fn power_raises_base() {
        assert_eq!(power(&[2.0, 10.0]).unwrap(), 1024.0);
        assert!((power(&[9.0, 0.5]).unwrap() - 3.0).abs() < 1e-12);
        assert_eq!(power(&[0.0, 0.0]).unwrap(), 1.0);
        assert_eq!(power(&[0.0, -1.0]), Err(OperandError::DivisionByZero));
    }

    #[test]
    fn root_handles_signs() {
        assert!((root(&[9.0, 2.0]).unwrap() - 3.0).abs() < 1e-12);
        assert!((root(&[-27.0, 3.0]).unwrap() + 3.0).abs() < 1e-12);
        assert!(matches!(
            root(&[-4.0, 2.0]),
            Err(OperandError::Undefined(_))
        ));
        assert!(matches!(root(&[8.0, 0.0]), Err(OperandError::Undefined(_))));
    }

    #[test]
    fn square_and_cube_roots_are_exact() {
        assert_eq!(root(&[16.0, 2.0]).unwrap(), 4.0);
        assert_eq!(root(&[27.0, 3.0]).unwrap(), 3.0);
        assert_eq!(root(&[-8.0, 3.0]).unwrap(), -2.0);
    }

    #[test]
    fn pair_rejects_other_counts() {
        assert_eq!(
            power(&[1.0, 2.0, 3.0]),
            Err(OperandError::WrongCount {
                expected: Arity::Exactly(2),
                got: 3
            })
        );
    }
}
