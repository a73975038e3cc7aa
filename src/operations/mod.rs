//! The fixed registry of arithmetic and statistical operations.
//!
//! Each operation is a pure function over a slice of operands. The
//! registry owns the complete set and is built once at startup; nothing
//! can be registered afterwards.
//!
//! # Example
//!
//! ```rust
//! use abacus::operations::OperationRegistry;
//!
//! let registry = OperationRegistry::standard();
//!
//! assert_eq!(registry.evaluate("add", &[2.0, 3.0]).unwrap(), 5.0);
//! assert_eq!(registry.evaluate("mean", &[1.0, 2.0, 3.0]).unwrap(), 2.0);
//! assert!(registry.evaluate("divide", &[1.0, 0.0]).is_err());
//! assert!(registry.evaluate("modulo", &[5.0, 2.0]).is_err());
//! ```

mod arithmetic;
mod statistics;

use crate::error::{CalcError, OperandError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::debug;

/// How many operands an operation takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    /// Exactly this many operands.
    Exactly(usize),
    /// This many operands or more.
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Signature shared by every operation body.
pub type OperationFn = fn(&[f64]) -> Result<f64, OperandError>;

/// A named, pure computation over ordered operands.
#[derive(Clone, Copy)]
pub struct Operation {
    name: &'static str,
    arity: Arity,
    summary: &'static str,
    func: OperationFn,
}

impl Operation {
    pub const fn new(
        name: &'static str,
        arity: Arity,
        summary: &'static str,
        func: OperationFn,
    ) -> Self {
        Self {
            name,
            arity,
            summary,
            func,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn summary(&self) -> &'static str {
        self.summary
    }

    /// Apply the operation, checking operand count and result finiteness.
    pub fn apply(&self, operands: &[f64]) -> Result<f64, OperandError> {
        if !self.arity.accepts(operands.len()) {
            return Err(OperandError::WrongCount {
                expected: self.arity,
                got: operands.len(),
            });
        }
        if operands.iter().any(|v| !v.is_finite()) {
            let bad = operands
                .iter()
                .filter(|v| !v.is_finite())
                .map(|v| v.to_string())
                .collect();
            return Err(OperandError::NotANumber(bad));
        }

        let result = (self.func)(operands)?;
        if result.is_finite() {
            Ok(round_significant(result))
        } else {
            Err(OperandError::NonFinite)
        }
    }
}

/// Decimal digits every `f64` result is rounded to.
pub const SIGNIFICANT_DIGITS: usize = 15;

/// Round `value` to [`SIGNIFICANT_DIGITS`] significant decimal digits.
///
/// Binary representation error lives past the 15th digit, so this turns
/// `0.1 + 0.2` back into `0.3`. Negative zero becomes zero.
pub fn round_significant(value: f64) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value)
        .parse()
        .unwrap_or(value)
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

const STANDARD_OPERATIONS: [Operation; 10] = [
    Operation::new(
        "add",
        Arity::AtLeast(2),
        "sum of all operands",
        arithmetic::add,
    ),
    Operation::new(
        "subtract",
        Arity::AtLeast(2),
        "first operand minus the rest",
        arithmetic::subtract,
    ),
    Operation::new(
        "multiply",
        Arity::AtLeast(2),
        "product of all operands",
        arithmetic::multiply,
    ),
    Operation::new(
        "divide",
        Arity::AtLeast(2),
        "first operand divided by the rest",
        arithmetic::divide,
    ),
    Operation::new(
        "power",
        Arity::Exactly(2),
        "base raised to an exponent",
        arithmetic::power,
    ),
    Operation::new(
        "root",
        Arity::Exactly(2),
        "n-th root of a value: root <value> <n>",
        arithmetic::root,
    ),
    Operation::new(
        "mean",
        Arity::AtLeast(1),
        "arithmetic mean",
        statistics::mean,
    ),
    Operation::new(
        "median",
        Arity::AtLeast(1),
        "middle value",
        statistics::median,
    ),
    Operation::new(
        "variance",
        Arity::AtLeast(2),
        "sample variance",
        statistics::variance,
    ),
    Operation::new(
        "stdev",
        Arity::AtLeast(2),
        "sample standard deviation",
        statistics::stdev,
    ),
];

/// The fixed set of operations, keyed by name.
#[derive(Debug, Clone)]
pub struct OperationRegistry {
    operations: BTreeMap<&'static str, Operation>,
}

impl OperationRegistry {
    /// Build the registry holding every supported operation.
    pub fn standard() -> Self {
        let operations = STANDARD_OPERATIONS
            .iter()
            .map(|op| (op.name(), *op))
            .collect();
        Self { operations }
    }

    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Operation names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.operations.keys().copied()
    }

    /// Operations in alphabetical order of name.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> + '_ {
        self.operations.values()
    }

    /// Evaluate the named operation over already-parsed operands.
    pub fn evaluate(&self, name: &str, operands: &[f64]) -> Result<f64, CalcError> {
        let operation = self
            .get(name)
            .ok_or_else(|| CalcError::UnknownOperation {
                name: name.to_string(),
            })?;

        debug!(operation = name, ?operands, "evaluating");
        operation
            .apply(operands)
            .map_err(|reason| CalcError::invalid(name, reason))
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn parse_operand(token: &str) -> Validation<f64, NonEmptyVec<String>> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Validation::success(value),
        _ => Validation::fail(token.to_string()),
    }
}

/// Parse operand tokens into numbers.
///
/// Every token is checked; on failure the error lists all tokens that are
/// not finite numbers, not just the first one.
pub fn parse_operands<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<f64>, OperandError> {
    let checks: Vec<Validation<f64, NonEmptyVec<String>>> =
        tokens.iter().map(|t| parse_operand(t.as_ref())).collect();

    match Validation::all_vec(checks) {
        Validation::Success(values) => Ok(values),
        Validation::Failure(bad) => Err(OperandError::NotANumber(bad.iter().cloned().collect())),
    }
}
