//! Error types for calculations, command parsing, and startup.

use crate::export::ExportError;
use crate::operations::Arity;
use std::path::PathBuf;
use thiserror::Error;

/// Why a set of operands was rejected by an operation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OperandError {
    #[error("expected {expected} operand(s), got {got}")]
    WrongCount { expected: Arity, got: usize },

    /// Every token that failed to parse, in input order.
    #[error("not a number: {}", .0.join(", "))]
    NotANumber(Vec<String>),

    #[error("division by zero")]
    DivisionByZero,

    #[error("{0}")]
    Undefined(String),

    #[error("result is not a finite number")]
    NonFinite,
}

/// Malformed command line.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("missing argument <{argument}>. Usage: {usage}")]
    MissingArgument {
        argument: &'static str,
        usage: &'static str,
    },

    #[error("unexpected argument \"{argument}\". Usage: {usage}")]
    UnexpectedArgument {
        argument: String,
        usage: &'static str,
    },

    #[error("unknown export format \"{0}\" (expected json or bin)")]
    UnknownFormat(String),
}

/// Recoverable errors reported inline by the session.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("unknown operation \"{name}\"")]
    UnknownOperation { name: String },

    #[error("invalid operands for {operation}: {reason}")]
    InvalidOperands {
        operation: String,
        reason: OperandError,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl CalcError {
    pub(crate) fn invalid(operation: &str, reason: OperandError) -> Self {
        Self::InvalidOperands {
            operation: operation.to_string(),
            reason,
        }
    }
}

/// Unrecoverable errors raised while the process starts.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to create log directory {}: {source}", .dir.display())]
    LogDirectory {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open log file in {}: {source}", .dir.display())]
    LogSink {
        dir: PathBuf,
        #[source]
        source: tracing_appender::rolling::InitError,
    },

    #[error("failed to install logging subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),

    #[error("failed to initialize line editor: {0}")]
    Editor(#[from] rustyline::error::ReadlineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_count_mentions_arity() {
        let err = OperandError::WrongCount {
            expected: Arity::Exactly(2),
            got: 3,
        };
        assert_eq!(err.to_string(), "expected exactly 2 operand(s), got 3");
    }

    #[test]
    fn not_a_number_lists_every_token() {
        let err = OperandError::NotANumber(vec!["x".into(), "1..2".into()]);
        assert_eq!(err.to_string(), "not a number: x, 1..2");
    }

    #[test]
    fn invalid_operands_names_operation() {
        let err = CalcError::invalid("divide", OperandError::DivisionByZero);
        assert_eq!(
            err.to_string(),
            "invalid operands for divide: division by zero"
        );
    }

    #[test]
    fn parse_error_is_transparent() {
        let err: CalcError = ParseError::UnknownFormat("xml".into()).into();
        assert_eq!(
            err.to_string(),
            "unknown export format \"xml\" (expected json or bin)"
        );
    }
}
