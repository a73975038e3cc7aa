//! Abacus: an interactive calculator with computation history
//!
//! A small REPL that evaluates named arithmetic and statistical
//! operations, remembers every successful calculation, and can export that
//! history as JSON or a compact binary snapshot.
//!
//! # Core Concepts
//!
//! - **Operations**: A fixed registry of named operations over `f64` operands
//! - **History**: An append-only store of successful calculations
//! - **Session**: The REPL state machine that turns lines into replies
//!
//! # Example
//!
//! ```rust
//! use abacus::{OperationRegistry, Reply, Session};
//!
//! let mut session = Session::new(OperationRegistry::standard());
//!
//! let reply = session.handle_line("mean 1 2 3");
//! assert_eq!(reply, Reply::Output("mean(1, 2, 3) = 2".to_string()));
//!
//! let reply = session.handle_line("divide 1 0");
//! assert!(reply.is_error());
//! assert_eq!(session.history().len(), 1);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod logging;
pub mod operations;
pub mod repl;

// Re-export commonly used types
pub use crate::core::{Guard, History, HistoryRecord, State};
pub use crate::error::{CalcError, OperandError, ParseError, StartupError};
pub use crate::export::{ExportError, HistorySnapshot, SnapshotFormat};
pub use crate::operations::{Arity, Operation, OperationRegistry};
pub use crate::repl::{Repl, ReplState, Reply, Session};
