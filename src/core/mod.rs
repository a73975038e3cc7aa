//! Core calculator types.
//!
//! This module contains the pure pieces the session is built from:
//! - Lifecycle states via the `State` trait
//! - Guard predicates over those states
//! - The append-only computation history

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{History, HistoryRecord};
pub use state::State;
