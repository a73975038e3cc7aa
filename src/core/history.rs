//! Computation history tracking.
//!
//! Every successful calculation produces one immutable `HistoryRecord`.
//! Records are kept in an append-only `History` that can be listed,
//! queried, and cleared as a whole.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Record of a single successful calculation.
///
/// Records are immutable once created: fields are private and only
/// readable through accessors.
///
/// # Example
///
/// ```rust
/// use abacus::core::HistoryRecord;
///
/// let record = HistoryRecord::new("add", vec![2.0, 3.0], 5.0);
///
/// assert_eq!(record.operation(), "add");
/// assert_eq!(record.operands(), &[2.0, 3.0]);
/// assert_eq!(record.result(), 5.0);
/// assert_eq!(record.to_string(), "add(2, 3) = 5");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    id: Uuid,
    operation: String,
    operands: Vec<f64>,
    result: f64,
    timestamp: DateTime<Utc>,
}

impl HistoryRecord {
    /// Create a record stamped with a fresh id and the current time.
    pub fn new(operation: impl Into<String>, operands: Vec<f64>, result: f64) -> Self {
        Self::at(operation, operands, result, Utc::now())
    }

    /// Create a record with an explicit timestamp.
    pub fn at(
        operation: impl Into<String>,
        operands: Vec<f64>,
        result: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            operation: operation.into(),
            operands,
            result,
            timestamp,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn operands(&self) -> &[f64] {
        &self.operands
    }

    pub fn result(&self) -> f64 {
        self.result
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operation)?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write_number(f, *operand)?;
        }
        write!(f, ") = ")?;
        write_number(f, self.result)
    }
}

// Plain notation for everyday magnitudes, exponent notation otherwise.
fn write_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    let magnitude = value.abs();
    if value != 0.0 && !(1e-6..1e16).contains(&magnitude) {
        write!(f, "{value:e}")
    } else {
        write!(f, "{value}")
    }
}

/// Ordered, append-only log of calculations.
///
/// Records keep insertion order. Individual records are never removed;
/// the whole history can only be cleared at once.
///
/// # Example
///
/// ```rust
/// use abacus::core::{History, HistoryRecord};
///
/// let mut history = History::new();
/// history.append(HistoryRecord::new("add", vec![1.0, 2.0], 3.0));
/// history.append(HistoryRecord::new("mean", vec![1.0, 2.0, 3.0], 2.0));
///
/// let operations: Vec<&str> = history.list().map(|r| r.operation()).collect();
/// assert_eq!(operations, ["add", "mean"]);
///
/// history.clear();
/// assert_eq!(history.list().count(), 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    records: Vec<HistoryRecord>,
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Rebuild a history from records already in insertion order.
    pub fn from_records(records: Vec<HistoryRecord>) -> Self {
        Self { records }
    }

    /// Append a record to the end of the history.
    pub fn append(&mut self, record: HistoryRecord) {
        debug!(id = %record.id(), operation = record.operation(), "appending history record");
        self.records.push(record);
    }

    /// Iterate over all records in insertion order.
    ///
    /// The iterator borrows the history read-only and can be cloned to
    /// walk the records again.
    pub fn list(&self) -> std::slice::Iter<'_, HistoryRecord> {
        self.records.iter()
    }

    /// Remove every record. Clearing an empty history is a no-op.
    pub fn clear(&mut self) {
        debug!(removed = self.records.len(), "clearing history");
        self.records.clear();
    }

    /// Get the most recent record.
    pub fn last(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    /// Look up a record by its id.
    pub fn get(&self, id: Uuid) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records produced by the named operation, in insertion order.
    pub fn filter_by_operation<'a>(
        &'a self,
        operation: &'a str,
    ) -> impl Iterator<Item = &'a HistoryRecord> + Clone + 'a {
        self.records.iter().filter(move |r| r.operation == operation)
    }

    /// Records whose result equals `result` exactly.
    pub fn filter_by_result(
        &self,
        result: f64,
    ) -> impl Iterator<Item = &HistoryRecord> + Clone + '_ {
        self.records.iter().filter(move |r| r.result == result)
    }

    /// The `n` most recent records, oldest first.
    pub fn recent(&self, n: usize) -> &[HistoryRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// All records as a slice.
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
