//! Exportable snapshots of the computation history.
//!
//! A snapshot captures every record in the history together with a format
//! version, so an exported file can be checked before it is loaded again.

use crate::core::{History, HistoryRecord};
use crate::error::ParseError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

pub mod error;

pub use error::ExportError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk encoding of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Compact bincode
    Binary,
}

impl SnapshotFormat {
    /// Pick a format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("bin") => Self::Binary,
            _ => Self::Json,
        }
    }
}

impl FromStr for SnapshotFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "bin" | "binary" => Ok(Self::Binary),
            other => Err(ParseError::UnknownFormat(other.to_string())),
        }
    }
}

/// Serializable snapshot of the history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Every record, in insertion order
    pub records: Vec<HistoryRecord>,
}

impl HistorySnapshot {
    /// Capture the current contents of a history.
    pub fn capture(history: &History) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            records: history.records().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ExportError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| ExportError::DeserializationFailed(e.to_string()))?;
        snapshot.validate()
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, ExportError> {
        bincode::serialize(self).map_err(|e| ExportError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, ExportError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| ExportError::DeserializationFailed(e.to_string()))?;
        snapshot.validate()
    }

    /// Encode the snapshot in the given format.
    pub fn encode(&self, format: SnapshotFormat) -> Result<Vec<u8>, ExportError> {
        match format {
            SnapshotFormat::Json => self.to_json().map(String::into_bytes),
            SnapshotFormat::Binary => self.to_binary(),
        }
    }

    /// Decode a snapshot previously produced by [`encode`](Self::encode).
    pub fn decode(bytes: &[u8], format: SnapshotFormat) -> Result<Self, ExportError> {
        match format {
            SnapshotFormat::Json => {
                let json = std::str::from_utf8(bytes)
                    .map_err(|e| ExportError::DeserializationFailed(e.to_string()))?;
                Self::from_json(json)
            }
            SnapshotFormat::Binary => Self::from_binary(bytes),
        }
    }

    /// Write the snapshot to a file, creating parent directories.
    pub fn write_to(&self, path: &Path, format: SnapshotFormat) -> Result<(), ExportError> {
        let io_error = |source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, self.encode(format)?).map_err(io_error)?;

        info!(
            path = %path.display(),
            records = self.records.len(),
            ?format,
            "exported history snapshot"
        );
        Ok(())
    }

    /// Read and validate a snapshot from a file.
    pub fn read_from(path: &Path, format: SnapshotFormat) -> Result<Self, ExportError> {
        let bytes = fs::read(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode(&bytes, format)
    }

    /// Rebuild a history holding the snapshot's records.
    pub fn into_history(self) -> History {
        History::from_records(self.records)
    }

    fn validate(self) -> Result<Self, ExportError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(ExportError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}
