//! Record domain model.
//!
//! `RemoteRecord` is the shape rows have when they come back from the remote
//! store; `Record` is what the rest of the application holds in memory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A row as reported by the remote store.
///
/// The remote is allowed to leave `duration` empty; nothing past the
/// conversion into [`Record`] ever sees the `Option`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub id: RecordId,
    pub title: String,
    pub duration: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl RemoteRecord {
    pub fn new(id: impl Into<RecordId>, title: impl Into<String>, duration: Option<f64>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration,
            created_at: None,
        }
    }
}

/// One study-log entry held in memory.
///
/// `duration` is in hours and is always a finite, non-negative number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub duration: f64,
    pub created_at: Option<DateTime<Utc>>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, title: impl Into<String>, duration: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration: normalize_duration(Some(duration)),
            created_at: None,
        }
    }
}

impl From<RemoteRecord> for Record {
    fn from(row: RemoteRecord) -> Self {
        Self {
            duration: normalize_duration(row.duration),
            id: row.id,
            title: row.title,
            created_at: row.created_at,
        }
    }
}

/// Maps a remote duration onto the in-memory invariant.
///
/// Absent values become zero. So do values the store should never have
/// accepted (negative or non-finite).
pub fn normalize_duration(duration: Option<f64>) -> f64 {
    match duration {
        None => 0.0,
        Some(value) if value.is_finite() && value >= 0.0 => value,
        Some(value) => {
            tracing::warn!("[Record] discarding out-of-range duration {}", value);
            0.0
        }
    }
}
