//! Wire shapes of the `study-record` table.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use studylog_core::record::{RecordId, RemoteRecord};

/// Primary key as PostgREST encodes it: text/uuid columns come back as
/// strings, serial columns as numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Text(String),
    Number(i64),
}

impl From<RowId> for RecordId {
    fn from(id: RowId) -> Self {
        match id {
            RowId::Text(text) => RecordId::new(text),
            RowId::Number(number) => RecordId::new(number.to_string()),
        }
    }
}

/// A row of the table as returned by `select=*`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordRow {
    pub id: RowId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub time: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<RecordRow> for RemoteRecord {
    fn from(row: RecordRow) -> Self {
        RemoteRecord {
            id: row.id.into(),
            title: row.title.unwrap_or_default(),
            duration: row.time,
            created_at: row.created_at.as_deref().and_then(parse_timestamp),
        }
    }
}

/// Body of insert and update requests.
#[derive(Debug, Clone, Serialize)]
pub struct RecordPayload<'a> {
    pub title: &'a str,
    pub time: f64,
}

/// Accepts both `timestamptz` and plain `timestamp` renderings.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => Some(naive.and_utc()),
        Err(e) => {
            tracing::debug!("[RecordRow] unparseable created_at {:?}: {}", raw, e);
            None
        }
    }
}
