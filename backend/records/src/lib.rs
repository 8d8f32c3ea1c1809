//! # Records
//!
//! Shared data definitions between the recorder backend, the page controller
//! and the tester.
//!
//! ## Durable Layout
//!
//! - One JSON document: a top-level array of [`ResponseRecord`], in creation order
//! - Pretty-printed with 2-space indentation
//! - Fully rewritten on every mutation, never patched in place
//!
//! ```json
//! [
//!   {
//!     "id": "1739527200123",
//!     "timestamp": "2025-02-14T10:00:00.123Z",
//!     "message": "Your Billota is ready to marry you 💍",
//!     "userAgent": "Mozilla/5.0",
//!     "ip": "127.0.0.1"
//!   }
//! ]
//! ```
use std::{
    fs,
    io::{self, ErrorKind},
    path::Path,
};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod payloads;
pub mod remote;

pub const DEFAULT_MESSAGE: &str = "Your Billota is ready to marry you 💍";
pub const UNKNOWN_USER_AGENT: &str = "unknown";

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed records document: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single affirmative submission. Immutable once created.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResponseRecord {
    pub id: String,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub message: String,
    #[serde(flatten)]
    pub client: ClientMetadata,
}

/// Opaque strings captured from the request, stored as received.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientMetadata {
    #[serde(default = "unknown_user_agent")]
    pub user_agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl Default for ClientMetadata {
    fn default() -> Self {
        Self {
            user_agent: unknown_user_agent(),
            ip: None,
        }
    }
}

fn unknown_user_agent() -> String {
    UNKNOWN_USER_AGENT.to_string()
}

/// Picks the client message, falling back to [`DEFAULT_MESSAGE`] when it is
/// missing or empty.
pub fn message_or_default(message: Option<String>) -> String {
    message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_MESSAGE.to_string())
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Reads the records document. `Ok(None)` means the file does not exist yet.
pub fn read_records(path: &Path) -> Result<Option<Vec<ResponseRecord>>, RecordsError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    Ok(Some(serde_json::from_str(&data)?))
}

/// Rewrites the whole document. The new contents land in a sibling file first
/// and are renamed over `path`, so readers never see a half-written array.
pub fn write_records(path: &Path, records: &[ResponseRecord]) -> Result<(), RecordsError> {
    let json = serde_json::to_string_pretty(records)?;

    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");

    fs::write(&staging, json)?;
    fs::rename(&staging, path)?;

    Ok(())
}

pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::format_timestamp;

    pub fn serialize<S: Serializer>(
        timestamp: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timestamp(timestamp))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;

        DateTime::parse_from_rfc3339(&raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}
