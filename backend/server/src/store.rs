//! # Storage
//!
//! Durable home of the response log.
//!
//! ## Requirements
//!
//! - Survive restarts, nothing else
//! - Expected volume is a handful of records per deployment
//! - Human-readable so the log can be inspected with `cat`
//!
//! ## Implementation
//!
//! - One pretty-printed JSON array on disk, see [`records`] for the layout
//! - Whole-document rewrite on every mutation, no incremental appends
//! - Rewrites go through a sibling `.tmp` file and a rename
//! - Concurrent external writers to the same file are not supported
use std::path::{Path, PathBuf};

use records::{RecordsError, ResponseRecord, read_records, write_records};

/// Storage handle owned by the [`Recorder`](crate::recorder::Recorder).
pub trait RecordStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<ResponseRecord>>, RecordsError>;

    fn persist(&self, records: &[ResponseRecord]) -> Result<(), RecordsError>;

    fn describe(&self) -> String;
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<ResponseRecord>>, RecordsError> {
        read_records(&self.path)
    }

    fn persist(&self, records: &[ResponseRecord]) -> Result<(), RecordsError> {
        write_records(&self.path, records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
