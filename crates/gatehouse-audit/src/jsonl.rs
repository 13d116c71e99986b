//! JSON-lines file implementation of `AuditWriter`.
//!
//! Each record is serialized to one line and appended with a single
//! `write` on a file opened in append mode, so concurrent invocations
//! interleave whole lines. There is no locking and no rotation.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use gatehouse_contracts::{
    error::{GateError, GateResult},
    execution::DispatchRecord,
};
use gatehouse_core::traits::AuditWriter;

/// Appends one JSON object per dispatch record to a file.
#[derive(Debug, Clone)]
pub struct JsonLinesAuditWriter {
    path: PathBuf,
}

impl JsonLinesAuditWriter {
    /// The file is created on first write if it does not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditWriter for JsonLinesAuditWriter {
    fn write(&self, record: &DispatchRecord) -> GateResult<()> {
        let fail = |reason: String| GateError::AuditWriteFailed {
            reason: format!("{}: {}", self.path.display(), reason),
        };

        let mut line = serde_json::to_string(record).map_err(|e| fail(e.to_string()))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| fail(e.to_string()))?;
        file.write_all(line.as_bytes())
            .map_err(|e| fail(e.to_string()))?;

        debug!(path = %self.path.display(), "dispatch record appended");
        Ok(())
    }
}
