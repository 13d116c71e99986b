//! In-memory implementation of `AuditWriter`.
//!
//! Keeps every record in a `Vec` behind a `Mutex`. Used by tests and by
//! callers that want to inspect decisions after the fact.

use std::sync::{Arc, Mutex};

use gatehouse_contracts::{
    error::{GateError, GateResult},
    execution::DispatchRecord,
};
use gatehouse_core::traits::AuditWriter;

/// An append-only, in-memory audit writer.
///
/// Clones share the same underlying record list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuditWriter {
    records: Arc<Mutex<Vec<DispatchRecord>>>,
}

impl InMemoryAuditWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of every record written so far, in append order.
    pub fn records(&self) -> Vec<DispatchRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl AuditWriter for InMemoryAuditWriter {
    fn write(&self, record: &DispatchRecord) -> GateResult<()> {
        let mut records = self.records.lock().map_err(|e| GateError::AuditWriteFailed {
            reason: format!("audit state lock poisoned: {}", e),
        })?;
        records.push(record.clone());
        Ok(())
    }
}
