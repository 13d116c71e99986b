//! `AuditWriter` that emits each record as a structured `tracing` event.
//!
//! The default sink when no audit file is configured.

use tracing::info;

use gatehouse_contracts::{error::GateResult, execution::DispatchRecord};
use gatehouse_core::traits::AuditWriter;

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditWriter;

impl TracingAuditWriter {
    pub fn new() -> Self {
        Self
    }
}

impl AuditWriter for TracingAuditWriter {
    fn write(&self, record: &DispatchRecord) -> GateResult<()> {
        info!(
            target: "gatehouse::audit",
            invocation_id = %record.invocation_id,
            user = %record.user,
            bundle = %record.bundle,
            action = %record.action,
            args = ?record.args,
            verdict = ?record.verdict,
            exit_code = ?record.exit_code,
            "dispatch recorded"
        );
        Ok(())
    }
}
