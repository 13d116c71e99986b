//! Trust-boundary traits for the dispatch pipeline.
//!
//! - `AccessPolicy`   — trusted gate (consulted before anything touches disk)
//! - `DefaultsSource` — administrator-pinned arguments per bundle/action
//! - `TaskRunner`     — untrusted work (an operator-supplied script)
//! - `AuditWriter`    — trusted sink (one record per dispatch decision)
//!
//! The dispatcher wires them together in order. `TaskRunner::run` is never
//! called unless `AccessPolicy::is_allowed` returned true and the script
//! resolved to an executable file.

use gatehouse_contracts::{
    access::AccessRule,
    error::GateResult,
    execution::{DispatchRecord, TaskInvocation},
};

/// The access evaluator: allow-list membership over explicit grants.
///
/// Implementations backed by files must read them at call time so that an
/// administrator's edit takes effect on the next invocation.
pub trait AccessPolicy: Send + Sync {
    /// Return true only if `user` holds an explicit grant for `action`
    /// within `bundle`. Unknown user, unknown bundle, and unknown action
    /// are all simply `false`.
    fn is_allowed(&self, user: &str, bundle: &str, action: &str) -> GateResult<bool>;

    /// Every grant held by `user`, in declaration order.
    fn grants(&self, user: &str) -> GateResult<Vec<AccessRule>>;
}

/// Source of administrator-fixed default arguments.
pub trait DefaultsSource: Send + Sync {
    /// The raw, whitespace-delimited default argument string for the exact
    /// `bundle/action` pair, or an empty string when none is configured.
    fn defaults_for(&self, bundle: &str, action: &str) -> GateResult<String>;
}

/// Starts a task script and waits for it.
pub trait TaskRunner: Send + Sync {
    /// Run `task` to completion and return its exit status.
    ///
    /// A child killed by a signal reports `128 + signal`. An error is
    /// returned only when the process could not be started at all.
    fn run(&self, task: &TaskInvocation) -> GateResult<i32>;
}

/// Append-only sink for dispatch decisions.
pub trait AuditWriter: Send + Sync {
    /// Persist one record. Records are never modified once written.
    fn write(&self, record: &DispatchRecord) -> GateResult<()>;
}
