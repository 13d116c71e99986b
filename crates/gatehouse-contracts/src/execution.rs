//! Dispatch outcomes, child process descriptions, and audit records.
//!
//! `DispatchOutcome` is what the dispatcher returns to the binary.
//! `DispatchRecord` is what gets written to the audit trail, one per
//! dispatch decision.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::exit_code, request::InvocationId};

/// Everything needed to start one task script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInvocation {
    /// Absolute or root-relative path of the script to execute.
    pub script: PathBuf,
    /// Merged arguments: caller arguments followed by administrator defaults.
    pub args: Vec<String>,
    /// Variables added on top of the inherited environment.
    pub env: Vec<(String, String)>,
}

/// How a dispatch that passed validation ended.
///
/// Callers map this to the process exit code with `exit_code()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The user holds no grant for the triple. The script was never touched.
    Denied {
        /// Human-readable denial, naming only the requested triple.
        reason: String,
    },

    /// The script ran to completion. `status` is its exit code, or
    /// `128 + signal` if it was killed.
    Completed { status: i32 },
}

impl DispatchOutcome {
    /// The process exit code the dispatcher should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            DispatchOutcome::Denied { .. } => exit_code::PERMISSION_DENIED,
            DispatchOutcome::Completed { status } => *status,
        }
    }
}

/// The decision recorded for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// The grant matched and the script was started.
    Allowed,
    /// No grant matched.
    Denied,
    /// The grant matched but the script was missing or not executable.
    Unavailable,
}

/// An immutable record of one dispatch decision, written to the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecord {
    pub invocation_id: InvocationId,
    /// Wall-clock time the record was created (UTC).
    pub timestamp: DateTime<Utc>,
    pub user: String,
    /// The requested bundle name, never the symlink target.
    pub bundle: String,
    pub action: String,
    /// Merged arguments when the script ran, caller arguments otherwise.
    pub args: Vec<String>,
    pub verdict: Verdict,
    /// The child's exit status, present only when the script ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}
