//! Error taxonomy for the gatehouse dispatcher.
//!
//! Every fallible operation returns `GateResult<T>`. Each variant maps to one
//! stable process exit code so automation on the far side of the SSH session
//! can tell the failure kinds apart.

use thiserror::Error;

/// Exit codes used by the dispatcher for its own failures.
///
/// Values follow `sysexits.h` where a matching constant exists. A child
/// script's exit code is propagated untouched and is not listed here.
pub mod exit_code {
    /// Malformed invocation or a token outside the permitted character class.
    pub const USAGE: i32 = 1;
    /// `ls` found no grants for the user (EX_NOUSER).
    pub const NO_ACCESS: i32 = 67;
    /// The resolved script is missing or not executable (EX_UNAVAILABLE).
    pub const SCRIPT_UNAVAILABLE: i32 = 69;
    /// The OS refused to start the script (EX_OSERR).
    pub const SPAWN: i32 = 71;
    /// The audit trail could not be appended to (EX_CANTCREAT).
    pub const AUDIT: i32 = 73;
    /// The `ls` report could not be written to stdout (EX_IOERR).
    pub const OUTPUT: i32 = 74;
    /// The user holds no grant for the requested bundle/action (EX_NOPERM).
    pub const PERMISSION_DENIED: i32 = 77;
    /// The dispatcher's own settings file is malformed (EX_CONFIG).
    pub const CONFIG: i32 = 78;
    /// Base added to a signal number when the child was killed by a signal.
    pub const SIGNAL_BASE: i32 = 128;
}

/// The unified error type for the gatehouse crates.
#[derive(Debug, Error)]
pub enum GateError {
    /// The invocation is malformed or a token failed input validation.
    #[error("usage error: {reason}")]
    Usage { reason: String },

    /// The user holds no grant for the requested triple.
    ///
    /// The message names the triple only. Whether the bundle or the action
    /// was unknown is deliberately not reported.
    #[error("user '{user}' is not allowed to run '{action}' in bundle '{bundle}'")]
    PermissionDenied {
        user: String,
        bundle: String,
        action: String,
    },

    /// The user has no accessible bundles or actions at all.
    #[error("user '{user}' has no accessible bundles or actions")]
    NoAccess { user: String },

    /// The resolved script path does not exist, is not a regular file, or
    /// is not executable.
    #[error("script unavailable: {path}: {reason}")]
    ScriptUnavailable { path: String, reason: String },

    /// The script exists but the OS could not start it.
    #[error("failed to start '{path}': {reason}")]
    Spawn { path: String, reason: String },

    /// The dispatcher's own settings are missing a required value or are invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A dispatch record could not be persisted.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },

    /// The listing could not be written to stdout.
    #[error("failed to write output: {reason}")]
    Output { reason: String },
}

impl GateError {
    /// The process exit code this error maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            GateError::Usage { .. } => exit_code::USAGE,
            GateError::PermissionDenied { .. } => exit_code::PERMISSION_DENIED,
            GateError::NoAccess { .. } => exit_code::NO_ACCESS,
            GateError::ScriptUnavailable { .. } => exit_code::SCRIPT_UNAVAILABLE,
            GateError::Spawn { .. } => exit_code::SPAWN,
            GateError::ConfigError { .. } => exit_code::CONFIG,
            GateError::AuditWriteFailed { .. } => exit_code::AUDIT,
            GateError::Output { .. } => exit_code::OUTPUT,
        }
    }

    /// Shorthand for a `Usage` error.
    pub fn usage(reason: impl Into<String>) -> Self {
        GateError::Usage {
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the gatehouse crates.
pub type GateResult<T> = Result<T, GateError>;
