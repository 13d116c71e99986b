//! `TaskRunner` backed by a real child process.
//!
//! The script is executed directly (no intermediate shell) with the
//! dispatcher's stdin, stdout and stderr. The dispatcher blocks until the
//! child exits; there is no timeout.

use std::process::{Command, ExitStatus};

use tracing::{debug, info};

use gatehouse_contracts::{
    error::{exit_code, GateError, GateResult},
    execution::TaskInvocation,
};

use crate::traits::TaskRunner;

/// Spawns task scripts as child processes and waits for them.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl TaskRunner for ProcessRunner {
    fn run(&self, task: &TaskInvocation) -> GateResult<i32> {
        debug!(
            script = %task.script.display(),
            args = ?task.args,
            "spawning task script"
        );

        let status = Command::new(&task.script)
            .args(&task.args)
            .envs(task.env.iter().map(|(key, value)| (key.as_str(), value.as_str())))
            .status()
            .map_err(|e| GateError::Spawn {
                path: task.script.display().to_string(),
                reason: e.to_string(),
            })?;

        let code = status_code(status);
        info!(script = %task.script.display(), status = code, "task script exited");
        Ok(code)
    }
}

/// Map a child's exit status to a process exit code.
///
/// A signal-terminated child maps to `128 + signal`, as shells report it.
pub fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return exit_code::SIGNAL_BASE + signal;
        }
    }
    exit_code::SIGNAL_BASE
}
