//! The gatehouse dispatcher: the access-gated path from request to child process.
//!
//! The dispatcher enforces this order on every request:
//!
//!   Validate → CheckPermission → ResolveScript → MergeArgs → Execute
//!
//! `TaskRunner::run()` is never called unless every token passed
//! validation, the access policy granted the exact (user, bundle, action)
//! triple, and the script resolved to an executable file. Listing bypasses
//! the pipeline entirely.

use chrono::Utc;
use tracing::{debug, info, warn};

use gatehouse_contracts::{
    error::{GateError, GateResult},
    execution::{DispatchOutcome, DispatchRecord, TaskInvocation, Verdict},
    request::{DispatchRequest, InvocationId},
};

use crate::{
    lister::{self, Listing},
    merge::{merge, split_args},
    resolve::BundleLayout,
    traits::{AccessPolicy, AuditWriter, DefaultsSource, TaskRunner},
    validate::validate_request,
};

/// Environment variable carrying the validated user name.
pub const ENV_USER: &str = "GATEHOUSE_USER";
/// Environment variable carrying the bundle directory path.
pub const ENV_BUNDLE_DIR: &str = "GATEHOUSE_BUNDLE_DIR";
/// Environment variable carrying the requested bundle name.
pub const ENV_BUNDLE: &str = "GATEHOUSE_BUNDLE";
/// Environment variable carrying the action name.
pub const ENV_ACTION: &str = "GATEHOUSE_ACTION";
/// Environment variable carrying the invocation ID.
pub const ENV_INVOCATION_ID: &str = "GATEHOUSE_INVOCATION_ID";

/// Drives a single invocation.
///
/// Construct one per process. The dispatcher owns the trusted components
/// (policy, defaults, audit) and the runner, and enforces the pipeline
/// order on every call to `dispatch()`.
pub struct Dispatcher {
    policy: Box<dyn AccessPolicy>,
    defaults: Box<dyn DefaultsSource>,
    runner: Box<dyn TaskRunner>,
    audit: Box<dyn AuditWriter>,
    layout: BundleLayout,
}

impl Dispatcher {
    pub fn new(
        policy: Box<dyn AccessPolicy>,
        defaults: Box<dyn DefaultsSource>,
        runner: Box<dyn TaskRunner>,
        audit: Box<dyn AuditWriter>,
        layout: BundleLayout,
    ) -> Self {
        Self { policy, defaults, runner, audit, layout }
    }

    /// List the grants held by `user`.
    pub fn list(&self, user: &str) -> GateResult<Listing> {
        debug!(user = %user, "listing requested");
        lister::list(self.policy.as_ref(), user)
    }

    /// Run one request through the pipeline.
    ///
    /// # Pipeline
    ///
    /// 1. Validate user, bundle, action and every argument; a bad token is
    ///    `GateError::Usage` and nothing else is consulted
    /// 2. Ask the policy; no grant → audit, return `DispatchOutcome::Denied`
    /// 3. Resolve `<root>/<bundle>/<action>.<ext>`; missing or not
    ///    executable → audit, return `GateError::ScriptUnavailable`
    /// 4. Append the administrator defaults for `bundle/action`
    /// 5. Run the script with the gatehouse variables added to the inherited
    ///    environment; audit and return its exit status
    ///
    /// # Errors
    ///
    /// Usage, script-unavailable and spawn failures are errors. A denial is
    /// NOT an error, and neither is a non-zero child exit.
    pub fn dispatch(
        &self,
        invocation_id: &InvocationId,
        request: &DispatchRequest,
    ) -> GateResult<DispatchOutcome> {
        debug!(
            invocation_id = %invocation_id,
            user = %request.user,
            bundle = %request.bundle,
            action = %request.action,
            "dispatch starting"
        );

        // ── Validate ─────────────────────────────────────────────────────────
        validate_request(request)?;

        // ── Check permission ─────────────────────────────────────────────────
        let allowed = self
            .policy
            .is_allowed(&request.user, &request.bundle, &request.action)?;

        if !allowed {
            warn!(
                invocation_id = %invocation_id,
                user = %request.user,
                bundle = %request.bundle,
                action = %request.action,
                "access denied"
            );
            self.record(invocation_id, request, request.args.clone(), Verdict::Denied, None);

            let reason = GateError::PermissionDenied {
                user: request.user.clone(),
                bundle: request.bundle.clone(),
                action: request.action.clone(),
            }
            .to_string();
            return Ok(DispatchOutcome::Denied { reason });
        }

        debug!(invocation_id = %invocation_id, "access granted, resolving script");

        // ── Resolve script ───────────────────────────────────────────────────
        let resolved = match self.layout.resolve(&request.bundle, &request.action) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!(invocation_id = %invocation_id, error = %e, "script unavailable");
                self.record(invocation_id, request, request.args.clone(), Verdict::Unavailable, None);
                return Err(e);
            }
        };

        // ── Merge arguments ──────────────────────────────────────────────────
        let defaults = split_args(&self.defaults.defaults_for(&request.bundle, &request.action)?);
        let args = merge(&request.args, &defaults);
        debug!(
            invocation_id = %invocation_id,
            defaults = defaults.len(),
            args = ?args,
            "arguments merged"
        );

        // ── Execute ──────────────────────────────────────────────────────────
        let task = TaskInvocation {
            script: resolved.script,
            args,
            env: vec![
                (ENV_USER.to_string(), request.user.clone()),
                (
                    ENV_BUNDLE_DIR.to_string(),
                    resolved.bundle_dir.display().to_string(),
                ),
                (ENV_BUNDLE.to_string(), request.bundle.clone()),
                (ENV_ACTION.to_string(), request.action.clone()),
                (ENV_INVOCATION_ID.to_string(), invocation_id.to_string()),
            ],
        };

        info!(
            invocation_id = %invocation_id,
            user = %request.user,
            script = %task.script.display(),
            "executing task script"
        );

        let status = match self.runner.run(&task) {
            Ok(status) => status,
            Err(e) => {
                warn!(invocation_id = %invocation_id, error = %e, "task script could not be started");
                self.record(invocation_id, request, task.args, Verdict::Unavailable, None);
                return Err(e);
            }
        };

        self.record(invocation_id, request, task.args, Verdict::Allowed, Some(status));
        Ok(DispatchOutcome::Completed { status })
    }

    /// Write one audit record. A failed write is logged and otherwise
    /// ignored: the outcome being recorded has already happened.
    fn record(
        &self,
        invocation_id: &InvocationId,
        request: &DispatchRequest,
        args: Vec<String>,
        verdict: Verdict,
        exit_code: Option<i32>,
    ) {
        let record = DispatchRecord {
            invocation_id: invocation_id.clone(),
            timestamp: Utc::now(),
            user: request.user.clone(),
            bundle: request.bundle.clone(),
            action: request.action.clone(),
            args,
            verdict,
            exit_code,
        };

        if let Err(e) = self.audit.write(&record) {
            warn!(invocation_id = %invocation_id, error = %e, "dispatch record not written");
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
