//! # gatehouse-contracts
//!
//! Shared types, error taxonomy, and exit codes for the gatehouse dispatcher.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod access;
pub mod error;
pub mod execution;
pub mod request;

#[cfg(test)]
mod tests {
    use super::*;
    use access::AccessRule;
    use error::{exit_code, GateError};
    use execution::{DispatchOutcome, DispatchRecord, Verdict};
    use request::{Invocation, InvocationId};

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ── Invocation parsing ───────────────────────────────────────────────────

    #[test]
    fn ls_token_is_a_list_request() {
        let invocation = Invocation::from_tokens(tokens(&["alice", "ls"])).unwrap();
        assert_eq!(invocation, Invocation::List { user: "alice".to_string() });
    }

    #[test]
    fn ls_ignores_trailing_tokens() {
        let invocation = Invocation::from_tokens(tokens(&["alice", "ls", "extra"])).unwrap();
        assert!(matches!(invocation, Invocation::List { .. }));
    }

    #[test]
    fn bundle_action_and_args_become_a_dispatch() {
        let invocation = Invocation::from_tokens(tokens(&[
            "alice",
            "example",
            "hello",
            "--name=Alice",
            "-v",
        ]))
        .unwrap();

        match invocation {
            Invocation::Dispatch(request) => {
                assert_eq!(request.user, "alice");
                assert_eq!(request.bundle, "example");
                assert_eq!(request.action, "hello");
                assert_eq!(request.args, tokens(&["--name=Alice", "-v"]));
            }
            other => panic!("expected Dispatch, got {:?}", other),
        }
    }

    #[test]
    fn missing_action_is_a_usage_error() {
        let err = Invocation::from_tokens(tokens(&["alice", "example"])).unwrap_err();
        assert!(matches!(err, GateError::Usage { .. }));
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn user_alone_is_a_usage_error() {
        let err = Invocation::from_tokens(tokens(&["alice"])).unwrap_err();
        assert!(matches!(err, GateError::Usage { .. }));
    }

    #[test]
    fn no_tokens_is_a_usage_error() {
        let err = Invocation::from_tokens(vec![]).unwrap_err();
        assert!(matches!(err, GateError::Usage { .. }));
    }

    /// Option-looking tokens after the user are plain data, never flags.
    #[test]
    fn option_like_tokens_after_the_user_stay_in_the_request() {
        let invocation =
            Invocation::from_tokens(tokens(&["alice", "--config", "/tmp/x.toml", "ls"])).unwrap();

        match invocation {
            Invocation::Dispatch(request) => {
                assert_eq!(request.bundle, "--config");
                assert_eq!(request.action, "/tmp/x.toml");
                assert_eq!(request.args, tokens(&["ls"]));
            }
            other => panic!("expected Dispatch, got {:?}", other),
        }
    }

    // ── AccessRule ───────────────────────────────────────────────────────────

    #[test]
    fn access_rule_grant_is_idempotent_and_exact() {
        let mut rule = AccessRule::new("example");
        rule.grant("hello");
        rule.grant("hello");
        rule.grant("deploy");

        assert_eq!(rule.actions, tokens(&["hello", "deploy"]));
        assert!(rule.permits("hello"));
        assert!(rule.permits(" hello "));
        assert!(!rule.permits("Hello"));
        assert!(!rule.permits("hell"));
    }

    // ── Exit codes ───────────────────────────────────────────────────────────

    #[test]
    fn every_error_kind_has_a_distinct_exit_code() {
        let errors = [
            GateError::usage("x"),
            GateError::PermissionDenied {
                user: "u".into(),
                bundle: "b".into(),
                action: "a".into(),
            },
            GateError::NoAccess { user: "u".into() },
            GateError::ScriptUnavailable { path: "p".into(), reason: "r".into() },
            GateError::Spawn { path: "p".into(), reason: "r".into() },
            GateError::ConfigError { reason: "r".into() },
            GateError::AuditWriteFailed { reason: "r".into() },
            GateError::Output { reason: "r".into() },
        ];

        let codes: std::collections::HashSet<i32> = errors.iter().map(|e| e.exit_code()).collect();
        assert_eq!(codes.len(), errors.len());
        assert!(!codes.contains(&0));
    }

    #[test]
    fn denied_outcome_uses_permission_denied_code() {
        let outcome = DispatchOutcome::Denied { reason: "no".to_string() };
        assert_eq!(outcome.exit_code(), exit_code::PERMISSION_DENIED);
    }

    #[test]
    fn completed_outcome_propagates_child_status() {
        assert_eq!(DispatchOutcome::Completed { status: 0 }.exit_code(), 0);
        assert_eq!(DispatchOutcome::Completed { status: 3 }.exit_code(), 3);
    }

    // ── Display messages ─────────────────────────────────────────────────────

    #[test]
    fn permission_denied_names_the_triple_only() {
        let err = GateError::PermissionDenied {
            user: "bob".to_string(),
            bundle: "example".to_string(),
            action: "hello".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("bob"));
        assert!(msg.contains("example"));
        assert!(msg.contains("hello"));
    }

    #[test]
    fn script_unavailable_names_the_path() {
        let err = GateError::ScriptUnavailable {
            path: "/srv/bundles/example/hello.sh".to_string(),
            reason: "not executable".to_string(),
        };
        assert!(err.to_string().contains("/srv/bundles/example/hello.sh"));
    }

    // ── DispatchRecord serialization ─────────────────────────────────────────

    #[test]
    fn dispatch_record_omits_exit_code_when_script_did_not_run() {
        let record = DispatchRecord {
            invocation_id: InvocationId::new(),
            timestamp: chrono::Utc::now(),
            user: "bob".to_string(),
            bundle: "example".to_string(),
            action: "hello".to_string(),
            args: vec![],
            verdict: Verdict::Denied,
            exit_code: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["verdict"], "denied");
        assert!(json.get("exit_code").is_none());
    }

    #[test]
    fn invocation_ids_are_unique() {
        let ids: std::collections::HashSet<String> =
            (0..50).map(|_| InvocationId::new().to_string()).collect();
        assert_eq!(ids.len(), 50);
    }
}
