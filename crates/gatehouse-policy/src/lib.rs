//! # gatehouse-policy
//!
//! The config store behind the gatehouse dispatcher: allow-list access rules
//! and administrator-pinned default arguments.
//!
//! ## Overview
//!
//! [`AccessConfig`] implements the
//! [`AccessPolicy`](gatehouse_core::traits::AccessPolicy) trait over a parsed
//! access file, and [`DefaultsTable`] implements
//! [`DefaultsSource`](gatehouse_core::traits::DefaultsSource) over a parsed
//! defaults file. [`FileAccessPolicy`] and [`FileDefaults`] re-read their file
//! on every query so no state outlives a lookup.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use gatehouse_policy::{FileAccessPolicy, FileDefaults};
//!
//! let policy = FileAccessPolicy::new("/etc/gatehouse/access.conf");
//! let defaults = FileDefaults::new("/etc/gatehouse/defaults.conf");
//! // Pass both to `gatehouse_core::Dispatcher::new(...)`.
//! ```
//!
//! ## Matching
//!
//! Access checks are exact, case-sensitive set membership. There are no
//! wildcards and no deny rules; anything not granted is denied.

pub mod access;
pub mod defaults;
pub mod store;

pub use access::{AccessConfig, FileAccessPolicy};
pub use defaults::{DefaultsTable, FileDefaults};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use gatehouse_core::traits::{AccessPolicy, DefaultsSource};

    use crate::{AccessConfig, DefaultsTable, FileAccessPolicy, FileDefaults};

    // ── 1. allow-list basics ──────────────────────────────────────────────────

    /// The canonical single-grant file.
    #[test]
    fn test_single_grant() {
        let config = AccessConfig::parse("[alice]\nexample=hello\n");

        assert!(config.permits("alice", "example", "hello"));
        assert!(!config.permits("alice", "example", "goodbye"));
        assert!(!config.permits("bob", "example", "hello"));
        assert!(!config.permits("alice", "other", "hello"));
    }

    /// An empty file denies everything.
    #[test]
    fn test_deny_by_default() {
        let config = AccessConfig::parse("");
        assert!(!config.is_allowed("alice", "example", "hello").unwrap());
        assert!(config.grants("alice").unwrap().is_empty());
    }

    // ── 2. lenient parsing ────────────────────────────────────────────────────

    #[test]
    fn test_whitespace_is_trimmed() {
        let config = AccessConfig::parse(
            "  [ alice ]  \n  example =  hello , goodbye ,, \n\n[bob]\nweb=deploy\n",
        );

        assert!(config.permits("alice", "example", "hello"));
        assert!(config.permits("alice", "example", "goodbye"));
        assert!(config.permits("alice", "example", " goodbye "));
        assert!(config.permits("bob", "web", "deploy"));
        assert!(!config.permits("alice", "web", "deploy"));
        assert_eq!(config.rules_for("alice")[0].actions, vec!["hello", "goodbye"]);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let config = AccessConfig::parse(
            "orphan=hello\n\
             [alice]\n\
             # example=secret\n\
             ; example=also-secret\n\
             this line has no equals sign\n\
             =hello\n\
             empty=\n\
             example=hello\n",
        );

        assert!(!config.permits("", "orphan", "hello"));
        assert!(!config.permits("alice", "orphan", "hello"));
        assert!(!config.permits("alice", "example", "secret"));
        assert!(!config.permits("alice", "example", "also-secret"));
        assert!(config.permits("alice", "example", "hello"));

        let bundles: Vec<&str> = config
            .rules_for("alice")
            .iter()
            .map(|rule| rule.bundle.as_str())
            .collect();
        assert_eq!(bundles, vec!["example"], "grants with no actions are not recorded");
    }

    #[test]
    fn test_matching_is_exact() {
        let config = AccessConfig::parse("[alice]\nexample=hello\n");
        assert!(!config.permits("Alice", "example", "hello"));
        assert!(!config.permits("alice", "Example", "hello"));
        assert!(!config.permits("alice", "example", "hell"));
        assert!(!config.permits("alice", "example", "*"));
    }

    #[test]
    fn test_repeated_keys_and_sections_accumulate() {
        let config = AccessConfig::parse(
            "[alice]\nexample=hello\nweb=deploy\n[bob]\nexample=hello\n[alice]\nexample=goodbye\n",
        );

        assert!(config.permits("alice", "example", "hello"));
        assert!(config.permits("alice", "example", "goodbye"));

        let rules = config.rules_for("alice");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].bundle, "example");
        assert_eq!(rules[0].actions, vec!["hello", "goodbye"]);
        assert_eq!(rules[1].bundle, "web");
    }

    #[test]
    fn test_grants_keep_declaration_order() {
        let config = AccessConfig::parse("[alice]\nzeta=a\nalpha=b\nmid=c\n");
        let bundles: Vec<String> = config
            .grants("alice")
            .unwrap()
            .into_iter()
            .map(|rule| rule.bundle)
            .collect();
        assert_eq!(bundles, vec!["zeta", "alpha", "mid"]);
    }

    // ── 3. no caching across reloads ──────────────────────────────────────────

    /// Adding a grant to the file allows the triple on the next query;
    /// removing it denies it again.
    #[test]
    fn test_file_policy_rereads_on_every_query() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("access.conf");
        fs::write(&path, "[alice]\nexample=goodbye\n").unwrap();

        let policy = FileAccessPolicy::new(&path);
        assert!(!policy.is_allowed("alice", "example", "hello").unwrap());

        fs::write(&path, "[alice]\nexample=goodbye,hello\n").unwrap();
        assert!(policy.is_allowed("alice", "example", "hello").unwrap());

        fs::write(&path, "[alice]\nexample=goodbye\n").unwrap();
        assert!(!policy.is_allowed("alice", "example", "hello").unwrap());
    }

    /// A missing access file is not an error; it is created and denies all.
    #[test]
    fn test_missing_access_file_denies_and_is_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("access.conf");

        let policy = FileAccessPolicy::new(&path);
        assert!(!policy.is_allowed("alice", "example", "hello").unwrap());
        assert!(policy.grants("alice").unwrap().is_empty());
        assert!(path.exists());
    }

    // ── 4. defaults ───────────────────────────────────────────────────────────

    #[test]
    fn test_defaults_lookup() {
        let table = DefaultsTable::parse("example/hello --name=John\n");
        assert_eq!(table.get("example", "hello"), "--name=John");
        assert_eq!(table.get("example", "missing"), "");
        assert_eq!(table.get("other", "hello"), "");
    }

    #[test]
    fn test_defaults_first_match_wins() {
        let table = DefaultsTable::parse(
            "example/hello --name=John\nexample/hello --name=Jane\n",
        );
        assert_eq!(table.get("example", "hello"), "--name=John");
    }

    #[test]
    fn test_defaults_require_the_separating_space() {
        let table = DefaultsTable::parse("example/bare\nexample/spaced \n");
        assert_eq!(table.defaults_for("example", "bare").unwrap(), "");
        assert_eq!(table.defaults_for("example", "spaced").unwrap(), "");

        // Neither line is confused with a longer key sharing its prefix.
        let table = DefaultsTable::parse("example/hello-world --x=1\n");
        assert_eq!(table.get("example", "hello"), "");
        assert_eq!(table.get("example", "hello-world"), "--x=1");
    }

    #[test]
    fn test_defaults_keep_the_raw_remainder() {
        let table = DefaultsTable::parse("web/deploy --env=production   --force\n");
        assert_eq!(table.get("web", "deploy"), "--env=production   --force");
    }

    #[test]
    fn test_defaults_are_keyed_by_requested_bundle() {
        let table = DefaultsTable::parse("production/deploy --env=production\n");
        assert_eq!(table.get("production", "deploy"), "--env=production");
        assert_eq!(table.get("web", "deploy"), "");
    }

    #[test]
    fn test_file_defaults_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let defaults = FileDefaults::new(dir.path().join("defaults.conf"));
        assert_eq!(defaults.defaults_for("example", "hello").unwrap(), "");
    }

    #[test]
    fn test_file_defaults_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("defaults.conf");
        fs::write(&path, "# pinned\nexample/hello --name=John\n").unwrap();

        let defaults = FileDefaults::new(&path);
        assert_eq!(defaults.defaults_for("example", "hello").unwrap(), "--name=John");
    }
}
