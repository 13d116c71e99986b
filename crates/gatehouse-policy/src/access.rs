//! Access rules: the INI-like allow-list file.
//!
//! ```text
//! [alice]
//! example=hello,goodbye
//! production=deploy
//! ```
//!
//! Parsing is lenient. Blank lines, `#`/`;` comments, lines without `=`,
//! and `key=value` lines before the first section are skipped. Section
//! names are trimmed of whitespace and brackets; action lists are split on
//! commas and each element trimmed. Repeating a section or a bundle key
//! adds to the earlier grant.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use gatehouse_contracts::{access::AccessRule, error::GateResult};
use gatehouse_core::traits::AccessPolicy;

use crate::store::read_or_create;

/// Every grant in an access file, keyed by user, in declaration order per user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessConfig {
    users: HashMap<String, Vec<AccessRule>>,
}

impl AccessConfig {
    /// Parse the text of an access file. Never fails.
    pub fn parse(contents: &str) -> Self {
        let mut config = AccessConfig::default();
        let mut current_user: Option<String> = None;

        for (index, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') {
                let name = line.trim_matches(|c: char| c == '[' || c == ']').trim();
                current_user = (!name.is_empty()).then(|| name.to_string());
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                trace!(line = index + 1, "skipping line without '='");
                continue;
            };
            let Some(user) = current_user.as_deref() else {
                trace!(line = index + 1, "skipping grant outside any user section");
                continue;
            };

            let bundle = key.trim();
            if bundle.is_empty() {
                continue;
            }
            config.grant(user, bundle, value.split(','));
        }

        config
    }

    /// Read and parse the access file at `path`.
    ///
    /// A missing or unreadable file yields an empty config.
    pub fn load(path: &Path) -> Self {
        let config = Self::parse(&read_or_create(path));
        debug!(path = %path.display(), users = config.users.len(), "access rules loaded");
        config
    }

    /// Grant `actions` in `bundle` to `user`. Blank action names are ignored;
    /// a grant with no actions is not recorded.
    pub fn grant<'a>(
        &mut self,
        user: &str,
        bundle: &str,
        actions: impl IntoIterator<Item = &'a str>,
    ) {
        let actions: Vec<&str> = actions
            .into_iter()
            .map(str::trim)
            .filter(|action| !action.is_empty())
            .collect();
        if actions.is_empty() {
            return;
        }

        let rules = self.users.entry(user.to_string()).or_default();
        let index = match rules.iter().position(|rule| rule.bundle == bundle) {
            Some(index) => index,
            None => {
                rules.push(AccessRule::new(bundle));
                rules.len() - 1
            }
        };
        for action in actions {
            rules[index].grant(action);
        }
    }

    /// The grants held by `user`, in declaration order.
    pub fn rules_for(&self, user: &str) -> &[AccessRule] {
        self.users.get(user).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Exact set membership: `user` → `bundle` → `action`.
    pub fn permits(&self, user: &str, bundle: &str, action: &str) -> bool {
        self.rules_for(user)
            .iter()
            .filter(|rule| rule.bundle == bundle)
            .any(|rule| rule.permits(action))
    }
}

impl AccessPolicy for AccessConfig {
    fn is_allowed(&self, user: &str, bundle: &str, action: &str) -> GateResult<bool> {
        Ok(self.permits(user, bundle, action))
    }

    fn grants(&self, user: &str) -> GateResult<Vec<AccessRule>> {
        Ok(self.rules_for(user).to_vec())
    }
}

/// An `AccessPolicy` that re-reads its file on every query.
///
/// Nothing is cached, so an administrator's edit applies to the very next
/// lookup. Edits are not synchronized with reads: a query racing a
/// non-atomic write may see a partial file.
#[derive(Debug, Clone)]
pub struct FileAccessPolicy {
    path: PathBuf,
}

impl FileAccessPolicy {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AccessPolicy for FileAccessPolicy {
    fn is_allowed(&self, user: &str, bundle: &str, action: &str) -> GateResult<bool> {
        AccessConfig::load(&self.path).is_allowed(user, bundle, action)
    }

    fn grants(&self, user: &str) -> GateResult<Vec<AccessRule>> {
        AccessConfig::load(&self.path).grants(user)
    }
}
