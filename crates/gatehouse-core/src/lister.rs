//! Listing of a user's grants.

use std::fmt;

use tracing::debug;

use gatehouse_contracts::{
    access::AccessRule,
    error::{GateError, GateResult},
};

use crate::traits::AccessPolicy;

/// The grants one user holds, in declaration order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub user: String,
    pub rules: Vec<AccessRule>,
}

/// Collect every grant held by `user`.
///
/// A user with no grants is an error, so automation can tell "no access"
/// apart from an empty but successful report.
pub fn list(policy: &dyn AccessPolicy, user: &str) -> GateResult<Listing> {
    let rules = policy.grants(user)?;
    debug!(user = %user, bundles = rules.len(), "collected grants for listing");

    if rules.is_empty() {
        return Err(GateError::NoAccess {
            user: user.to_string(),
        });
    }

    Ok(Listing {
        user: user.to_string(),
        rules,
    })
}

impl fmt::Display for Listing {
    /// One `bundle : action, action` line per grant, bundle names padded to
    /// a common width.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rules
            .iter()
            .map(|rule| rule.bundle.chars().count())
            .max()
            .unwrap_or(0);

        for rule in &self.rules {
            writeln!(
                f,
                "{:<width$} : {}",
                rule.bundle,
                rule.actions.join(", "),
                width = width
            )?;
        }
        Ok(())
    }
}
