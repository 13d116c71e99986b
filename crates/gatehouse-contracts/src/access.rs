//! Access grant types.
//!
//! An `AccessRule` is one `bundle=action,action` line under a user section.
//! The model is allow-list only: there is no deny rule, and anything not
//! granted is refused.

use serde::{Deserialize, Serialize};

/// The actions one user may run within one bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRule {
    /// The bundle name exactly as it appears in the access file. Virtual
    /// bundles are granted under their own name, not their target's.
    pub bundle: String,
    /// Granted action names, trimmed, in first-declared order, no duplicates.
    pub actions: Vec<String>,
}

impl AccessRule {
    pub fn new(bundle: impl Into<String>) -> Self {
        Self {
            bundle: bundle.into(),
            actions: Vec::new(),
        }
    }

    /// Add an action to the grant. Duplicates are ignored.
    pub fn grant(&mut self, action: impl Into<String>) {
        let action = action.into();
        if !self.actions.contains(&action) {
            self.actions.push(action);
        }
    }

    /// Return true if `action` (trimmed) is granted. Exact, case-sensitive.
    pub fn permits(&self, action: &str) -> bool {
        let action = action.trim();
        self.actions.iter().any(|granted| granted == action)
    }
}
