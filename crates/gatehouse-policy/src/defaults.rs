//! Default-argument rules.
//!
//! One rule per line: `<bundle>/<action>`, a single space, then the
//! arguments. The separating space is required even when no arguments
//! follow. When a key repeats, the first line wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use gatehouse_contracts::error::GateResult;
use gatehouse_core::traits::DefaultsSource;

use crate::store::read_or_create;

/// Parsed default-argument rules keyed by `"bundle/action"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultsTable {
    entries: HashMap<String, String>,
}

impl DefaultsTable {
    /// Parse the text of a defaults file. Never fails.
    pub fn parse(contents: &str) -> Self {
        let mut entries = HashMap::new();

        for line in contents.lines() {
            if line.starts_with('#') {
                continue;
            }
            let Some((key, rest)) = line.split_once(' ') else {
                continue;
            };
            if key.is_empty() || !key.contains('/') {
                continue;
            }
            entries
                .entry(key.to_string())
                .or_insert_with(|| rest.to_string());
        }

        Self { entries }
    }

    /// Read and parse the defaults file at `path`.
    ///
    /// A missing or unreadable file yields an empty table.
    pub fn load(path: &Path) -> Self {
        let table = Self::parse(&read_or_create(path));
        debug!(path = %path.display(), entries = table.entries.len(), "default arguments loaded");
        table
    }

    /// The raw argument string for `bundle/action`, or `""`.
    pub fn get(&self, bundle: &str, action: &str) -> &str {
        self.entries
            .get(&format!("{bundle}/{action}"))
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl DefaultsSource for DefaultsTable {
    fn defaults_for(&self, bundle: &str, action: &str) -> GateResult<String> {
        Ok(self.get(bundle, action).to_string())
    }
}

/// A `DefaultsSource` that re-reads its file on every lookup.
#[derive(Debug, Clone)]
pub struct FileDefaults {
    path: PathBuf,
}

impl FileDefaults {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DefaultsSource for FileDefaults {
    fn defaults_for(&self, bundle: &str, action: &str) -> GateResult<String> {
        DefaultsTable::load(&self.path).defaults_for(bundle, action)
    }
}
