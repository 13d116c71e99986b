//! Bundle and script resolution.
//!
//! A bundle is `<root>/<name>`. Virtual bundles are symlinks to another
//! bundle's directory; following them is left to the OS. Any resolution
//! failure (missing entry, dangling link, link loop) surfaces as
//! `ScriptUnavailable`.

use std::path::{Path, PathBuf};

use gatehouse_contracts::error::{GateError, GateResult};

/// Where bundles live and how action scripts are named.
#[derive(Debug, Clone)]
pub struct BundleLayout {
    root: PathBuf,
    extension: String,
}

/// A script that exists and is executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedScript {
    /// `<root>/<requested bundle name>`, unresolved so virtual bundles keep
    /// their own name.
    pub bundle_dir: PathBuf,
    pub script: PathBuf,
}

impl BundleLayout {
    /// `extension` is given without the leading dot, e.g. `"sh"`.
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory for `bundle`. No filesystem access.
    pub fn bundle_dir(&self, bundle: &str) -> PathBuf {
        self.root.join(bundle)
    }

    /// The script path for `action` inside `bundle_dir`. No filesystem access.
    pub fn script_path(&self, bundle_dir: &Path, action: &str) -> PathBuf {
        bundle_dir.join(format!("{}.{}", action, self.extension))
    }

    /// Resolve `bundle`/`action` to an executable script.
    pub fn resolve(&self, bundle: &str, action: &str) -> GateResult<ResolvedScript> {
        let bundle_dir = self.bundle_dir(bundle);
        let script = self.script_path(&bundle_dir, action);
        ensure_executable_file(&script)?;
        Ok(ResolvedScript { bundle_dir, script })
    }
}

/// Fail unless `path`, after following symlinks, is an executable regular file.
pub fn ensure_executable_file(path: &Path) -> GateResult<()> {
    let unavailable = |reason: String| GateError::ScriptUnavailable {
        path: path.display().to_string(),
        reason,
    };

    let meta = std::fs::metadata(path).map_err(|e| unavailable(e.to_string()))?;
    if !meta.is_file() {
        return Err(unavailable("not a regular file".to_string()));
    }
    if !is_executable(&meta) {
        return Err(unavailable("not executable".to_string()));
    }
    Ok(())
}

#[cfg(unix)]
fn is_executable(meta: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &std::fs::Metadata) -> bool {
    true
}
