//! Dispatcher settings.
//!
//! Loaded from a TOML file. A missing file means every default applies, so
//! a fresh install works with the standard paths. A malformed file is a
//! configuration error: without it the dispatcher cannot know where bundles
//! and rules live.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use gatehouse_contracts::error::{GateError, GateResult};
use gatehouse_core::validate::is_valid_token;

/// Settings file consulted when neither `--config` nor `GATEHOUSE_CONFIG` is given.
pub const DEFAULT_SETTINGS_PATH: &str = "/etc/gatehouse/gatehouse.toml";

/// Top-level settings structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory containing one subdirectory (or symlink) per bundle.
    #[serde(default = "default_bundles_dir")]
    pub bundles_dir: PathBuf,

    /// INI-like access rules file.
    #[serde(default = "default_access_file")]
    pub access_file: PathBuf,

    /// Default-argument rules file.
    #[serde(default = "default_defaults_file")]
    pub defaults_file: PathBuf,

    /// Extension of action scripts, without the dot.
    #[serde(default = "default_script_extension")]
    pub script_extension: String,

    /// JSON-lines audit file. When absent, records go to the log.
    #[serde(default)]
    pub audit_log: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bundles_dir: default_bundles_dir(),
            access_file: default_access_file(),
            defaults_file: default_defaults_file(),
            script_extension: default_script_extension(),
            audit_log: None,
            logging: LoggingSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> GateResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| GateError::ConfigError {
            reason: format!("failed to read settings file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            GateError::ConfigError { reason } => GateError::ConfigError {
                reason: format!("{}: {}", path.display(), reason),
            },
            other => other,
        })
    }

    /// Parse and validate settings from a TOML string.
    pub fn from_toml_str(s: &str) -> GateResult<Self> {
        let settings: Settings = toml::from_str(s).map_err(|e| GateError::ConfigError {
            reason: format!("failed to parse settings TOML: {}", e),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings
    pub fn validate(&self) -> GateResult<()> {
        if self.bundles_dir.as_os_str().is_empty() {
            return Err(GateError::ConfigError {
                reason: "bundles_dir cannot be empty".to_string(),
            });
        }

        if !is_valid_token(&self.script_extension) {
            return Err(GateError::ConfigError {
                reason: format!(
                    "script_extension {:?} must be non-empty and use only letters, digits, '_', '=' or '-'",
                    self.script_extension
                ),
            });
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error" | "off") {
            return Err(GateError::ConfigError {
                reason: format!("unknown log level '{}'", self.logging.level),
            });
        }

        Ok(())
    }
}

// Default value functions

fn default_bundles_dir() -> PathBuf {
    PathBuf::from("/srv/gatehouse/bundles")
}

fn default_access_file() -> PathBuf {
    PathBuf::from("/etc/gatehouse/access.conf")
}

fn default_defaults_file() -> PathBuf {
    PathBuf::from("/etc/gatehouse/defaults.conf")
}

fn default_script_extension() -> String {
    "sh".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}
