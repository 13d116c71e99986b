//! Reading administrator-edited config files.
//!
//! A missing file is created empty when possible and read as empty. An
//! unreadable file is logged and read as empty. Neither ever fails the
//! invocation: with no rules, everything is denied anyway.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info, warn};

/// Return the contents of `path`, or an empty string if it cannot be read.
pub fn read_or_create(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            match OpenOptions::new().write(true).create_new(true).open(path) {
                Ok(_) => info!(path = %path.display(), "created empty config file"),
                Err(create_err) => debug!(
                    path = %path.display(),
                    error = %create_err,
                    "config file missing and could not be created"
                ),
            }
            String::new()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "config file unreadable, treating as empty");
            String::new()
        }
    }
}
