//! Argument merging.
//!
//! Administrator defaults are appended after the caller's arguments. Task
//! scripts parse flags last-occurrence-wins, so a default always beats a
//! caller-supplied flag of the same name. Nothing is deduplicated or
//! reordered.

/// Split a raw default-argument string on whitespace. No quoting rules.
pub fn split_args(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// `user_args` followed by `default_args`.
pub fn merge(user_args: &[String], default_args: &[String]) -> Vec<String> {
    let mut merged = Vec::with_capacity(user_args.len() + default_args.len());
    merged.extend_from_slice(user_args);
    merged.extend_from_slice(default_args);
    merged
}
