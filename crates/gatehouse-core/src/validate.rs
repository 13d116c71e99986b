//! Input validation.
//!
//! Every token that reaches a lookup, a path, or the child's argv must be
//! drawn from `[a-zA-Z0-9_=-]` and be non-empty.

use gatehouse_contracts::{
    error::{GateError, GateResult},
    request::DispatchRequest,
};

/// Return true if `token` is non-empty and every byte is an ASCII letter,
/// digit, `_`, `=`, or `-`.
pub fn is_valid_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'=' | b'-'))
}

/// Check one named token, producing a usage error that names the field.
pub fn validate_token(field: &str, token: &str) -> GateResult<()> {
    if is_valid_token(token) {
        Ok(())
    } else {
        Err(GateError::usage(format!(
            "invalid {field} {token:?}: only letters, digits, '_', '=' and '-' are allowed"
        )))
    }
}

/// Validate user, bundle, action, and every trailing argument.
///
/// The first failing token aborts the whole request.
pub fn validate_request(request: &DispatchRequest) -> GateResult<()> {
    validate_token("user", &request.user)?;
    validate_token("bundle", &request.bundle)?;
    validate_token("action", &request.action)?;
    for arg in &request.args {
        validate_token("argument", arg)?;
    }
    Ok(())
}
