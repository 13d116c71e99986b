//! Invocation and request types.
//!
//! The forced-command wrapper hands the dispatcher a user name followed by
//! either `ls` or `<bundle> <action> [args...]`. These types carry that
//! shape into the core without interpreting it further.

use serde::{Deserialize, Serialize};

use crate::error::{GateError, GateResult};

/// The literal token that turns an invocation into a listing request.
pub const LIST_TOKEN: &str = "ls";

/// Unique identifier for a single dispatcher invocation.
///
/// Appears in every audit record and is exported to the child script so
/// its own logs can be correlated with the dispatch decision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId(pub uuid::Uuid);

impl InvocationId {
    /// Create a new, unique invocation ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InvocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A request to run one action of one bundle on behalf of a user.
///
/// Fields are raw and unvalidated when constructed; the dispatcher validates
/// them before any lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub user: String,
    /// The bundle name as requested, which may name a virtual bundle.
    pub bundle: String,
    pub action: String,
    /// Caller-supplied trailing arguments, in order.
    pub args: Vec<String>,
}

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// `<user> ls`: enumerate the user's grants.
    List { user: String },
    /// `<user> <bundle> <action> [args...]`: run one action.
    Dispatch(DispatchRequest),
}

impl Invocation {
    /// Interpret the caller's tokens: the user name, then either `ls` or
    /// `<bundle> <action> [args...]`.
    ///
    /// `ls` right after the user is a listing request regardless of what
    /// follows it. Otherwise at least a bundle and an action are required.
    pub fn from_tokens(tokens: Vec<String>) -> GateResult<Self> {
        let mut tokens = tokens.into_iter();

        let user = tokens
            .next()
            .ok_or_else(|| GateError::usage("missing user"))?;
        let bundle = match tokens.next() {
            Some(first) if first == LIST_TOKEN => return Ok(Invocation::List { user }),
            Some(first) => first,
            None => return Err(GateError::usage("missing bundle and action")),
        };
        let action = tokens
            .next()
            .ok_or_else(|| GateError::usage(format!("missing action for bundle '{bundle}'")))?;

        Ok(Invocation::Dispatch(DispatchRequest {
            user,
            bundle,
            action,
            args: tokens.collect(),
        }))
    }
}
