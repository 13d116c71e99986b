//! # gatehouse-core
//!
//! The access-gated dispatch runtime behind the gatehouse SSH forced-command.
//!
//! This crate provides:
//! - The four trust-boundary traits (`AccessPolicy`, `DefaultsSource`,
//!   `TaskRunner`, `AuditWriter`)
//! - Input validation, bundle resolution, and argument merging
//! - The `Dispatcher` that wires them together in the correct order
//! - `ProcessRunner`, which runs task scripts as child processes
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gatehouse_core::{Dispatcher, ProcessRunner, resolve::BundleLayout};
//!
//! let dispatcher = Dispatcher::new(policy, defaults, Box::new(ProcessRunner), audit,
//!     BundleLayout::new("/srv/gatehouse/bundles", "sh"));
//! let outcome = dispatcher.dispatch(&InvocationId::new(), &request)?;
//! ```

pub mod dispatcher;
pub mod lister;
pub mod merge;
pub mod process;
pub mod resolve;
pub mod traits;
pub mod validate;

pub use dispatcher::Dispatcher;
pub use lister::Listing;
pub use process::ProcessRunner;
