//! # gatehouse-audit
//!
//! Append-only audit trail for gatehouse dispatch decisions.
//!
//! ## Overview
//!
//! The dispatcher hands every decision (allowed, denied, unavailable) to an
//! [`AuditWriter`](gatehouse_core::traits::AuditWriter) as a
//! `DispatchRecord`. This crate provides three writers:
//!
//! - [`JsonLinesAuditWriter`] — one JSON object per line, appended to a file
//! - [`TracingAuditWriter`] — one structured `tracing` event per record
//! - [`InMemoryAuditWriter`] — a shared `Vec`, for tests and inspection
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gatehouse_audit::JsonLinesAuditWriter;
//! use gatehouse_core::traits::AuditWriter;
//!
//! let writer = JsonLinesAuditWriter::new("/var/log/gatehouse/audit.jsonl");
//! writer.write(&record)?;
//! ```

pub mod events;
pub mod jsonl;
pub mod memory;

pub use events::TracingAuditWriter;
pub use jsonl::JsonLinesAuditWriter;
pub use memory::InMemoryAuditWriter;

// ── Tests ─────────────────────────────────────────────────────────────────────
