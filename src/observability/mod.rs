//! Observability for the record service
//!
//! Structured JSON logging only:
//! - One log line = one event
//! - Deterministic key ordering
//! - Synchronous, no buffering
//!
//! Logging is read-only: it never affects request handling, and a failed
//! write to stdout/stderr is ignored.

mod logger;

pub use logger::{Logger, Severity};
