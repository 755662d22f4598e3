//! trace-slicer-core
//!
//! Core library for slicing pointer provenance out of recorded execution logs.
//!
//! This crate defines the log record model, the collaborator traits for log
//! access and program representation, the backward dual-pointer slicer, the
//! trace assembler, and report rendering.
//!
//! All substantive logic lives here so it is fully testable and reusable from
//! multiple frontends (CLI, analysis drivers, etc.).

pub mod config;
pub mod log;
pub mod model;
pub mod program;
pub mod report;
pub mod slicer;
pub mod trace;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
