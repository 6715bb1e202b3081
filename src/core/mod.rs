//! Core types for run-info.
//!
//! Blocks flow from the segmenter to the extractor; events and records flow to the report.

pub mod schema;

// Re-export key types for convenience
pub use schema::{BOOT_MARKER, ExtractMode, RunBlock, RunEvent, RunField, RunRecord, Stamp};
