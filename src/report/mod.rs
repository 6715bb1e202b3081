//! Report generation for run blocks.
//!
//! Output is plain text for an operator's terminal.

pub mod text;

pub use text::{banner, field_line, ordinal, write_fields, write_raw};
