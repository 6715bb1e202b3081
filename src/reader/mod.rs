//! File access for the log scan.

pub mod reverse;

pub use reverse::{DEFAULT_CHUNK_SIZE, ReverseLines};
