//! Turning reversed log lines into run blocks and run blocks into fields.

pub mod fields;
pub mod segment;
pub mod timestamp;

pub use fields::extract_events;
pub use segment::segment_blocks;
pub use timestamp::Timestamp;
