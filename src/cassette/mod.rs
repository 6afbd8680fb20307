//! Cassette format for recording and replaying narration calls.

pub mod format;
pub mod recorder;
pub mod replayer;
