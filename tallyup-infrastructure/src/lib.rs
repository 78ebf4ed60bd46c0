#![warn(clippy::uninlined_format_args)]

pub mod json_snapshot;

pub use json_snapshot::{JsonSnapshotReader, parse_snapshot, render_result};
