//! Pipeline entry points.
//!
//! - `run_watch`: keep the event list refreshed on an interval

pub mod watch;

pub use watch::{WatchStats, run_watch};
