//! Real-time LWD strip chart
//!
//! Replays a recorded strip-chart series one sample per tick, as if it were
//! arriving from the rig:
//!
//! - [`StripLayout`]: fixed axis ranges and shock alert lines
//! - [`StripChartReplay`]: the reveal pointer and idle/running state
//! - [`run_replay`]: tokio interval loop feeding a [`FrameSink`]

mod layout;
mod replay;
mod runner;

pub use layout::{StripLayout, TrackAxis};
pub use replay::*;
pub use runner::*;
