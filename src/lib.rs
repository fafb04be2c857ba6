//! Vibration Explorer: 3D trajectory ribbons and LWD strip charts
//!
//! Turns per-well survey and downhole vibration tables into renderable
//! geometry, and replays recorded strip-chart data as if it were live.
//!
//! ## Modules
//!
//! - **mesh**: per-well ribbon builder and multi-well scene composition
//! - **logs**: stacked 2D log panels bounded by a vibration channel
//! - **strip_chart**: strip-chart layout, replay state machine and async loop
//! - **ingest**: survey and strip-chart CSV loaders
//! - **export**: JSON figure writer
//! - **config**: TOML styles, thresholds and replay timing

pub mod config;
pub mod export;
pub mod ingest;
pub mod logs;
pub mod mesh;
pub mod strip_chart;
pub mod types;

// Re-export configuration
pub use config::{RibbonStyle, ViewerConfig};

// Re-export the main builders
pub use logs::{build_log_panels, LogPanels};
pub use mesh::{build_scene, build_well_traces, DataShapeError, MeshError, Scene, WellTraces};
pub use strip_chart::{run_replay, StripChartReplay, StripFrame, StripLayout};

// Re-export commonly used types
pub use types::{Primitive, StripSeries, WellCorpus, WellSeries};
