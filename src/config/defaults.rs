//! System-wide default constants.
//!
//! Every configurable value in [`ViewerConfig`](super::ViewerConfig) defaults
//! to one of these. Grouped by subsystem for easy discovery.

use crate::types::Rgb;

// ============================================================================
// Config Loading
// ============================================================================

/// Environment variable pointing at a TOML config file.
pub const CONFIG_ENV_VAR: &str = "VIBEX_CONFIG";

/// Config file looked up in the current working directory.
pub const CONFIG_FILE_NAME: &str = "vibex.toml";

// ============================================================================
// Ribbon Mesh
// ============================================================================

/// Rotary speed (RPM) at which the centerline switches color.
pub const RPM_COLOR_THRESHOLD: f64 = 30.0;

/// Visual amplification applied to channel values when extruding ribbons.
pub const RIBBON_AMPLIFICATION: f64 = 10.0;

/// A triangle strip needs at least two samples.
pub const MIN_RIBBON_SAMPLES: usize = 2;

pub const LEAD_LINE_WIDTH: f64 = 5.0;
pub const CENTERLINE_WIDTH: f64 = 30.0;

pub const LEAD_LINE_COLOR: Rgb = Rgb::new(204, 204, 204);
pub const RPM_LOW_COLOR: Rgb = Rgb::new(204, 204, 0);
pub const RPM_HIGH_COLOR: Rgb = Rgb::new(0, 0, 0);
pub const VIBRATION_RIBBON_COLOR: Rgb = Rgb::new(102, 255, 51);
pub const WOB_RIBBON_COLOR: Rgb = Rgb::new(255, 102, 102);

// ============================================================================
// Scene / Log Panels
// ============================================================================

/// Vibration channels offered for ribbon display.
pub const VIBRATION_CHANNELS: &[&str] = &["ASHK2", "LSHK2"];

/// Curve whose valid span bounds the 2D log panels.
pub const LOG_REFERENCE_CHANNEL: &str = "ASHK2";

/// Curves drawn in the 2D log panels, top to bottom.
pub const LOG_TRACKS: &[&str] = &["ASHK2", "LSHK2", "Rotary RPM", "Weight on Bit", "Gamma Ray"];

pub const LOG_X_AXIS_TITLE: &str = "Measure Depth";

// ============================================================================
// Strip Chart
// ============================================================================

/// Replay tick interval (ms).
pub const POLL_INTERVAL_MS: u64 = 200;

/// Axial shock alert line (g).
pub const ASHK_ALERT_G: f64 = 11.1856;

/// Lateral shock alert line (g).
pub const LSHK_ALERT_G: f64 = 5.19;

/// Padding added beyond observed extremes on strip-chart axes.
pub const AXIS_PADDING: f64 = 5.0;

pub const ALERT_COLOR: Rgb = Rgb::new(255, 0, 0);
pub const NORMAL_COLOR: Rgb = Rgb::new(0, 128, 0);
