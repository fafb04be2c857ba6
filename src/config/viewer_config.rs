//! Viewer Configuration - rendering styles and thresholds as TOML values
//!
//! Each struct implements `Default` with the stock visual constants, so a
//! missing config file changes nothing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::types::Rgb;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for the explorer and strip-chart viewer.
///
/// Load with `ViewerConfig::load()` which searches:
/// 1. `$VIBEX_CONFIG` env var
/// 2. `./vibex.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// 3D trajectory ribbon styling
    #[serde(default)]
    pub ribbon: RibbonStyle,

    /// Channel selection for the 3D scene
    #[serde(default)]
    pub scene: SceneConfig,

    /// 2D log panel layout
    #[serde(default)]
    pub logs: LogPanelConfig,

    /// Real-time strip-chart replay
    #[serde(default)]
    pub strip_chart: StripChartConfig,
}

impl ViewerConfig {
    /// Load configuration using the standard search order:
    /// 1. `$VIBEX_CONFIG` environment variable
    /// 2. `./vibex.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded viewer config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        // 2. Check ./vibex.toml
        let local = PathBuf::from(defaults::CONFIG_FILE_NAME);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded viewer config from ./{}", defaults::CONFIG_FILE_NAME);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::CONFIG_FILE_NAME);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", defaults::CONFIG_FILE_NAME);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are reported as warnings and never fail the load.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants, collecting every violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let r = &self.ribbon;
        if !r.rpm_threshold.is_finite() {
            errors.push(format!("ribbon.rpm_threshold must be finite (got {})", r.rpm_threshold));
        }
        Self::check_positive(r.amplification, "ribbon.amplification", &mut errors);
        Self::check_positive(r.lead_line_width, "ribbon.lead_line_width", &mut errors);
        Self::check_positive(r.centerline_width, "ribbon.centerline_width", &mut errors);

        let s = &self.scene;
        if s.channels.is_empty() {
            errors.push("scene.channels must list at least one vibration channel".to_string());
        } else if !s.channels.contains(&s.default_channel) {
            errors.push(format!(
                "scene.default_channel '{}' is not one of scene.channels {:?}",
                s.default_channel, s.channels
            ));
        }

        let l = &self.logs;
        if l.reference_channel.trim().is_empty() {
            errors.push("logs.reference_channel must not be empty".to_string());
        }
        if l.tracks.is_empty() {
            errors.push("logs.tracks must list at least one curve".to_string());
        }

        let sc = &self.strip_chart;
        if sc.poll_interval_ms == 0 {
            errors.push("strip_chart.poll_interval_ms must be > 0".to_string());
        }
        Self::check_non_negative(sc.ashk_alert_g, "strip_chart.ashk_alert_g", &mut errors);
        Self::check_non_negative(sc.lshk_alert_g, "strip_chart.lshk_alert_g", &mut errors);
        Self::check_non_negative(sc.axis_padding, "strip_chart.axis_padding", &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_positive(value: f64, name: &str, errors: &mut Vec<String>) {
        // NaN comparisons silently pass, so test finiteness first
        if !value.is_finite() || value <= 0.0 {
            errors.push(format!("{name} must be a finite number > 0 (got {value})"));
        }
    }

    fn check_non_negative(value: f64, name: &str, errors: &mut Vec<String>) {
        if !value.is_finite() || value < 0.0 {
            errors.push(format!("{name} must be a finite number >= 0 (got {value})"));
        }
    }
}

// ============================================================================
// Ribbon Style
// ============================================================================

/// Constants used by the ribbon mesh builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonStyle {
    /// RPM at which the centerline switches from `rpm_low_color` to `rpm_high_color`
    pub rpm_threshold: f64,
    /// Multiplier applied to channel values when extruding ribbons
    pub amplification: f64,
    pub lead_line_width: f64,
    pub centerline_width: f64,
    pub lead_line_color: Rgb,
    pub rpm_low_color: Rgb,
    pub rpm_high_color: Rgb,
    pub vibration_color: Rgb,
    pub wob_color: Rgb,
}

impl Default for RibbonStyle {
    fn default() -> Self {
        Self {
            rpm_threshold: defaults::RPM_COLOR_THRESHOLD,
            amplification: defaults::RIBBON_AMPLIFICATION,
            lead_line_width: defaults::LEAD_LINE_WIDTH,
            centerline_width: defaults::CENTERLINE_WIDTH,
            lead_line_color: defaults::LEAD_LINE_COLOR,
            rpm_low_color: defaults::RPM_LOW_COLOR,
            rpm_high_color: defaults::RPM_HIGH_COLOR,
            vibration_color: defaults::VIBRATION_RIBBON_COLOR,
            wob_color: defaults::WOB_RIBBON_COLOR,
        }
    }
}

// ============================================================================
// Scene
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Channel used when the caller does not pick one
    pub default_channel: String,
    /// Channels offered for selection
    pub channels: Vec<String>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            default_channel: defaults::VIBRATION_CHANNELS[0].to_string(),
            channels: defaults::VIBRATION_CHANNELS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

// ============================================================================
// Log Panels
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogPanelConfig {
    /// Curve whose valid span bounds every track
    pub reference_channel: String,
    /// Curves drawn top to bottom
    pub tracks: Vec<String>,
    pub x_axis_title: String,
}

impl Default for LogPanelConfig {
    fn default() -> Self {
        Self {
            reference_channel: defaults::LOG_REFERENCE_CHANNEL.to_string(),
            tracks: defaults::LOG_TRACKS.iter().map(|c| c.to_string()).collect(),
            x_axis_title: defaults::LOG_X_AXIS_TITLE.to_string(),
        }
    }
}

// ============================================================================
// Strip Chart
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripChartConfig {
    pub poll_interval_ms: u64,
    /// Axial shock alert line (g)
    pub ashk_alert_g: f64,
    /// Lateral shock alert line (g)
    pub lshk_alert_g: f64,
    /// Padding beyond observed extremes on value axes
    pub axis_padding: f64,
    pub alert_color: Rgb,
    pub normal_color: Rgb,
}

impl Default for StripChartConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: defaults::POLL_INTERVAL_MS,
            ashk_alert_g: defaults::ASHK_ALERT_G,
            lshk_alert_g: defaults::LSHK_ALERT_G,
            axis_padding: defaults::AXIS_PADDING,
            alert_color: defaults::ALERT_COLOR,
            normal_color: defaults::NORMAL_COLOR,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            ConfigError::Parse(_, e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        ViewerConfig::default().validate().expect("defaults must validate");
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = ViewerConfig::from_toml_str(
            r#"
[ribbon]
amplification = 25.0
vibration_color = [0, 0, 255]
"#,
        )
        .unwrap();
        assert_eq!(config.ribbon.amplification, 25.0);
        assert_eq!(config.ribbon.vibration_color, Rgb::new(0, 0, 255));
        assert_eq!(config.ribbon.rpm_threshold, defaults::RPM_COLOR_THRESHOLD);
        assert_eq!(config.strip_chart.poll_interval_ms, defaults::POLL_INTERVAL_MS);
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let mut config = ViewerConfig::default();
        config.ribbon.amplification = 0.0;
        config.strip_chart.poll_interval_ms = 0;
        config.scene.default_channel = "XSHK".to_string();
        match config.validate() {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 3, "{errors:?}"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_nan_amplification_rejected() {
        let mut config = ViewerConfig::default();
        config.ribbon.amplification = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vibex.toml");
        std::fs::write(&path, "[ribbon\namplification = 1").unwrap();
        let err = ViewerConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(ref p, _) if p == &path));
    }
}
