//! Viewer Configuration Module
//!
//! Provides rendering styles, thresholds and replay timing loaded from TOML
//! files, with built-in defaults for every value.
//!
//! ## Loading Order
//!
//! 1. `VIBEX_CONFIG` environment variable (path to TOML file)
//! 2. `vibex.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! // In main():
//! config::init(ViewerConfig::load());
//!
//! // Anywhere in the codebase:
//! let threshold = config::get().ribbon.rpm_threshold;
//! ```

mod viewer_config;
pub mod defaults;
pub mod validation;

pub use viewer_config::*;

use std::sync::OnceLock;

/// Global viewer configuration, initialized once at startup.
static VIEWER_CONFIG: OnceLock<ViewerConfig> = OnceLock::new();

/// Initialize the global viewer configuration.
///
/// Later calls are ignored with a warning.
pub fn init(config: ViewerConfig) {
    if VIEWER_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the global viewer configuration.
///
/// Falls back to built-in defaults if `init()` was never called.
pub fn get() -> &'static ViewerConfig {
    VIEWER_CONFIG.get_or_init(|| {
        tracing::debug!("config::get() before config::init(), using defaults");
        ViewerConfig::default()
    })
}

/// Check whether the config has been initialized.
pub fn is_initialized() -> bool {
    VIEWER_CONFIG.get().is_some()
}
