//! Config validation: unknown-key detection with Levenshtein suggestions.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, unknown section).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for ViewerConfig.
///
/// Maintained by hand to match the struct hierarchy in viewer_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [ribbon]
        "ribbon",
        "ribbon.rpm_threshold",
        "ribbon.amplification",
        "ribbon.lead_line_width",
        "ribbon.centerline_width",
        "ribbon.lead_line_color",
        "ribbon.rpm_low_color",
        "ribbon.rpm_high_color",
        "ribbon.vibration_color",
        "ribbon.wob_color",
        // [scene]
        "scene",
        "scene.default_channel",
        "scene.channels",
        // [logs]
        "logs",
        "logs.reference_channel",
        "logs.tracks",
        "logs.x_axis_title",
        // [strip_chart]
        "strip_chart",
        "strip_chart.poll_interval_ms",
        "strip_chart.ashk_alert_g",
        "strip_chart.lshk_alert_g",
        "strip_chart.axis_padding",
        "strip_chart.alert_color",
        "strip_chart.normal_color",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// Key Walking
// ============================================================================

/// Collect every dotted key path of a TOML document, sections included.
///
/// `{ ribbon = { amplification = 10 } }` yields `["ribbon", "ribbon.amplification"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let Some(table) = value.as_table() else {
        return Vec::new();
    };
    let mut keys = Vec::with_capacity(table.len());
    for (key, child) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        let nested = if child.is_table() {
            walk_toml_keys(child, &path)
        } else {
            Vec::new()
        };
        keys.push(path);
        keys.extend(nested);
    }
    keys
}

// ============================================================================
// Suggestions
// ============================================================================

/// Maximum edit distance for a "did you mean" suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Levenshtein edit distance over chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != *cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Closest known key within [`MAX_SUGGESTION_DISTANCE`] edits, ties broken alphabetically.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|k| (levenshtein(unknown, k), *k))
        .filter(|(dist, _)| *dist <= MAX_SUGGESTION_DISTANCE)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// Never fails: unknown keys only produce warnings, and syntax errors are
/// left for the serde pass to report.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            message: format!("Unknown config key '{key}'"),
            suggestion: suggest_correction(&key, &known),
            field: key,
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
