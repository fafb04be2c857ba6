//! 2D log panels
//!
//! Vertically stacked tracks of one well, each plotted against the row index
//! label and bounded by the valid span of a reference vibration channel.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LogPanelConfig;
use crate::mesh::DataShapeError;
use crate::types::{WellSeries, ROTARY_RPM_COLUMN, WEIGHT_ON_BIT_COLUMN};

/// One curve plotted against the index label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogTrack {
    pub curve: String,
    /// Y-axis title; fixed drilling columns use their short mnemonic
    pub y_title: String,
    /// Index labels of the plotted points
    pub x: Vec<i64>,
    pub y: Vec<f64>,
    /// `[0, max]` over `y`, `[0, 1]` when the track is empty
    pub y_range: [f64; 2],
    /// Only set on the bottom track
    pub x_title: Option<String>,
}

/// Stacked tracks for a single well, top to bottom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogPanels {
    pub title: String,
    pub reference_channel: String,
    /// Index labels of the first and last reference sample
    pub index_range: [i64; 2],
    pub tracks: Vec<LogTrack>,
}

/// Build the log panels of `series` over the reference channel's valid span.
pub fn build_log_panels(
    series: &WellSeries,
    config: &LogPanelConfig,
) -> Result<LogPanels, DataShapeError> {
    let reference = config.reference_channel.as_str();
    let missing_column = |column: &str| DataShapeError::MissingColumn {
        well: series.name.clone(),
        column: column.to_string(),
    };

    if series.column(reference).is_none() {
        return Err(missing_column(reference));
    }
    let span = series
        .valid_span(reference)
        .ok_or_else(|| DataShapeError::ChannelEntirelyMissing {
            well: series.name.clone(),
            channel: reference.to_string(),
        })?;
    let rows = &series.rows[span.first..=span.last];

    let mut tracks = Vec::with_capacity(config.tracks.len());
    for curve in &config.tracks {
        let values = series.column(curve).ok_or_else(|| missing_column(curve))?;
        let (x, y): (Vec<i64>, Vec<f64>) = rows
            .iter()
            .zip(&values[span.first..=span.last])
            .filter_map(|(row, v)| v.filter(|v| v.is_finite()).map(|v| (row.index, v)))
            .unzip();

        let y_range = match y.iter().copied().reduce(f64::max) {
            Some(max) => [0.0, max],
            None => [0.0, 1.0],
        };
        debug!(well = %series.name, curve = %curve, points = y.len(), "Log track built");

        tracks.push(LogTrack {
            curve: curve.clone(),
            y_title: axis_title(curve).to_string(),
            x,
            y,
            y_range,
            x_title: None,
        });
    }
    if let Some(bottom) = tracks.last_mut() {
        bottom.x_title = Some(config.x_axis_title.clone());
    }

    Ok(LogPanels {
        title: series.name.clone(),
        reference_channel: reference.to_string(),
        index_range: [rows[0].index, rows[rows.len() - 1].index],
        tracks,
    })
}

fn axis_title(curve: &str) -> &str {
    match curve {
        ROTARY_RPM_COLUMN => "RPM",
        WEIGHT_ON_BIT_COLUMN => "WOB",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SurveyVibrationRow;

    fn series() -> WellSeries {
        let mut series = WellSeries::new(
            "Alpha",
            vec!["ASHK2".to_string(), "LSHK2".to_string(), "Gamma Ray".to_string()],
        );
        let ashk = [None, Some(1.0), Some(3.0), Some(2.0), None];
        for (i, a) in ashk.into_iter().enumerate() {
            series.rows.push(SurveyVibrationRow {
                index: 1000 + i as i64,
                north: 0.0,
                east: 0.0,
                vertical_depth: i as f64,
                rotary_rpm: Some(40.0 + i as f64),
                weight_on_bit: if i == 2 { None } else { Some(10.0) },
                curves: vec![a, Some(0.5), None],
            });
        }
        series
    }

    #[test]
    fn test_tracks_follow_reference_span() {
        let panels = build_log_panels(&series(), &LogPanelConfig::default()).unwrap();
        assert_eq!(panels.title, "Alpha");
        assert_eq!(panels.index_range, [1001, 1003]);
        assert_eq!(panels.tracks.len(), 5);

        let ashk = &panels.tracks[0];
        assert_eq!(ashk.x, vec![1001, 1002, 1003]);
        assert_eq!(ashk.y_range, [0.0, 3.0]);

        let rpm = &panels.tracks[2];
        assert_eq!(rpm.curve, "Rotary RPM");
        assert_eq!(rpm.y_title, "RPM");
        assert_eq!(panels.tracks[3].y_title, "WOB");
        assert_eq!(ashk.y_title, "ASHK2");
        assert_eq!(rpm.y, vec![41.0, 42.0, 43.0]);
    }

    #[test]
    fn test_missing_values_are_skipped() {
        let panels = build_log_panels(&series(), &LogPanelConfig::default()).unwrap();
        let wob = &panels.tracks[3];
        assert_eq!(wob.x, vec![1001, 1003]);
        assert_eq!(wob.y, vec![10.0, 10.0]);
    }

    #[test]
    fn test_empty_track_range_and_bottom_title() {
        let panels = build_log_panels(&series(), &LogPanelConfig::default()).unwrap();
        let gamma = panels.tracks.last().unwrap();
        assert!(gamma.y.is_empty());
        assert_eq!(gamma.y_range, [0.0, 1.0]);
        assert_eq!(gamma.x_title.as_deref(), Some("Measure Depth"));
        assert!(panels.tracks[..4].iter().all(|t| t.x_title.is_none()));
    }

    #[test]
    fn test_absent_track_curve_fails() {
        let mut config = LogPanelConfig::default();
        config.tracks.push("Caliper".to_string());
        let err = build_log_panels(&series(), &config).unwrap_err();
        assert_eq!(
            err,
            DataShapeError::MissingColumn {
                well: "Alpha".to_string(),
                column: "Caliper".to_string()
            }
        );
    }

    #[test]
    fn test_reference_without_samples_fails() {
        let config = LogPanelConfig {
            reference_channel: "Gamma Ray".to_string(),
            ..LogPanelConfig::default()
        };
        let err = build_log_panels(&series(), &config).unwrap_err();
        assert!(matches!(err, DataShapeError::ChannelEntirelyMissing { .. }));
    }
}
