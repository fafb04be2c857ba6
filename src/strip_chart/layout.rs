//! Axis ranges and alert lines of the strip chart

use serde::{Deserialize, Serialize};

use crate::config::StripChartConfig;
use crate::types::{Rgb, StripSeries, StripTrack, SAMPLE_PERIOD_SECS};

/// Title of the shared time axis, drawn under the bottom track
pub const TIME_AXIS_TITLE: &str = "Time (s)";

/// One horizontal track of the strip chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackAxis {
    pub track: StripTrack,
    pub label: String,
    pub pen_color: Rgb,
    pub range: [f64; 2],
    /// Dashed alert level, shock tracks only
    pub alert_line: Option<f64>,
}

/// Fixed framing for a whole replay run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripLayout {
    pub title: String,
    /// Time axis `[0, 10·n]` (s)
    pub x_range: [f64; 2],
    pub x_title: String,
    pub tracks: Vec<TrackAxis>,
}

impl StripLayout {
    /// Ranges are computed once over the full series so the axes stay put
    /// while samples are revealed.
    pub fn for_series(series: &StripSeries, config: &StripChartConfig) -> Self {
        let pad = config.axis_padding;
        let tracks = StripTrack::ALL
            .into_iter()
            .map(|track| {
                let (min, max) = series
                    .track_values(track)
                    .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                        None => Some((v, v)),
                    })
                    .unwrap_or((0.0, 0.0));
                let range = if track.anchored_at_zero() {
                    [0.0, max + pad]
                } else {
                    [min - pad, max + pad]
                };
                TrackAxis {
                    track,
                    label: track.label().to_string(),
                    pen_color: track.pen_color(),
                    range,
                    alert_line: alert_level(track, config),
                }
            })
            .collect();

        Self {
            title: series.well_name.clone(),
            x_range: [0.0, series.len() as f64 * SAMPLE_PERIOD_SECS],
            x_title: TIME_AXIS_TITLE.to_string(),
            tracks,
        }
    }

    pub fn track(&self, track: StripTrack) -> Option<&TrackAxis> {
        self.tracks.iter().find(|t| t.track == track)
    }
}

pub(crate) fn alert_level(track: StripTrack, config: &StripChartConfig) -> Option<f64> {
    match track {
        StripTrack::Ashk => Some(config.ashk_alert_g),
        StripTrack::Lshk => Some(config.lshk_alert_g),
        _ => None,
    }
}
