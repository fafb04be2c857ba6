//! Strip-chart time series types

use serde::{Deserialize, Serialize};

use super::Rgb;

/// Seconds between consecutive strip-chart samples
pub const SAMPLE_PERIOD_SECS: f64 = 10.0;

/// Prediction label meaning a high-shock state is expected
pub const PREDICTION_TOP: &str = "Top";

/// One row of the real-time LWD strip chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripSample {
    /// Elapsed time (s), `position × SAMPLE_PERIOD_SECS`
    pub time_s: f64,
    /// Rate of penetration (ft/h)
    pub rop: Option<f64>,
    /// Weight on bit (klbf)
    pub wob: Option<f64>,
    /// Surface RPM
    pub surface_rpm: Option<f64>,
    /// Downhole RPM
    pub downhole_rpm: Option<f64>,
    /// Axial shock (g)
    pub ashk: Option<f64>,
    /// Lateral shock (g)
    pub lshk: Option<f64>,
    pub predicted_ashk: Option<String>,
    pub predicted_lshk: Option<String>,
}

/// Strip-chart tracks, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StripTrack {
    Rop,
    Wob,
    SurfaceRpm,
    DownholeRpm,
    Ashk,
    Lshk,
}

impl StripTrack {
    pub const ALL: [StripTrack; 6] = [
        StripTrack::Rop,
        StripTrack::Wob,
        StripTrack::SurfaceRpm,
        StripTrack::DownholeRpm,
        StripTrack::Ashk,
        StripTrack::Lshk,
    ];

    /// Axis label with units
    pub fn label(&self) -> &'static str {
        match self {
            StripTrack::Rop => "ROP (ft/h)",
            StripTrack::Wob => "WOB (klbf)",
            StripTrack::SurfaceRpm => "SRPM (rpm)",
            StripTrack::DownholeRpm => "DRPM (rpm)",
            StripTrack::Ashk => "ASHK (G)",
            StripTrack::Lshk => "LSHK (G)",
        }
    }

    /// Trace color of the track
    pub fn pen_color(&self) -> Rgb {
        match self {
            StripTrack::Rop => Rgb::new(0, 48, 143),
            StripTrack::Wob => Rgb::new(59, 122, 87),
            StripTrack::SurfaceRpm => Rgb::new(0, 0, 0),
            StripTrack::DownholeRpm => Rgb::new(138, 43, 226),
            StripTrack::Ashk => Rgb::new(150, 113, 23),
            StripTrack::Lshk => Rgb::new(30, 77, 43),
        }
    }

    /// RPM tracks pad both ends of their range; the rest are anchored at zero
    pub fn anchored_at_zero(&self) -> bool {
        !matches!(self, StripTrack::SurfaceRpm | StripTrack::DownholeRpm)
    }

    pub fn value(&self, sample: &StripSample) -> Option<f64> {
        match self {
            StripTrack::Rop => sample.rop,
            StripTrack::Wob => sample.wob,
            StripTrack::SurfaceRpm => sample.surface_rpm,
            StripTrack::DownholeRpm => sample.downhole_rpm,
            StripTrack::Ashk => sample.ashk,
            StripTrack::Lshk => sample.lshk,
        }
    }
}

/// A loaded strip-chart time series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StripSeries {
    pub well_name: String,
    pub samples: Vec<StripSample>,
}

impl StripSeries {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Finite values of one track in time order
    pub fn track_values(&self, track: StripTrack) -> impl Iterator<Item = f64> + '_ {
        self.samples
            .iter()
            .filter_map(move |s| track.value(s))
            .filter(|v| v.is_finite())
    }
}
