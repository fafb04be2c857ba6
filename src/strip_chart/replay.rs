//! Replay state machine
//!
//! `Idle --start--> Running --tick*--> Idle`. Each tick reveals one more
//! sample; the tick after the last sample closes the run and rewinds.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::layout::alert_level;
use crate::config::StripChartConfig;
use crate::types::{Rgb, StripSample, StripSeries, StripTrack, PREDICTION_TOP};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorLevel {
    Normal,
    Alert,
}

/// A lamp next to the shock tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub level: IndicatorLevel,
    pub color: Rgb,
}

/// Measured and predicted shock lamps for the newest visible sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicators {
    pub ashk_actual: Indicator,
    pub lshk_actual: Indicator,
    pub ashk_predicted: Indicator,
    pub lshk_predicted: Indicator,
}

/// Output of one replay tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripFrame {
    /// Pointer value after the tick
    pub tick: usize,
    /// Number of leading samples shown
    pub visible: usize,
    pub latest: Option<StripSample>,
    pub indicators: Indicators,
    /// Last frame of the run; the replay is idle again
    pub finished: bool,
}

impl StripFrame {
    /// The samples this frame reveals
    pub fn samples<'a>(&self, series: &'a StripSeries) -> &'a [StripSample] {
        &series.samples[..self.visible.min(series.len())]
    }
}

/// Drives the reveal pointer over a loaded series.
#[derive(Debug, Clone)]
pub struct StripChartReplay {
    series: StripSeries,
    config: StripChartConfig,
    ptr: usize,
    state: ReplayState,
}

impl StripChartReplay {
    pub fn new(series: StripSeries, config: StripChartConfig) -> Self {
        Self {
            series,
            config,
            ptr: 0,
            state: ReplayState::Idle,
        }
    }

    pub fn series(&self) -> &StripSeries {
        &self.series
    }

    pub fn state(&self) -> ReplayState {
        self.state
    }

    pub fn pointer(&self) -> usize {
        self.ptr
    }

    /// Whether the start action is available
    pub fn can_start(&self) -> bool {
        self.state == ReplayState::Idle
    }

    /// Begin a run. Returns `false` if one is already in progress.
    pub fn start(&mut self) -> bool {
        if !self.can_start() {
            return false;
        }
        self.state = ReplayState::Running;
        info!(well = %self.series.well_name, samples = self.series.len(), "Replay started");
        true
    }

    /// Stop and rewind.
    pub fn reset(&mut self) {
        self.ptr = 0;
        self.state = ReplayState::Idle;
    }

    /// Advance one step. `None` while idle.
    pub fn tick(&mut self) -> Option<StripFrame> {
        if self.state != ReplayState::Running {
            return None;
        }
        self.ptr += 1;
        let tick = self.ptr;
        let visible = tick.min(self.series.len());
        let latest = visible
            .checked_sub(1)
            .and_then(|i| self.series.samples.get(i))
            .cloned();
        let indicators = self.indicators(latest.as_ref());

        let finished = tick > self.series.len();
        if finished {
            self.reset();
            info!(well = %self.series.well_name, frames = tick, "Replay finished");
        } else {
            debug!(tick, visible, "Replay tick");
        }

        Some(StripFrame {
            tick,
            visible,
            latest,
            indicators,
            finished,
        })
    }

    fn indicators(&self, sample: Option<&StripSample>) -> Indicators {
        let measured = |track: StripTrack| {
            let value = sample.and_then(|s| track.value(s));
            let over = match (value, alert_level(track, &self.config)) {
                (Some(v), Some(limit)) => v > limit,
                _ => false,
            };
            self.indicator(over)
        };
        let predicted = |label: Option<&String>| self.indicator(label.is_some_and(|l| l == PREDICTION_TOP));

        Indicators {
            ashk_actual: measured(StripTrack::Ashk),
            lshk_actual: measured(StripTrack::Lshk),
            ashk_predicted: predicted(sample.and_then(|s| s.predicted_ashk.as_ref())),
            lshk_predicted: predicted(sample.and_then(|s| s.predicted_lshk.as_ref())),
        }
    }

    fn indicator(&self, alert: bool) -> Indicator {
        if alert {
            Indicator {
                level: IndicatorLevel::Alert,
                color: self.config.alert_color,
            }
        } else {
            Indicator {
                level: IndicatorLevel::Normal,
                color: self.config.normal_color,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ashk: Option<f64>, lshk: f64, pred: Option<&str>) -> StripSample {
        StripSample {
            time_s: 0.0,
            rop: Some(50.0),
            wob: Some(20.0),
            surface_rpm: Some(120.0),
            downhole_rpm: Some(140.0),
            ashk,
            lshk: Some(lshk),
            predicted_ashk: pred.map(str::to_string),
            predicted_lshk: None,
        }
    }

    fn replay() -> StripChartReplay {
        let series = StripSeries {
            well_name: "demo".to_string(),
            samples: vec![
                sample(Some(1.0), 1.0, Some("Bottom")),
                sample(Some(12.0), 6.0, Some("Top")),
                sample(None, 5.19, None),
            ],
        };
        StripChartReplay::new(series, StripChartConfig::default())
    }

    #[test]
    fn test_idle_tick_does_nothing() {
        let mut r = replay();
        assert!(r.tick().is_none());
        assert_eq!(r.pointer(), 0);
    }

    #[test]
    fn test_run_emits_n_plus_one_frames_then_rewinds() {
        let mut r = replay();
        assert!(r.start());
        assert!(!r.start());
        assert!(!r.can_start());

        let mut frames = Vec::new();
        while let Some(frame) = r.tick() {
            frames.push(frame);
        }
        assert_eq!(frames.len(), 4);
        assert_eq!(
            frames.iter().map(|f| f.visible).collect::<Vec<_>>(),
            vec![1, 2, 3, 3]
        );
        assert!(frames[..3].iter().all(|f| !f.finished));
        assert!(frames[3].finished);
        assert_eq!(r.state(), ReplayState::Idle);
        assert_eq!(r.pointer(), 0);
        assert!(r.can_start());
        assert_eq!(frames[1].samples(r.series()).len(), 2);
    }

    #[test]
    fn test_indicator_colors() {
        let mut r = replay();
        r.start();
        let first = r.tick().unwrap().indicators;
        assert_eq!(first.ashk_actual.color, Rgb::new(0, 128, 0));
        assert_eq!(first.ashk_predicted.level, IndicatorLevel::Normal);

        let second = r.tick().unwrap().indicators;
        assert_eq!(second.ashk_actual.color.hex(), "FF0000");
        assert_eq!(second.lshk_actual.level, IndicatorLevel::Alert);
        assert_eq!(second.ashk_predicted.level, IndicatorLevel::Alert);
        assert_eq!(second.lshk_predicted.level, IndicatorLevel::Normal);

        // missing ASHK and LSHK exactly at the limit stay green
        let third = r.tick().unwrap().indicators;
        assert_eq!(third.ashk_actual.level, IndicatorLevel::Normal);
        assert_eq!(third.lshk_actual.level, IndicatorLevel::Normal);
    }

    #[test]
    fn test_reset_mid_run() {
        let mut r = replay();
        r.start();
        r.tick();
        r.reset();
        assert_eq!(r.pointer(), 0);
        assert!(r.tick().is_none());
    }
}
