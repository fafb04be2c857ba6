//! Strip-Chart Replay Integration Test
//!
//! Strip CSV on disk -> layout + replay driven by the async loop.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use vibration_explorer::config::StripChartConfig;
use vibration_explorer::ingest::load_strip_csv;
use vibration_explorer::strip_chart::{
    run_replay, IndicatorLevel, ReplayState, StripChartReplay, StripFrame, StripLayout,
};
use vibration_explorer::types::StripTrack;

const STRIP_CSV: &str = "\
ROP,WOB,SRPM,DRPM,ASHK2,LSHK2,pred_ASHK2,pred_LSHK2
40,18,110,130,2.0,1.0,Bottom,Bottom
45,20,115,135,4.0,2.0,Bottom,Top
50,22,120,150,12.0,6.0,Top,Top
48,21,118,NaN,3.0,1.5,Bottom,Bottom
";

fn load() -> (tempfile::TempDir, vibration_explorer::StripSeries) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("well_7.csv");
    std::fs::write(&path, STRIP_CSV).unwrap();
    let series = load_strip_csv(&path).unwrap();
    (dir, series)
}

#[test]
fn layout_from_csv() {
    let (_dir, series) = load();
    assert_eq!(series.well_name, "well_7");
    assert_eq!(series.samples[3].time_s, 30.0);

    let layout = StripLayout::for_series(&series, &StripChartConfig::default());
    assert_eq!(layout.x_range, [0.0, 40.0]);
    assert_eq!(layout.track(StripTrack::Wob).unwrap().range, [0.0, 27.0]);
    assert_eq!(layout.track(StripTrack::DownholeRpm).unwrap().range, [125.0, 155.0]);
    assert_eq!(layout.track(StripTrack::Lshk).unwrap().alert_line, Some(5.19));
}

#[tokio::test]
async fn replay_from_csv_runs_to_completion() {
    let (_dir, series) = load();
    let mut replay = StripChartReplay::new(series, StripChartConfig::default());
    let mut frames: Vec<StripFrame> = Vec::new();

    let stats = run_replay(&mut replay, Duration::from_millis(2), &mut frames, CancellationToken::new()).await;

    assert!(stats.completed);
    assert_eq!(frames.len(), 5);
    assert_eq!(replay.state(), ReplayState::Idle);

    let third = &frames[2].indicators;
    assert_eq!(third.ashk_actual.level, IndicatorLevel::Alert);
    assert_eq!(third.lshk_actual.level, IndicatorLevel::Alert);
    assert_eq!(third.ashk_predicted.level, IndicatorLevel::Alert);

    let second = &frames[1].indicators;
    assert_eq!(second.ashk_actual.level, IndicatorLevel::Normal);
    assert_eq!(second.lshk_predicted.level, IndicatorLevel::Alert);

    // final frame repeats the full series, then the replay can start again
    assert_eq!(frames[4].visible, 4);
    assert!(frames[4].finished);
    assert!(replay.start());
}

#[tokio::test]
async fn cancellation_mid_run_rewinds() {
    let (_dir, series) = load();
    let mut replay = StripChartReplay::new(series, StripChartConfig::default());
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        canceller.cancel();
    });

    let mut frames: Vec<StripFrame> = Vec::new();
    let stats = run_replay(&mut replay, Duration::from_secs(60), &mut frames, token).await;

    // the first tick fires immediately, the second never arrives
    assert_eq!(stats.frames, 1);
    assert!(!stats.completed);
    assert_eq!(replay.pointer(), 0);
    assert_eq!(replay.state(), ReplayState::Idle);
}
