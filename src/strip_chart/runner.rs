//! Timer-driven replay loop
//!
//! Ticks the replay on a fixed interval and hands every frame to a
//! [`FrameSink`] until the run finishes or the token is cancelled.

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::replay::{StripChartReplay, StripFrame};

/// Receiver of replay frames (a chart, a terminal printer, a channel).
#[async_trait]
pub trait FrameSink: Send {
    async fn send_frame(&mut self, frame: StripFrame) -> Result<()>;
}

#[async_trait]
impl FrameSink for Vec<StripFrame> {
    async fn send_frame(&mut self, frame: StripFrame) -> Result<()> {
        self.push(frame);
        Ok(())
    }
}

#[async_trait]
impl FrameSink for mpsc::Sender<StripFrame> {
    async fn send_frame(&mut self, frame: StripFrame) -> Result<()> {
        self.send(frame)
            .await
            .map_err(|_| anyhow::anyhow!("frame receiver dropped"))
    }
}

/// How a replay run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    pub frames: usize,
    /// `true` when the final frame was reached
    pub completed: bool,
}

/// Run one replay from start to finish.
///
/// Starts the replay if it is idle. Cancellation or a sink error stops the
/// run early and rewinds the replay.
pub async fn run_replay<S: FrameSink>(
    replay: &mut StripChartReplay,
    period: Duration,
    sink: &mut S,
    cancel_token: CancellationToken,
) -> ReplayStats {
    replay.start();
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut frames = 0usize;
    loop {
        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => {
                info!(frames, "[Replay] Shutdown signal received");
                break;
            }
            _ = ticker.tick() => {}
        }

        let Some(frame) = replay.tick() else {
            break;
        };
        let finished = frame.finished;
        frames += 1;

        if let Err(e) = sink.send_frame(frame).await {
            warn!("[Replay] Frame sink error: {}", e);
            break;
        }
        if finished {
            return ReplayStats {
                frames,
                completed: true,
            };
        }
    }

    replay.reset();
    ReplayStats {
        frames,
        completed: false,
    }
}
