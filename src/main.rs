//! vibex - Drilling vibration explorer
//!
//! Builds 3D ribbon scenes and 2D log panels from survey / vibration CSVs,
//! and replays strip-chart CSVs in real time.
//!
//! # Usage
//!
//! ```bash
//! # List wells and curves in a survey table
//! vibex wells --data survey.csv
//!
//! # 3D scene of two wells colored by axial shock
//! vibex scene --data survey.csv --well "A-1H" --well "B-2H" --channel ASHK2 --out scene.json
//!
//! # Log panels of one well
//! vibex logs --data survey.csv --well "A-1H"
//!
//! # Replay a strip chart, one sample every 200 ms
//! vibex stream --data realtime.csv --interval-ms 200
//! ```
//!
//! # Environment Variables
//!
//! - `VIBEX_CONFIG`: Path to a TOML config file (default: ./vibex.toml)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

use vibration_explorer::config::{self, ViewerConfig};
use vibration_explorer::export::{Figure, FigureKind};
use vibration_explorer::ingest::{load_strip_csv, load_survey_csv};
use vibration_explorer::strip_chart::{run_replay, FrameSink, StripChartReplay, StripFrame, StripLayout};
use vibration_explorer::{build_log_panels, build_scene};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "vibex")]
#[command(about = "Drilling vibration explorer: 3D ribbons, log panels and strip-chart replay")]
#[command(version)]
struct CliArgs {
    /// TOML config file (overrides $VIBEX_CONFIG and ./vibex.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// List wells and their curves
    Wells {
        /// Survey / vibration CSV
        #[arg(long)]
        data: PathBuf,
    },

    /// Build the 3D ribbon scene for one or more wells
    Scene {
        /// Survey / vibration CSV
        #[arg(long)]
        data: PathBuf,
        /// Well to include (repeatable, drawn in the given order)
        #[arg(long = "well", required = true)]
        wells: Vec<String>,
        /// Vibration channel (default: scene.default_channel)
        #[arg(long)]
        channel: Option<String>,
        /// Output JSON file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Build the 2D log panels for one well
    Logs {
        /// Survey / vibration CSV
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        well: String,
        /// Output JSON file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Replay a strip-chart CSV as JSON lines, one frame per tick
    Stream {
        /// Strip-chart CSV
        #[arg(long)]
        data: PathBuf,
        /// Tick interval (default: strip_chart.poll_interval_ms)
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Write the axis layout here before streaming
        #[arg(long)]
        layout_out: Option<PathBuf>,
    },
}

// ============================================================================
// Frame Printer
// ============================================================================

/// Prints each frame as one JSON line on stdout
struct StdoutSink;

#[async_trait]
impl FrameSink for StdoutSink {
    async fn send_frame(&mut self, frame: StripFrame) -> Result<()> {
        println!("{}", serde_json::to_string(&frame)?);
        Ok(())
    }
}

// ============================================================================
// Subcommands
// ============================================================================

fn run_wells(data: &Path) -> Result<()> {
    let corpus = load_survey_csv(data).with_context(|| format!("Loading {}", data.display()))?;
    for series in corpus.iter() {
        println!(
            "{}\t{} rows\t{}",
            series.name,
            series.len(),
            series.curve_names.join(", ")
        );
    }
    Ok(())
}

fn run_scene(
    cfg: &ViewerConfig,
    data: &Path,
    wells: &[String],
    channel: Option<String>,
    out: Option<&Path>,
) -> Result<()> {
    let corpus = load_survey_csv(data).with_context(|| format!("Loading {}", data.display()))?;
    let channel = channel.unwrap_or_else(|| cfg.scene.default_channel.clone());
    if !cfg.scene.channels.contains(&channel) {
        tracing::warn!(channel = %channel, offered = ?cfg.scene.channels, "Channel is not one of the configured vibration channels");
    }

    let scene = build_scene(&corpus, wells, &channel, &cfg.ribbon)
        .with_context(|| format!("Building scene for {wells:?} on {channel}"))?;
    Figure::new(FigureKind::Scene, &scene).write(out)?;
    Ok(())
}

fn run_logs(cfg: &ViewerConfig, data: &Path, well: &str, out: Option<&Path>) -> Result<()> {
    let corpus = load_survey_csv(data).with_context(|| format!("Loading {}", data.display()))?;
    let series = corpus
        .get(well)
        .ok_or_else(|| anyhow::anyhow!("Unknown well: {well}"))?;
    let panels = build_log_panels(series, &cfg.logs)
        .with_context(|| format!("Building log panels for {well}"))?;
    Figure::new(FigureKind::LogPanels, &panels).write(out)?;
    Ok(())
}

async fn run_stream(
    cfg: &ViewerConfig,
    data: &Path,
    interval_ms: Option<u64>,
    layout_out: Option<&Path>,
) -> Result<()> {
    let series = load_strip_csv(data).with_context(|| format!("Loading {}", data.display()))?;
    let strip_cfg = cfg.strip_chart.clone();
    let interval_ms = interval_ms.unwrap_or(strip_cfg.poll_interval_ms).max(1);

    if let Some(path) = layout_out {
        let layout = StripLayout::for_series(&series, &strip_cfg);
        Figure::new(FigureKind::StripLayout, &layout).write(Some(path))?;
    }

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, stopping replay...");
        shutdown_token.cancel();
    });

    info!(well = %series.well_name, samples = series.len(), interval_ms, "Streaming strip chart");
    let mut replay = StripChartReplay::new(series, strip_cfg);
    let stats = run_replay(
        &mut replay,
        Duration::from_millis(interval_ms),
        &mut StdoutSink,
        cancel_token,
    )
    .await;
    info!(frames = stats.frames, completed = stats.completed, "Replay ended");
    Ok(())
}

// ============================================================================
// Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let viewer_config = match &args.config {
        Some(path) => ViewerConfig::load_from_file(path)
            .with_context(|| format!("Loading config {}", path.display()))?,
        None => ViewerConfig::load(),
    };
    config::init(viewer_config);
    let cfg = config::get();

    match args.command {
        SubCommand::Wells { data } => run_wells(&data),
        SubCommand::Scene {
            data,
            wells,
            channel,
            out,
        } => run_scene(cfg, &data, &wells, channel, out.as_deref()),
        SubCommand::Logs { data, well, out } => run_logs(cfg, &data, &well, out.as_deref()),
        SubCommand::Stream {
            data,
            interval_ms,
            layout_out,
        } => run_stream(cfg, &data, interval_ms, layout_out.as_deref()).await,
    }
}
