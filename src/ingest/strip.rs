//! Strip-chart CSV → [`StripSeries`]

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::csv::{is_missing, normalize_header, parse_optional, split_line};
use super::IngestError;
use crate::types::{StripSample, StripSeries, StripTrack, SAMPLE_PERIOD_SECS};

/// Header name of each strip-chart track
fn track_column(track: StripTrack) -> &'static str {
    match track {
        StripTrack::Rop => "ROP",
        StripTrack::Wob => "WOB",
        StripTrack::SurfaceRpm => "SRPM",
        StripTrack::DownholeRpm => "DRPM",
        StripTrack::Ashk => "ASHK2",
        StripTrack::Lshk => "LSHK2",
    }
}

const PRED_ASHK_COLUMN: &str = "pred_ASHK2";
const PRED_LSHK_COLUMN: &str = "pred_LSHK2";

/// Load a strip-chart CSV. The well name defaults to the file stem.
pub fn load_strip_csv(path: impl AsRef<Path>) -> Result<StripSeries, IngestError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut series = read_strip_csv(BufReader::new(file), &path.display().to_string())?;
    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
        series.well_name = stem.to_string();
    }
    Ok(series)
}

/// Parse strip-chart CSV text.
pub fn read_strip_csv<R: BufRead>(reader: R, source_name: &str) -> Result<StripSeries, IngestError> {
    let mut lines = reader.lines();
    let io_err = |source| IngestError::Io {
        path: source_name.into(),
        source,
    };

    let header = lines
        .next()
        .ok_or_else(|| IngestError::EmptyFile(source_name.to_string()))?
        .map_err(io_err)?;
    let names: Vec<String> = split_line(&header).iter().map(|h| normalize_header(h)).collect();
    let find = |column: &str| names.iter().position(|n| *n == column.to_lowercase());

    let mut track_cols = Vec::with_capacity(StripTrack::ALL.len());
    for track in StripTrack::ALL {
        let column = track_column(track);
        let idx = find(column).ok_or_else(|| IngestError::MissingColumn {
            source_name: source_name.to_string(),
            column: column.to_string(),
        })?;
        track_cols.push((track, idx));
    }
    let pred_ashk = find(PRED_ASHK_COLUMN);
    let pred_lshk = find(PRED_LSHK_COLUMN);

    let mut samples = Vec::new();
    for (offset, line) in lines.enumerate() {
        let line_num = offset + 2;
        let line = line.map_err(io_err)?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_line(&line);
        let field = |idx: usize| fields.get(idx).map(String::as_str).unwrap_or("");
        let label = |idx: Option<usize>| {
            idx.map(field)
                .filter(|raw| !is_missing(raw))
                .map(|raw| raw.trim().to_string())
        };

        let mut sample = StripSample {
            time_s: samples.len() as f64 * SAMPLE_PERIOD_SECS,
            rop: None,
            wob: None,
            surface_rpm: None,
            downhole_rpm: None,
            ashk: None,
            lshk: None,
            predicted_ashk: label(pred_ashk),
            predicted_lshk: label(pred_lshk),
        };
        for &(track, idx) in &track_cols {
            let value = parse_optional(field(idx)).map_err(|value| IngestError::Parse {
                source_name: source_name.to_string(),
                line: line_num,
                column: track_column(track).to_string(),
                value,
            })?;
            let slot = match track {
                StripTrack::Rop => &mut sample.rop,
                StripTrack::Wob => &mut sample.wob,
                StripTrack::SurfaceRpm => &mut sample.surface_rpm,
                StripTrack::DownholeRpm => &mut sample.downhole_rpm,
                StripTrack::Ashk => &mut sample.ashk,
                StripTrack::Lshk => &mut sample.lshk,
            };
            *slot = value;
        }
        samples.push(sample);
    }

    if samples.is_empty() {
        return Err(IngestError::NoRows(source_name.to_string()));
    }

    tracing::info!(
        source = source_name,
        samples = samples.len(),
        predictions = pred_ashk.is_some() || pred_lshk.is_some(),
        "Strip-chart series loaded"
    );

    Ok(StripSeries {
        well_name: source_name.to_string(),
        samples,
    })
}
