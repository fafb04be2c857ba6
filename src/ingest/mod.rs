//! CSV ingestion for survey / vibration tables and strip-chart series
//!
//! Two layouts are supported:
//!
//! **Survey CSV** (3D explorer and log panels): long format, one row per
//! sample, keyed by a well column. `N`, `E`, `V` are required; `Rotary RPM`,
//! `Weight on Bit` and an `Index` column are recognized; every other column
//! becomes a named curve (`ASHK2`, `LSHK2`, `Gamma Ray`, ...).
//!
//! **Strip CSV** (real-time viewer): `ROP`, `WOB`, `SRPM`, `DRPM`, `ASHK2`,
//! `LSHK2` plus optional `pred_ASHK2` / `pred_LSHK2` class labels. Samples are
//! 10 s apart.
//!
//! Empty cells and `NaN` / `NA` / `null` / `None` are read as missing values.

mod csv;
mod strip;
mod survey;

pub use strip::*;
pub use survey::*;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Empty file: {0}")]
    EmptyFile(String),

    #[error("{source_name}: required column '{column}' not found in header")]
    MissingColumn { source_name: String, column: String },

    #[error("{source_name} line {line}: column '{column}' has unparsable value '{value}'")]
    Parse {
        source_name: String,
        line: usize,
        column: String,
        value: String,
    },

    #[error("{source_name} line {line}: required value '{column}' is missing")]
    MissingValue {
        source_name: String,
        line: usize,
        column: String,
    },

    #[error("No data rows in {0}")]
    NoRows(String),
}
