//! JSON figure export
//!
//! Every exported document has the same shape:
//! `{ "kind": "...", "data": T, "meta": { "generated_at": ..., "version": ... } }`

use chrono::Utc;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize figure: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureKind {
    Scene,
    LogPanels,
    StripLayout,
}

#[derive(Debug, Serialize)]
pub struct FigureMeta {
    pub generated_at: String,
    pub version: &'static str,
}

impl Default for FigureMeta {
    fn default() -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Figure<'a, T: Serialize> {
    pub kind: FigureKind,
    pub data: &'a T,
    pub meta: FigureMeta,
}

impl<'a, T: Serialize> Figure<'a, T> {
    pub fn new(kind: FigureKind, data: &'a T) -> Self {
        Self {
            kind,
            data,
            meta: FigureMeta::default(),
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write to `out`, or to stdout when `out` is `None`.
    pub fn write(&self, out: Option<&Path>) -> Result<(), ExportError> {
        let json = self.to_json()?;
        match out {
            Some(path) => {
                std::fs::write(path, json).map_err(|source| ExportError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                tracing::info!(path = %path.display(), kind = ?self.kind, "Figure written");
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{json}").map_err(|source| ExportError::Io {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
            }
        }
        Ok(())
    }
}
