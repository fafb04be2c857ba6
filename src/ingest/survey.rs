//! Long-format survey CSV → [`WellCorpus`]

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::csv::{collapse_whitespace, is_missing, normalize_header, parse_optional, split_line};
use super::IngestError;
use crate::types::{
    SurveyVibrationRow, WellCorpus, WellSeries, EAST_COLUMN, INDEX_COLUMN, NORTH_COLUMN,
    ROTARY_RPM_COLUMN, VERTICAL_DEPTH_COLUMN, WEIGHT_ON_BIT_COLUMN, WELL_COLUMNS,
};

/// Header positions of the survey columns
#[derive(Debug, Clone, Default)]
struct SurveyColumns {
    well: Option<usize>,
    index: Option<usize>,
    north: Option<usize>,
    east: Option<usize>,
    vertical_depth: Option<usize>,
    rotary_rpm: Option<usize>,
    weight_on_bit: Option<usize>,
    /// Every other named column, in header order
    curves: Vec<(usize, String)>,
}

impl SurveyColumns {
    fn from_header(header: &str) -> Self {
        let mut map = Self::default();
        for (idx, raw) in split_line(header).iter().enumerate() {
            let name = collapse_whitespace(raw);
            let key = normalize_header(&name);
            // Unnamed leading index columns written by dataframe exports
            if key.is_empty() || key.starts_with("unnamed:") {
                continue;
            }

            if WELL_COLUMNS.contains(&key.as_str()) {
                map.well = Some(idx);
            } else if key == INDEX_COLUMN.to_lowercase() {
                map.index = Some(idx);
            } else if key == NORTH_COLUMN.to_lowercase() {
                map.north = Some(idx);
            } else if key == EAST_COLUMN.to_lowercase() {
                map.east = Some(idx);
            } else if key == VERTICAL_DEPTH_COLUMN.to_lowercase() {
                map.vertical_depth = Some(idx);
            } else if key == ROTARY_RPM_COLUMN.to_lowercase() {
                map.rotary_rpm = Some(idx);
            } else if key == WEIGHT_ON_BIT_COLUMN.to_lowercase() {
                map.weight_on_bit = Some(idx);
            } else {
                map.curves.push((idx, name));
            }
        }
        map
    }

    fn require(&self, source_name: &str) -> Result<(usize, usize, usize, usize), IngestError> {
        let missing = |column: &str| IngestError::MissingColumn {
            source_name: source_name.to_string(),
            column: column.to_string(),
        };
        Ok((
            self.well.ok_or_else(|| missing("Well"))?,
            self.north.ok_or_else(|| missing(NORTH_COLUMN))?,
            self.east.ok_or_else(|| missing(EAST_COLUMN))?,
            self.vertical_depth.ok_or_else(|| missing(VERTICAL_DEPTH_COLUMN))?,
        ))
    }

    fn curve_names(&self) -> Vec<String> {
        self.curves.iter().map(|(_, name)| name.clone()).collect()
    }
}

/// Load a survey CSV file into a corpus of wells.
pub fn load_survey_csv(path: impl AsRef<Path>) -> Result<WellCorpus, IngestError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_survey_csv(BufReader::new(file), &path.display().to_string())
}

/// Parse survey CSV text. `source_name` labels errors and log lines.
pub fn read_survey_csv<R: BufRead>(reader: R, source_name: &str) -> Result<WellCorpus, IngestError> {
    let mut lines = reader.lines();
    let io_err = |source| IngestError::Io {
        path: source_name.into(),
        source,
    };

    let header = lines
        .next()
        .ok_or_else(|| IngestError::EmptyFile(source_name.to_string()))?
        .map_err(io_err)?;
    let columns = SurveyColumns::from_header(&header);
    let (well_col, north_col, east_col, tvd_col) = columns.require(source_name)?;
    let curve_names = columns.curve_names();

    let mut wells: BTreeMap<String, WellSeries> = BTreeMap::new();
    let mut row_count = 0usize;

    for (offset, line) in lines.enumerate() {
        let line_num = offset + 2;
        let line = line.map_err(io_err)?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_line(&line);
        let field = |idx: usize| fields.get(idx).map(String::as_str).unwrap_or("");

        let number = |idx: usize, column: &str| {
            parse_optional(field(idx)).map_err(|value| IngestError::Parse {
                source_name: source_name.to_string(),
                line: line_num,
                column: column.to_string(),
                value,
            })
        };
        let required = |idx: usize, column: &str| -> Result<f64, IngestError> {
            number(idx, column)?.ok_or_else(|| IngestError::MissingValue {
                source_name: source_name.to_string(),
                line: line_num,
                column: column.to_string(),
            })
        };

        let well_name = field(well_col).trim();
        if is_missing(well_name) {
            return Err(IngestError::MissingValue {
                source_name: source_name.to_string(),
                line: line_num,
                column: "Well".to_string(),
            });
        }

        let series = wells
            .entry(well_name.to_string())
            .or_insert_with(|| WellSeries::new(well_name, curve_names.clone()));

        let index = match columns.index {
            Some(idx) => parse_index(field(idx)).ok_or_else(|| IngestError::Parse {
                source_name: source_name.to_string(),
                line: line_num,
                column: INDEX_COLUMN.to_string(),
                value: field(idx).trim().to_string(),
            })?,
            None => series.rows.len() as i64,
        };

        let row = SurveyVibrationRow {
            index,
            north: required(north_col, NORTH_COLUMN)?,
            east: required(east_col, EAST_COLUMN)?,
            vertical_depth: required(tvd_col, VERTICAL_DEPTH_COLUMN)?,
            rotary_rpm: match columns.rotary_rpm {
                Some(idx) => number(idx, ROTARY_RPM_COLUMN)?,
                None => None,
            },
            weight_on_bit: match columns.weight_on_bit {
                Some(idx) => number(idx, WEIGHT_ON_BIT_COLUMN)?,
                None => None,
            },
            curves: columns
                .curves
                .iter()
                .map(|(idx, name)| number(*idx, name.as_str()))
                .collect::<Result<_, _>>()?,
        };
        series.rows.push(row);
        row_count += 1;
    }

    if row_count == 0 {
        return Err(IngestError::NoRows(source_name.to_string()));
    }

    let mut corpus = WellCorpus::new();
    for (_, series) in wells {
        corpus.insert(series);
    }

    tracing::info!(
        source = source_name,
        wells = corpus.len(),
        rows = row_count,
        curves = ?curve_names,
        "Survey table loaded"
    );

    Ok(corpus)
}

/// Integer index, also accepting integral floats like `120.0`
fn parse_index(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    trimmed.parse::<i64>().ok().or_else(|| {
        let v = trimmed.parse::<f64>().ok()?;
        (v.is_finite() && v.fract() == 0.0).then_some(v as i64)
    })
}
