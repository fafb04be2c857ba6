//! Survey / vibration table types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well name column aliases, matched case-insensitively
pub const WELL_COLUMNS: &[&str] = &["well", "well name", "wellname", "well_name"];
/// Optional explicit index column (measured depth or sample order)
pub const INDEX_COLUMN: &str = "Index";
/// Northing column
pub const NORTH_COLUMN: &str = "N";
/// Easting column
pub const EAST_COLUMN: &str = "E";
/// True vertical depth column
pub const VERTICAL_DEPTH_COLUMN: &str = "V";
/// Rotary speed column
pub const ROTARY_RPM_COLUMN: &str = "Rotary RPM";
/// Weight on bit column
pub const WEIGHT_ON_BIT_COLUMN: &str = "Weight on Bit";

/// One depth-indexed sample of a well's trajectory and drilling telemetry.
///
/// `curves` holds one value per curve name declared by the owning
/// [`WellSeries`]. `None` marks "no data".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyVibrationRow {
    /// Measured depth or sample order
    pub index: i64,
    pub north: f64,
    pub east: f64,
    /// True vertical depth, positive downward
    pub vertical_depth: f64,
    pub rotary_rpm: Option<f64>,
    pub weight_on_bit: Option<f64>,
    pub curves: Vec<Option<f64>>,
}

/// Ordered rows of a single well plus the names of its extra curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellSeries {
    pub name: String,
    pub curve_names: Vec<String>,
    pub rows: Vec<SurveyVibrationRow>,
}

/// Inclusive positional range over which a curve has values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidSpan {
    pub first: usize,
    pub last: usize,
}

impl ValidSpan {
    /// Number of samples in the span
    pub fn sample_count(&self) -> usize {
        self.last - self.first + 1
    }
}

impl WellSeries {
    pub fn new(name: impl Into<String>, curve_names: Vec<String>) -> Self {
        Self {
            name: name.into(),
            curve_names,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a curve in each row's `curves`
    pub fn curve_position(&self, name: &str) -> Option<usize> {
        self.curve_names.iter().position(|c| c == name)
    }

    /// Values of any column, fixed or curve, in row order.
    ///
    /// Returns `None` if the series has no such column.
    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let values = match name {
            NORTH_COLUMN => self.rows.iter().map(|r| Some(r.north)).collect(),
            EAST_COLUMN => self.rows.iter().map(|r| Some(r.east)).collect(),
            VERTICAL_DEPTH_COLUMN => self.rows.iter().map(|r| Some(r.vertical_depth)).collect(),
            ROTARY_RPM_COLUMN => self.rows.iter().map(|r| r.rotary_rpm).collect(),
            WEIGHT_ON_BIT_COLUMN => self.rows.iter().map(|r| r.weight_on_bit).collect(),
            _ => {
                let pos = self.curve_position(name)?;
                self.rows
                    .iter()
                    .map(|r| r.curves.get(pos).copied().flatten())
                    .collect()
            }
        };
        Some(values)
    }

    /// First and last positions where `name` has a value.
    ///
    /// `None` when the column is absent or entirely missing. Interior gaps
    /// are not checked here.
    pub fn valid_span(&self, name: &str) -> Option<ValidSpan> {
        let values = self.column(name)?;
        let first = values.iter().position(Option::is_some)?;
        let last = values.iter().rposition(Option::is_some)?;
        Some(ValidSpan { first, last })
    }
}

/// All wells of a dataset, keyed by unique well name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WellCorpus {
    wells: BTreeMap<String, WellSeries>,
}

impl WellCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a series, replacing any series with the same name
    pub fn insert(&mut self, series: WellSeries) -> Option<WellSeries> {
        self.wells.insert(series.name.clone(), series)
    }

    pub fn get(&self, name: &str) -> Option<&WellSeries> {
        self.wells.get(name)
    }

    pub fn well_names(&self) -> impl Iterator<Item = &str> {
        self.wells.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WellSeries> {
        self.wells.values()
    }

    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(ashk: &[Option<f64>]) -> WellSeries {
        let mut s = WellSeries::new("W-1", vec!["ASHK2".to_string()]);
        for (i, v) in ashk.iter().enumerate() {
            s.rows.push(SurveyVibrationRow {
                index: i as i64,
                north: i as f64,
                east: 0.0,
                vertical_depth: 100.0 + i as f64,
                rotary_rpm: Some(40.0),
                weight_on_bit: None,
                curves: vec![*v],
            });
        }
        s
    }

    #[test]
    fn test_valid_span_skips_head_and_tail() {
        let s = series(&[None, None, Some(1.0), Some(2.0), None]);
        let span = s.valid_span("ASHK2").unwrap();
        assert_eq!(span, ValidSpan { first: 2, last: 3 });
        assert_eq!(span.sample_count(), 2);
    }

    #[test]
    fn test_valid_span_missing_channel() {
        let s = series(&[None, None]);
        assert!(s.valid_span("ASHK2").is_none());
        assert!(s.valid_span("LSHK2").is_none());
    }

    #[test]
    fn test_fixed_columns_resolve() {
        let s = series(&[Some(1.0)]);
        assert_eq!(s.column("V").unwrap(), vec![Some(100.0)]);
        assert_eq!(s.column("Weight on Bit").unwrap(), vec![None]);
        assert!(s.column("Gamma Ray").is_none());
    }

    #[test]
    fn test_corpus_names_sorted_and_unique() {
        let mut corpus = WellCorpus::new();
        corpus.insert(WellSeries::new("B", vec![]));
        corpus.insert(WellSeries::new("A", vec![]));
        assert!(corpus.insert(WellSeries::new("A", vec![])).is_some());
        let names: Vec<&str> = corpus.well_names().collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
