// Data structures for decoded CAN captures

use serde::Serialize;

use crate::core::constants::*;
use crate::core::error::CanLogError;

/// One capture row, all eight columns kept as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub fields: [String; COLUMN_COUNT],
}

impl RawRow {
    pub fn new(fields: [String; COLUMN_COUNT]) -> Self {
        Self { fields }
    }

    pub fn time(&self) -> &str {
        &self.fields[TIME_COLUMN]
    }

    pub fn can_id(&self) -> &str {
        &self.fields[CAN_ID_COLUMN]
    }

    pub fn data(&self) -> &str {
        &self.fields[DATA_COLUMN]
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        COLUMNS
            .iter()
            .position(|name| *name == column)
            .map(|idx| self.fields[idx].as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTable {
    pub dialect: Dialect,
    pub rows: Vec<RawRow>,
}

impl RowTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecodedSample {
    pub elapsed_seconds: f64,
    pub value: f64,
}

/// Pressure series for one capture, in source row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSeries {
    pub file_name: String,
    pub samples: Vec<DecodedSample>,
}

impl SampleSeries {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// File name without a trailing `.csv`.
    pub fn display_name(&self) -> &str {
        self.file_name
            .strip_suffix(".csv")
            .unwrap_or(&self.file_name)
    }

    /// (min, max) elapsed seconds.
    pub fn time_bounds(&self) -> Option<(f64, f64)> {
        let mut iter = self.samples.iter().map(|s| s.elapsed_seconds);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }

    pub fn within(&self, start: f64, end: f64) -> Vec<DecodedSample> {
        self.samples
            .iter()
            .filter(|s| s.elapsed_seconds >= start && s.elapsed_seconds <= end)
            .copied()
            .collect()
    }
}

#[derive(Debug)]
pub enum FileResult {
    Empty {
        file_name: String,
        reason: CanLogError,
    },
    Samples(SampleSeries),
}

impl FileResult {
    pub fn file_name(&self) -> &str {
        match self {
            FileResult::Empty { file_name, .. } => file_name,
            FileResult::Samples(series) => &series.file_name,
        }
    }

    pub fn samples(&self) -> Option<&SampleSeries> {
        match self {
            FileResult::Samples(series) => Some(series),
            FileResult::Empty { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&CanLogError> {
        match self {
            FileResult::Empty { reason, .. } => Some(reason),
            FileResult::Samples(_) => None,
        }
    }
}

/// Default plot ranges for one or more series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub x_min: f64,
    pub x_max: f64,
    pub x_step: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl AxisRange {
    pub fn for_series(series: &SampleSeries) -> Self {
        Self::overlay(std::iter::once(series))
    }

    /// Union of the time bounds; 0..0 when nothing is selected.
    pub fn overlay<'a, I>(series: I) -> Self
    where
        I: IntoIterator<Item = &'a SampleSeries>,
    {
        let (x_min, x_max) = series
            .into_iter()
            .filter_map(SampleSeries::time_bounds)
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
            .unwrap_or((0.0, 0.0));

        let span = x_max - x_min;
        let x_step = if span > 0.0 { span / 100.0 } else { 0.01 };

        Self {
            x_min,
            x_max,
            x_step,
            y_min: 0.0,
            y_max: PLOT_Y_CEILING,
        }
    }
}
