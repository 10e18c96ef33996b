//! FILENAME: core/chart-engine/src/series.rs
//! PURPOSE: Series shaping helpers: color bucketing, column ranges and
//! scatter symbol sizing.

use chart_dataset::{ChartDataSectionField, ChartDataset, ChartDatasetRow};
use chart_format::{to_formatted_value, CellValue};
use rustc_hash::FxHashMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Smallest symbol a scatter point is drawn with.
pub const MIN_SYMBOL_SIZE: f64 = 3.0;

const DEFAULT_SYMBOL_SCALE: f64 = 10.0;
const DEFAULT_DISTANCE: f64 = 100.0;

// ============================================================================
// COLOR BUCKETS
// ============================================================================

/// Rows sharing one formatted color value. Serializes as `{ key: [rows] }`.
#[derive(Debug, Clone)]
pub struct SeriesBucket<'a> {
    pub key: String,
    pub rows: Vec<&'a ChartDatasetRow>,
}

impl Serialize for SeriesBucket<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.rows)?;
        map.end()
    }
}

/// Partition rows by the formatted value of `color_field`, in first-seen order.
pub fn get_colorize_group_series_columns<'a>(
    dataset: &'a ChartDataset,
    color_field: &ChartDataSectionField,
) -> Vec<SeriesBucket<'a>> {
    let mut buckets: Vec<SeriesBucket<'a>> = Vec::new();
    let mut positions: FxHashMap<String, usize> = FxHashMap::default();

    for row in dataset {
        let raw = row.get_cell(color_field).cloned().unwrap_or_default();
        let key = to_formatted_value(&raw, color_field.format.as_ref()).display_value();

        match positions.get(&key) {
            Some(&pos) => buckets[pos].rows.push(row),
            None => {
                positions.insert(key.clone(), buckets.len());
                buckets.push(SeriesBucket { key, rows: vec![row] });
            }
        }
    }

    log::debug!(
        "colorized {} rows into {} series by {}",
        dataset.len(),
        buckets.len(),
        color_field.column_key()
    );
    buckets
}

// ============================================================================
// COLUMN RANGE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ColumnRange {
    fn default() -> Self {
        ColumnRange { min: 0.0, max: DEFAULT_DISTANCE }
    }
}

/// Numeric min/max of a column. Falls back to `0..100` when the field is
/// absent, the dataset is empty, or any cell is not a number.
pub fn get_data_column_max_and_min(dataset: &ChartDataset, field: Option<&ChartDataSectionField>) -> ColumnRange {
    let Some(field) = field else {
        return ColumnRange::default();
    };

    let values: Option<Vec<f64>> = dataset
        .column(field)
        .map(|cell| cell.and_then(CellValue::as_number))
        .collect();

    match values {
        Some(values) if !values.is_empty() => ColumnRange {
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        },
        _ => {
            log::debug!("no numeric range for {}, using default", field.column_key());
            ColumnRange::default()
        }
    }
}

// ============================================================================
// SCATTER SYMBOL SIZE
// ============================================================================

/// Builds the symbol size function of a scatter series.
///
/// The value at `value_index` is scaled linearly from `min(0, min)..max` onto
/// `0..20 * cycle_ratio` and clamped below at [`MIN_SYMBOL_SIZE`]. A zero
/// distance is treated as 100, a zero ratio as 1. Missing or non-numeric
/// values get the minimum size.
pub fn get_scatter_symbol_size_fn(
    value_index: usize,
    max: f64,
    min: f64,
    cycle_ratio: f64,
) -> impl Fn(&[CellValue]) -> f64 {
    let min = min.min(0.0);
    let distance = if max - min == 0.0 { DEFAULT_DISTANCE } else { max - min };
    let ratio = if cycle_ratio == 0.0 || !cycle_ratio.is_finite() { 1.0 } else { cycle_ratio };

    move |values: &[CellValue]| match values.get(value_index).and_then(CellValue::as_number) {
        Some(value) => MIN_SYMBOL_SIZE.max(((value - min) / distance) * ratio * DEFAULT_SYMBOL_SCALE * 2.0),
        None => MIN_SYMBOL_SIZE,
    }
}
