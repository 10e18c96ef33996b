//! FILENAME: core/chart-dataset/src/lib.rs
//! Chart dataset subsystem.
//!
//! Turns a raw query result (rows of cells plus column metadata) into a
//! case-insensitive, field-addressable row model. Depends on `chart-format`
//! only for the shared `CellValue` and `FieldFormat` types.
//!
//! Layers:
//! - `field`: Serializable field and section configuration (what the user picked)
//! - `key`: Parsing of aggregate-wrapped column names
//! - `dataset`: The shared index, rows, and dataset

pub mod dataset;
pub mod field;
pub mod key;

pub use dataset::{
    transform_to_dataset, transform_to_object_array, ChartDataset, ChartDatasetMeta,
    ChartDatasetRow, FieldIndex,
};
pub use field::{
    compose_key, get_column_render_name, get_value_by_column_key, ChartDataConfig,
    ChartDataSectionField, ChartDataSectionType, FieldAlias, UNKNOWN_FIELD_NAME,
};
pub use key::{to_lookup_key, FieldKey};
