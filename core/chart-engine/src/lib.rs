//! FILENAME: core/chart-engine/src/lib.rs
//! Chart composition subsystem.
//!
//! Sits on top of `chart-dataset` and `chart-format` and turns a chart's
//! configuration plus its dataset into the pieces a renderer needs.
//!
//! Layers:
//! - `config`: The configuration document, requirement matching, migration seam
//! - `style_tree`: Path lookups over style / setting trees
//! - `drill`: Drill-down cursor over group hierarchies
//! - `header`: Table header reconciliation
//! - `series`: Color buckets, column ranges, scatter sizing
//! - `reference`: Reference line / area geometry
//! - `tooltip`: Tooltip text

pub mod config;
pub mod drill;
pub mod error;
pub mod header;
pub mod reference;
pub mod series;
pub mod style_tree;
pub mod tooltip;

pub use config::{
    is_match_requirement, load_chart_configs, ChartConfig, ChartMetadata, ChartRequirement,
    FieldCountLimit, WidgetMigration, WidgetRecord,
};
pub use drill::{get_drillable_rows, ChartDrillOption, DrillCondition, DrillLevel};
pub use error::ConfigError;
pub use header::{get_unused_header_rows, TableHeaderNode};
pub use reference::{get_reference, ChartReference, MarkArea, MarkLine, ReferenceValueType};
pub use series::{
    get_colorize_group_series_columns, get_data_column_max_and_min, get_scatter_symbol_size_fn,
    ColumnRange, SeriesBucket,
};
pub use style_tree::{
    find_node, get_grid_style, get_rows, get_setting_rows, get_setting_value, get_style_value,
    get_style_value_by_group, get_styles, get_value, get_value_with, ChartStyleConfig, GridStyle,
};
pub use tooltip::{
    get_series_tooltips_polar, get_series_tooltips_rectangular, value_formatter, TooltipData,
    TooltipParam,
};
