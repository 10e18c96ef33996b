//! FILENAME: core/chart-dataset/src/field.rs
//! Chart field configuration - what a chart section is built from.
//!
//! A chart's data configuration is a list of sections (group, aggregate,
//! color, ...), each holding the fields the user dragged into it. These
//! structures are:
//! - Deserialized straight from the widget's JSON configuration
//! - Compared case-insensitively on `{colName, aggregate}`
//! - Immutable snapshots of user intent

use chart_format::FieldFormat;
use serde::{Deserialize, Serialize};

/// Render name used when a field is missing entirely.
pub const UNKNOWN_FIELD_NAME: &str = "[unknown]";

// ============================================================================
// FIELD DESCRIPTOR
// ============================================================================

/// User-facing display override for a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldAlias {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

/// A logical column in a chart section, optionally wrapped by an aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartDataSectionField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    pub col_name: String,

    /// Aggregate function name such as "SUM". Empty means none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<String>,

    /// Datasource type of the column ("STRING", "NUMERIC", "DATE").
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<FieldAlias>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<FieldFormat>,
}

impl ChartDataSectionField {
    pub fn new(col_name: &str) -> Self {
        ChartDataSectionField {
            col_name: col_name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_aggregate(mut self, aggregate: &str) -> Self {
        self.aggregate = Some(aggregate.to_string());
        self
    }

    pub fn with_uid(mut self, uid: &str) -> Self {
        self.uid = Some(uid.to_string());
        self
    }

    pub fn with_alias(mut self, name: &str) -> Self {
        self.alias = Some(FieldAlias {
            name: Some(name.to_string()),
            desc: None,
        });
        self
    }

    pub fn with_format(mut self, format: FieldFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// The aggregate function, treating an empty string as absent.
    pub fn aggregate(&self) -> Option<&str> {
        self.aggregate.as_deref().filter(|agg| !agg.is_empty())
    }

    /// `colName`, or `AGG(colName)` when aggregated. Keeps configured casing.
    pub fn column_key(&self) -> String {
        compose_key(&self.col_name, self.aggregate())
    }

    /// The label shown to users: alias name first, then the column key.
    pub fn render_name(&self) -> String {
        match self.alias.as_ref().and_then(|alias| alias.name.as_deref()) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.column_key(),
        }
    }

    /// Case-insensitive equality over `{colName, aggregate}`.
    pub fn same_column(&self, other: &ChartDataSectionField) -> bool {
        same_column(&self.col_name, self.aggregate(), &other.col_name, other.aggregate())
    }
}

/// Build a field key from a column name and an optional aggregate.
pub fn compose_key(col_name: &str, aggregate: Option<&str>) -> String {
    match aggregate.filter(|agg| !agg.is_empty()) {
        Some(agg) => format!("{}({})", agg, col_name),
        None => col_name.to_string(),
    }
}

pub(crate) fn same_column(
    col_a: &str,
    agg_a: Option<&str>,
    col_b: &str,
    agg_b: Option<&str>,
) -> bool {
    let agg_eq = match (agg_a, agg_b) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        (None, None) => true,
        _ => false,
    };
    agg_eq && col_a.to_uppercase() == col_b.to_uppercase()
}

/// Column key for an optional field; `""` when there is no field.
pub fn get_value_by_column_key(field: Option<&ChartDataSectionField>) -> String {
    field.map(ChartDataSectionField::column_key).unwrap_or_default()
}

/// Render name for an optional field; `"[unknown]"` when there is no field.
pub fn get_column_render_name(field: Option<&ChartDataSectionField>) -> String {
    field
        .map(ChartDataSectionField::render_name)
        .unwrap_or_else(|| UNKNOWN_FIELD_NAME.to_string())
}

// ============================================================================
// SECTIONS
// ============================================================================

/// The role a data section plays in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartDataSectionType {
    Group,
    Aggregate,
    Color,
    Info,
    Size,
    Filter,
    Mixed,
    #[serde(other)]
    Unknown,
}

/// One section of a chart's data configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartDataConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub section_type: Option<ChartDataSectionType>,

    pub required: bool,

    /// Group sections only: rows form a drill hierarchy instead of being
    /// plotted all at once.
    pub drillable: bool,

    pub rows: Vec<ChartDataSectionField>,
}

impl ChartDataConfig {
    pub fn new(section_type: ChartDataSectionType, rows: Vec<ChartDataSectionField>) -> Self {
        ChartDataConfig {
            section_type: Some(section_type),
            rows,
            ..Default::default()
        }
    }

    pub fn is_type(&self, section_type: ChartDataSectionType) -> bool {
        self.section_type == Some(section_type)
    }
}
