//! FILENAME: core/chart-engine/src/config.rs
//! PURPOSE: The chart configuration document and requirement matching.
//! CONTEXT: A chart configuration is `{ datas, styles, settings }`: data
//! sections the user filled with fields, plus style and setting trees. A chart
//! type publishes requirements (how many group / aggregate fields it accepts)
//! and `is_match_requirement` decides whether a configuration fits.

use chart_dataset::{ChartDataConfig, ChartDataSectionField, ChartDataSectionType};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::style_tree::ChartStyleConfig;

// ============================================================================
// CONFIGURATION DOCUMENT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    pub datas: Vec<ChartDataConfig>,
    pub styles: Vec<ChartStyleConfig>,
    pub settings: Vec<ChartStyleConfig>,
}

impl ChartConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn sections(&self, section_type: ChartDataSectionType) -> impl Iterator<Item = &ChartDataConfig> {
        self.datas
            .iter()
            .filter(move |section| section.is_type(section_type))
    }

    /// All fields of every section of `section_type`, in configuration order.
    pub fn section_fields(&self, section_type: ChartDataSectionType) -> Vec<&ChartDataSectionField> {
        self.sections(section_type)
            .flat_map(|section| section.rows.iter())
            .collect()
    }

    /// Fails on the first section marked `required` that holds no fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self
            .datas
            .iter()
            .find(|section| section.required && section.rows.is_empty())
        {
            Some(section) => Err(ConfigError::RequiredSectionEmpty(
                section
                    .label
                    .clone()
                    .or_else(|| section.key.clone())
                    .unwrap_or_default(),
            )),
            None => Ok(()),
        }
    }
}

// ============================================================================
// REQUIREMENTS
// ============================================================================

/// Accepted field count: an exact number or an inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldCountLimit {
    Exact(usize),
    Range(usize, usize),
}

impl FieldCountLimit {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            FieldCountLimit::Exact(n) => count == n,
            FieldCountLimit::Range(min, max) => (min..=max).contains(&count),
        }
    }
}

/// One accepted shape. An absent limit accepts any count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartRequirement {
    pub group: Option<FieldCountLimit>,
    pub aggregate: Option<FieldCountLimit>,
}

impl ChartRequirement {
    fn accepts(&self, group_count: usize, aggregate_count: usize) -> bool {
        let within = |limit: Option<FieldCountLimit>, count| limit.map_or(true, |l| l.accepts(count));
        within(self.group, group_count) && within(self.aggregate, aggregate_count)
    }
}

/// What a chart type declares about itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub requirements: Vec<ChartRequirement>,
}

/// True when at least one requirement accepts the configuration's group and
/// aggregate field counts.
pub fn is_match_requirement(meta: &ChartMetadata, config: &ChartConfig) -> bool {
    let group_count = config.section_fields(ChartDataSectionType::Group).len();
    let aggregate_count = config.section_fields(ChartDataSectionType::Aggregate).len();

    let matched = meta
        .requirements
        .iter()
        .any(|requirement| requirement.accepts(group_count, aggregate_count));

    log::trace!(
        "requirement check for {:?}: group={}, aggregate={}, matched={}",
        meta.id,
        group_count,
        aggregate_count,
        matched
    );
    matched
}

// ============================================================================
// MIGRATION SEAM
// ============================================================================

/// A stored widget as persisted by the host: its configuration document plus
/// any relation records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetRecord {
    pub config: String,
    pub relations: Vec<serde_json::Value>,
}

/// Upgrades stored widget records to the current configuration layout.
/// Implemented by the host; this crate only consumes the output.
pub trait WidgetMigration {
    fn migrate(&self, records: Vec<WidgetRecord>) -> Vec<WidgetRecord>;
}

/// Migrate then parse each record's chart configuration.
pub fn load_chart_configs<M: WidgetMigration + ?Sized>(
    migration: &M,
    records: Vec<WidgetRecord>,
) -> Vec<Result<ChartConfig, ConfigError>> {
    migration
        .migrate(records)
        .iter()
        .map(|record| ChartConfig::from_json_str(&record.config))
        .collect()
}
