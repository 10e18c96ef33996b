//! FILENAME: core/chart-engine/src/tooltip.rs
//! PURPOSE: Tooltip text for hovered chart series.
//! CONTEXT: A tooltip is one `"<field>: <value>"` line per configured field,
//! joined with `<br />`. Values come from the hovered point's row data, keyed
//! by each field's configured column key.

use std::collections::HashMap;

use chart_dataset::{get_column_render_name, ChartDataSectionField, ChartDataset};
use chart_format::{to_formatted_value, CellValue};
use serde::{Deserialize, Serialize};

pub const TOOLTIP_SEPARATOR: &str = "<br />";

const EMPTY_VALUE: &str = "-";

/// The point under the cursor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TooltipData {
    pub name: Option<String>,
    pub row_data: HashMap<String, CellValue>,
}

/// What the renderer reports about the hovered element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TooltipParam {
    pub series_name: Option<String>,
    pub component_type: Option<String>,
    pub data: Option<TooltipData>,
}

impl TooltipParam {
    /// `data.name` when set, otherwise the series name.
    fn hovered_name(&self) -> &str {
        self.data
            .as_ref()
            .and_then(|data| data.name.as_deref())
            .filter(|name| !name.is_empty())
            .or(self.series_name.as_deref())
            .unwrap_or_default()
    }

    fn row_value(&self, dataset: &ChartDataset, field: &ChartDataSectionField) -> Option<&CellValue> {
        let row_data = &self.data.as_ref()?.row_data;
        let key = dataset.get_field_origin_key(field);
        row_data.get(&key).or_else(|| {
            row_data
                .iter()
                .find(|(candidate, _)| candidate.eq_ignore_ascii_case(&key))
                .map(|(_, value)| value)
        })
    }
}

/// `"<render name>: <formatted value>"`, with `-` for a missing value.
pub fn value_formatter(field: Option<&ChartDataSectionField>, value: Option<&CellValue>) -> String {
    let rendered = match value {
        Some(value) if !value.is_null() => {
            to_formatted_value(value, field.and_then(|f| f.format.as_ref())).display_value()
        }
        _ => EMPTY_VALUE.to_string(),
    };
    format!("{}: {}", get_column_render_name(field), rendered)
}

fn tooltip_lines<'a>(
    dataset: &ChartDataset,
    param: &TooltipParam,
    fields: impl IntoIterator<Item = &'a ChartDataSectionField>,
) -> String {
    fields
        .into_iter()
        .map(|field| value_formatter(Some(field), param.row_value(dataset, field)))
        .collect::<Vec<_>>()
        .join(TOOLTIP_SEPARATOR)
}

/// Tooltip for a rectangular (cartesian) series. Only series hovers produce
/// text, and only for the aggregate whose render name is the hovered name.
/// Lines: group, color, the hovered aggregate, size, info.
pub fn get_series_tooltips_rectangular(
    dataset: &ChartDataset,
    param: &TooltipParam,
    group_configs: &[ChartDataSectionField],
    color_configs: &[ChartDataSectionField],
    aggregate_configs: &[ChartDataSectionField],
    info_configs: &[ChartDataSectionField],
    size_configs: &[ChartDataSectionField],
) -> String {
    if param.component_type.as_deref() != Some("series") {
        return String::new();
    }

    let hovered = param.hovered_name();
    let Some(aggregate) = aggregate_configs
        .iter()
        .find(|config| config.render_name() == hovered)
    else {
        log::debug!("no aggregate rendered as {:?}", hovered);
        return String::new();
    };

    let fields = group_configs
        .iter()
        .chain(color_configs)
        .chain(std::iter::once(aggregate))
        .chain(size_configs)
        .chain(info_configs);
    tooltip_lines(dataset, param, fields)
}

/// Tooltip for a polar (pie, radar, ...) series: every configured field.
/// Lines: group, color, all aggregates, size, info.
pub fn get_series_tooltips_polar(
    dataset: &ChartDataset,
    param: &TooltipParam,
    group_configs: &[ChartDataSectionField],
    color_configs: &[ChartDataSectionField],
    aggregate_configs: &[ChartDataSectionField],
    info_configs: &[ChartDataSectionField],
    size_configs: &[ChartDataSectionField],
) -> String {
    let fields = group_configs
        .iter()
        .chain(color_configs)
        .chain(aggregate_configs)
        .chain(size_configs)
        .chain(info_configs);
    tooltip_lines(dataset, param, fields)
}
