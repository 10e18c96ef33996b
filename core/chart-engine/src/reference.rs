//! FILENAME: core/chart-engine/src/reference.rs
//! PURPOSE: Builds reference line / area geometry for a metric series.
//! CONTEXT: Reference settings live under `reference.panel.configuration`, one
//! tab per metric, each holding a `markLine` and a `markArea` node. A value is
//! either a constant or an aggregate (average / max / min) of the metric
//! column. Aggregates only apply to the series whose field uid the tab names.

use chart_dataset::{ChartDataSectionField, ChartDataset};
use chart_format::{number_to_json, CellValue};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::style_tree::{get_setting_rows, ChartStyleConfig};

const REFERENCE_PATH: &str = "reference.panel.configuration";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkLine {
    pub data: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkArea {
    pub data: Vec<[Value; 2]>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartReference {
    pub mark_line: MarkLine,
    pub mark_area: MarkArea,
}

/// How a reference value is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceValueType {
    Constant,
    Average,
    Max,
    Min,
}

impl ReferenceValueType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "constant" => Some(ReferenceValueType::Constant),
            "average" => Some(ReferenceValueType::Average),
            "max" => Some(ReferenceValueType::Max),
            "min" => Some(ReferenceValueType::Min),
            _ => None,
        }
    }
}

/// The keys one end of a reference reads its value from.
struct ValueKeys {
    value_type: &'static str,
    constant: &'static str,
    metric: &'static str,
}

const LINE_KEYS: ValueKeys = ValueKeys {
    value_type: "valueType",
    constant: "constantValue",
    metric: "metric",
};

const AREA_START_KEYS: ValueKeys = ValueKeys {
    value_type: "startValueType",
    constant: "startConstantValue",
    metric: "startMetric",
};

const AREA_END_KEYS: ValueKeys = ValueKeys {
    value_type: "endValueType",
    constant: "endConstantValue",
    metric: "endMetric",
};

struct ReferenceContext<'a> {
    dataset: &'a ChartDataset,
    metric: &'a ChartDataSectionField,
    axis_key: &'static str,
}

impl ReferenceContext<'_> {
    fn value(&self, mark: &ChartStyleConfig, keys: &ValueKeys) -> Option<Value> {
        let value_type = mark
            .child_value(keys.value_type)
            .and_then(Value::as_str)
            .and_then(ReferenceValueType::parse)?;

        if value_type == ReferenceValueType::Constant {
            return mark.child_value(keys.constant).cloned();
        }

        let metric_uid = mark.child_value(keys.metric).and_then(Value::as_str)?;
        if self.metric.uid.as_deref() != Some(metric_uid) {
            return None;
        }

        let values: Vec<f64> = self
            .dataset
            .column(self.metric)
            .filter_map(|cell| cell.and_then(CellValue::as_number))
            .collect();
        if values.is_empty() {
            log::debug!("reference on {} has no numeric values", self.metric.column_key());
            return None;
        }

        let result = match value_type {
            ReferenceValueType::Average => values.iter().sum::<f64>() / values.len() as f64,
            ReferenceValueType::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            ReferenceValueType::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            ReferenceValueType::Constant => return None,
        };
        Some(number_to_json(result))
    }

    fn point(&self, value: Value, mark: &ChartStyleConfig) -> Map<String, Value> {
        let mut point = Map::new();
        point.insert(self.axis_key.to_string(), value);
        if let Some(name) = mark.label.as_ref().filter(|name| !name.is_empty()) {
            point.insert("name".to_string(), Value::from(name.as_str()));
        }
        point.insert("label".to_string(), Value::Object(label(mark)));
        point
    }

    fn mark_line(&self, mark: &ChartStyleConfig) -> Option<Value> {
        if !enabled(mark, "enableMarkLine") {
            return None;
        }
        let value = self.value(mark, &LINE_KEYS)?;
        let mut point = self.point(value, mark);
        if let Some(line_style) = mark.child_value("lineStyle") {
            point.insert("lineStyle".to_string(), line_style.clone());
        }
        Some(Value::Object(point))
    }

    fn mark_area(&self, mark: &ChartStyleConfig) -> Option<[Value; 2]> {
        if !enabled(mark, "enableMarkArea") {
            return None;
        }
        let start = self.value(mark, &AREA_START_KEYS)?;
        let end = self.value(mark, &AREA_END_KEYS)?;
        let item_style = item_style(mark);

        let edge = |value| {
            let mut point = self.point(value, mark);
            point.insert("itemStyle".to_string(), item_style.clone());
            Value::Object(point)
        };
        Some([edge(start), edge(end)])
    }
}

fn enabled(mark: &ChartStyleConfig, key: &str) -> bool {
    mark.child_value(key).and_then(Value::as_bool).unwrap_or(false)
}

fn label(mark: &ChartStyleConfig) -> Map<String, Value> {
    let mut label = Map::new();
    if let Some(show) = mark.child_value("showLabel") {
        label.insert("show".to_string(), show.clone());
    }
    if let Some(position) = mark.child_value("position") {
        label.insert("position".to_string(), position.clone());
    }
    if let Some(Value::Object(font)) = mark.child_value("font") {
        for (key, value) in font {
            label.insert(key.clone(), value.clone());
        }
    }
    label
}

fn item_style(mark: &ChartStyleConfig) -> Value {
    let border = mark.child_value("borderStyle");
    let border_prop = |name: &str| border.and_then(|b| b.get(name)).cloned();

    let mut style = Map::new();
    let entries = [
        ("opacity", mark.child_value("opacity").cloned()),
        ("color", mark.child_value("backgroundColor").cloned()),
        ("borderColor", border_prop("color")),
        ("borderWidth", border_prop("width")),
        ("borderType", border_prop("type")),
    ];
    for (key, value) in entries {
        if let Some(value) = value {
            style.insert(key.to_string(), value);
        }
    }
    Value::Object(style)
}

/// Reference line and area geometry for `metric`, read from every tab under
/// `reference.panel.configuration`. Values go on `xAxis` for horizontal
/// charts and `yAxis` otherwise. Disabled or unresolvable entries are skipped.
pub fn get_reference(
    settings: &[ChartStyleConfig],
    dataset: &ChartDataset,
    metric: &ChartDataSectionField,
    is_horizontal: bool,
) -> ChartReference {
    let context = ReferenceContext {
        dataset,
        metric,
        axis_key: if is_horizontal { "xAxis" } else { "yAxis" },
    };

    let tabs = get_setting_rows(settings, REFERENCE_PATH).unwrap_or_default();
    let marks = |key: &'static str| {
        tabs.iter()
            .flat_map(|tab| tab.children())
            .filter(move |node| node.key == key)
    };

    ChartReference {
        mark_line: MarkLine {
            data: marks("markLine").filter_map(|mark| context.mark_line(mark)).collect(),
        },
        mark_area: MarkArea {
            data: marks("markArea").filter_map(|mark| context.mark_area(mark)).collect(),
        },
    }
}
