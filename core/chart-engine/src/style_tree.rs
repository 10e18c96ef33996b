//! FILENAME: core/chart-engine/src/style_tree.rs
//! PURPOSE: Path lookups over nested style / setting configuration trees.
//! CONTEXT: Chart styles and settings are trees of `{ key, value?, rows? }`
//! nodes, e.g. `margin.marginLeft` or
//! `reference.panel.configuration.<uid>.markLine.enableMarkLine`. Every
//! accessor here is built on one path-descent primitive and returns `None`
//! instead of failing when a segment is missing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One node of a style or setting tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStyleConfig {
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<ChartStyleConfig>>,

    /// Any other named property carried by the node (`comType`, `options`, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ChartStyleConfig {
    pub fn leaf(key: &str, value: Value) -> Self {
        ChartStyleConfig {
            key: key.to_string(),
            value: Some(value),
            ..Default::default()
        }
    }

    pub fn branch(key: &str, rows: Vec<ChartStyleConfig>) -> Self {
        ChartStyleConfig {
            key: key.to_string(),
            rows: Some(rows),
            ..Default::default()
        }
    }

    pub fn children(&self) -> &[ChartStyleConfig] {
        self.rows.as_deref().unwrap_or_default()
    }

    /// A named property: `"value"` reads the node value, anything else reads
    /// the extra properties.
    pub fn property(&self, name: &str) -> Option<&Value> {
        match name {
            "value" => self.value.as_ref(),
            other => self.extra.get(other),
        }
    }

    /// Value of the direct child with `key`.
    pub fn child_value(&self, key: &str) -> Option<&Value> {
        self.children()
            .iter()
            .find(|child| child.key == key)
            .and_then(|child| child.value.as_ref())
    }
}

/// Descend `path`, matching each segment against `key` at the current level.
/// The first match wins. An empty path matches nothing.
pub fn find_node<'a, S: AsRef<str>>(nodes: &'a [ChartStyleConfig], path: &[S]) -> Option<&'a ChartStyleConfig> {
    let mut level = nodes;
    let mut found = None;

    for segment in path {
        let node = level.iter().find(|node| node.key == segment.as_ref())?;
        level = node.children();
        found = Some(node);
    }

    found
}

/// Descend `path` and apply `project` to the deepest node.
pub fn get_value_with<'a, S, T, F>(nodes: &'a [ChartStyleConfig], path: &[S], project: F) -> Option<T>
where
    S: AsRef<str>,
    F: FnOnce(&'a ChartStyleConfig) -> Option<T>,
{
    find_node(nodes, path).and_then(project)
}

/// Property `target_key` (default `"value"`) of the node at `path`.
pub fn get_value<'a, S: AsRef<str>>(
    nodes: &'a [ChartStyleConfig],
    path: &[S],
    target_key: Option<&str>,
) -> Option<&'a Value> {
    get_value_with(nodes, path, |node| node.property(target_key.unwrap_or("value")))
}

/// Children of the node at `path`.
pub fn get_rows<'a, S: AsRef<str>>(nodes: &'a [ChartStyleConfig], path: &[S]) -> Option<&'a [ChartStyleConfig]> {
    get_value_with(nodes, path, |node| node.rows.as_deref())
}

/// For each target key, the value of the child with that key under the node
/// at `path`. The output is parallel to `target_keys`.
pub fn get_styles<'a, S: AsRef<str>>(
    nodes: &'a [ChartStyleConfig],
    path: &[S],
    target_keys: &[&str],
) -> Vec<Option<&'a Value>> {
    let parent = find_node(nodes, path);
    target_keys
        .iter()
        .map(|key| parent.and_then(|node| node.child_value(key)))
        .collect()
}

pub fn get_style_value<'a, S: AsRef<str>>(nodes: &'a [ChartStyleConfig], path: &[S]) -> Option<&'a Value> {
    get_value(nodes, path, None)
}

/// Lookup by a dot-separated path such as `"reference.panel.configuration"`.
pub fn get_setting_value<'a>(
    nodes: &'a [ChartStyleConfig],
    dotted_path: &str,
    target_key: &str,
) -> Option<&'a Value> {
    let path: Vec<&str> = dotted_path.split('.').collect();
    get_value(nodes, &path, Some(target_key))
}

/// Children at a dot-separated path.
pub fn get_setting_rows<'a>(nodes: &'a [ChartStyleConfig], dotted_path: &str) -> Option<&'a [ChartStyleConfig]> {
    let path: Vec<&str> = dotted_path.split('.').collect();
    get_rows(nodes, &path)
}

pub fn get_style_value_by_group<'a>(
    nodes: &'a [ChartStyleConfig],
    group: &str,
    key: &str,
) -> Option<&'a Value> {
    get_style_value(nodes, &[group, key])
}

// ============================================================================
// GRID LAYOUT
// ============================================================================

/// Layout margins of a rectangular chart grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contain_label: Option<Value>,
}

pub fn get_grid_style(styles: &[ChartStyleConfig]) -> GridStyle {
    let values = get_styles(
        styles,
        &["margin"],
        &["containLabel", "marginLeft", "marginRight", "marginBottom", "marginTop"],
    );
    let take = |i: usize| values.get(i).copied().flatten().cloned();

    GridStyle {
        left: take(1),
        right: take(2),
        bottom: take(3),
        top: take(4),
        contain_label: take(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: Value) -> Vec<ChartStyleConfig> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_get_value_default_target() {
        let nodes = tree(json!([{ "key": "1", "value": 1 }, { "key": "2", "value": 2 }]));
        assert_eq!(get_value(&nodes, &["1"], Some("value")), Some(&json!(1)));
        assert_eq!(get_value(&nodes, &["1"], None), Some(&json!(1)));
    }

    #[test]
    fn test_get_value_other_property() {
        let nodes = tree(json!([{ "key": "1", "other": 1 }, { "key": "2", "value": 2 }]));
        assert_eq!(get_value(&nodes, &["1"], Some("other")), Some(&json!(1)));
        assert_eq!(get_value(&nodes, &["1"], Some("unknown")), None);
        assert_eq!(get_value(&nodes, &["unknown"], Some("value")), None);
    }

    #[test]
    fn test_get_value_target_must_be_on_deepest_node() {
        let nodes = tree(json!([
            { "key": "1", "other": 1, "rows": [{ "key": "1-1", "value": 11 }] },
            { "key": "2", "value": 2 }
        ]));
        assert_eq!(get_value(&nodes, &["1", "1-1"], Some("other")), None);
        assert_eq!(get_value(&nodes, &["1", "1-1"], None), Some(&json!(11)));
    }

    #[test]
    fn test_get_value_deep_path() {
        let nodes = tree(json!([
            { "key": "2", "value": 2 },
            { "key": "1", "value": 1, "rows": [
                { "key": "1-1", "value": 11, "rows": [
                    { "key": "1-1-1", "value": 111, "rows": [
                        { "key": "1-1-1-1", "value": 1111, "rows": [] },
                        { "key": "1-1-1-2", "value": 1112, "rows": [{ "key": "1-1-1-2-1", "value": 11121 }] }
                    ]}
                ]}
            ]}
        ]));
        assert_eq!(
            get_value(&nodes, &["1", "1-1", "1-1-1", "1-1-1-2", "1-1-1-2-1"], Some("value")),
            Some(&json!(11121))
        );
        assert_eq!(get_value::<&str>(&nodes, &[], None), None);
    }

    #[test]
    fn test_get_styles() {
        let nodes = tree(json!([
            { "key": "1", "value": 1, "rows": [
                { "key": "1-1", "value": 11 },
                { "key": "1-2", "value": 12, "rows": [
                    { "key": "1-2-1", "value": 121, "rows": [{ "key": "1-2-1-1", "value": 1211 }] },
                    { "key": "1-2-2", "other": 122 },
                    { "key": "1-2-3", "value": 123 }
                ]},
                { "key": "1-3", "value": 13 }
            ]},
            { "key": "2", "value": 2 }
        ]));

        assert_eq!(get_styles(&nodes, &["2"], &["1-1", "1-2"]), vec![None, None]);
        assert_eq!(
            get_styles(&nodes, &["1"], &["1-1", "1-3"]),
            vec![Some(&json!(11)), Some(&json!(13))]
        );
        assert_eq!(
            get_styles(&nodes, &["1", "1-2"], &["1-2-1", "1-2-2", "1-2-4"]),
            vec![Some(&json!(121)), None, None]
        );
    }

    #[test]
    fn test_wrappers() {
        let nodes = tree(json!([{ "key": "a", "rows": [{ "key": "a-1", "value": 1 }] }]));
        assert_eq!(get_style_value(&nodes, &["a", "a-1"]), Some(&json!(1)));
        assert_eq!(get_setting_value(&nodes, "a.a-1", "value"), Some(&json!(1)));
        assert_eq!(get_style_value_by_group(&nodes, "a", "a-1"), Some(&json!(1)));
        assert_eq!(get_setting_rows(&nodes, "a").map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_get_grid_style() {
        let nodes = tree(json!([{ "key": "margin", "rows": [
            { "key": "containLabel", "value": true },
            { "key": "marginLeft", "value": "5%" },
            { "key": "marginRight", "value": "5%" },
            { "key": "marginBottom", "value": "5%" },
            { "key": "marginTop", "value": "5%" }
        ]}]));

        assert_eq!(
            serde_json::to_string(&get_grid_style(&nodes)).unwrap(),
            r#"{"left":"5%","right":"5%","bottom":"5%","top":"5%","containLabel":true}"#
        );
    }

    #[test]
    fn test_missing_margin_yields_empty_grid() {
        assert_eq!(get_grid_style(&[]), GridStyle::default());
    }
}
