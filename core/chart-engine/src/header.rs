//! FILENAME: core/chart-engine/src/header.rs
//! PURPOSE: Reconcile a table's header tree with its configured fields.
//! CONTEXT: Table charts let users arrange fields into a nested header tree.
//! When fields are added to the data section afterwards, the ones the tree
//! does not yet reference must be appended.

use chart_dataset::ChartDataSectionField;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// A node of a table header tree. Group nodes are containers only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableHeaderNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    pub col_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub is_group: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TableHeaderNode>,
}

impl TableHeaderNode {
    pub fn leaf(col_name: &str) -> Self {
        TableHeaderNode {
            col_name: col_name.to_string(),
            ..Default::default()
        }
    }

    pub fn group(label: &str, children: Vec<TableHeaderNode>) -> Self {
        TableHeaderNode {
            label: Some(label.to_string()),
            is_group: true,
            children,
            ..Default::default()
        }
    }
}

fn collect_consumed<'a>(nodes: &'a [TableHeaderNode], consumed: &mut FxHashSet<&'a str>) {
    for node in nodes {
        if !node.is_group {
            consumed.insert(node.col_name.as_str());
        }
        collect_consumed(&node.children, consumed);
    }
}

/// Column names referenced anywhere in the header tree.
pub fn consumed_columns(tree: &[TableHeaderNode]) -> FxHashSet<&str> {
    let mut consumed = FxHashSet::default();
    collect_consumed(tree, &mut consumed);
    consumed
}

/// Fields of `all_rows` not referenced by the header tree, in `all_rows` order.
pub fn get_unused_header_rows(
    all_rows: &[ChartDataSectionField],
    tree: &[TableHeaderNode],
) -> Vec<ChartDataSectionField> {
    let consumed = consumed_columns(tree);
    all_rows
        .iter()
        .filter(|row| !consumed.contains(row.col_name.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(names: &[&str]) -> Vec<ChartDataSectionField> {
        names.iter().map(|name| ChartDataSectionField::new(name)).collect()
    }

    fn names(rows: &[ChartDataSectionField]) -> Vec<&str> {
        rows.iter().map(|row| row.col_name.as_str()).collect()
    }

    fn header_tree(outer_is_group: bool, inner_is_group: bool) -> Vec<TableHeaderNode> {
        serde_json::from_value(json!([
            { "colName": "a", "isGroup": outer_is_group, "children": [
                { "colName": "name1" },
                { "colName": "name2", "isGroup": inner_is_group, "children": [
                    { "colName": "name3" },
                    { "colName": "name4" }
                ]}
            ]},
            { "colName": "name5" }
        ]))
        .unwrap()
    }

    #[test]
    fn test_unused_rows_keep_input_order() {
        let tree = header_tree(false, false);

        let all = fields(&["name1", "name2", "name3", "name4", "name5", "name6", "name7"]);
        assert_eq!(names(&get_unused_header_rows(&all, &tree)), vec!["name6", "name7"]);

        let reversed = fields(&["name7", "name6", "name5", "name4", "name3", "name2", "name1"]);
        assert_eq!(names(&get_unused_header_rows(&reversed, &tree)), vec!["name7", "name6"]);
    }

    #[test]
    fn test_group_nodes_are_not_consumed() {
        let all = fields(&["name1", "name2", "name3", "name4", "name5", "name6", "name7"]);
        assert_eq!(
            names(&get_unused_header_rows(&all, &header_tree(true, true))),
            vec!["name2", "name6", "name7"]
        );
    }

    #[test]
    fn test_empty_tree_uses_nothing() {
        let all = fields(&["a", "b"]);
        assert_eq!(get_unused_header_rows(&all, &[]), all);
    }

    #[test]
    fn test_builders() {
        let tree = vec![TableHeaderNode::group(
            "g",
            vec![TableHeaderNode::leaf("a"), TableHeaderNode::leaf("b")],
        )];
        let consumed = consumed_columns(&tree);
        assert!(consumed.contains("a"));
        assert!(consumed.contains("b"));
        assert!(!consumed.contains(""));
    }
}
