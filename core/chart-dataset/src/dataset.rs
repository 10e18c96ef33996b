//! FILENAME: core/chart-dataset/src/dataset.rs
//! Chart Dataset - random-access row/column view over one query result.
//!
//! The dataset is designed for:
//! - One O(columns) index build per query result, shared by every row
//! - Case-insensitive lookups by field descriptor or key string
//! - Two key casings: uppercased for lookups, configured casing for display
//!
//! Architecture:
//! - `FieldIndex` maps uppercased keys to column positions and remembers the
//!   display ("origin") casing of each column
//! - Each `ChartDatasetRow` owns its cells and holds an `Arc` to the index
//! - Nothing derived (formatted strings, buckets, ranges) is cached here

use std::collections::HashMap;
use std::ops::Index;
use std::sync::Arc;

use chart_format::CellValue;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::field::{ChartDataConfig, ChartDataSectionField};
use crate::key::{to_lookup_key, FieldKey};

// ============================================================================
// METADATA
// ============================================================================

/// Column metadata returned alongside a query result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartDatasetMeta {
    /// Column name, possibly aggregate-wrapped: "AVG(age)".
    pub name: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
}

impl ChartDatasetMeta {
    pub fn new(name: &str) -> Self {
        ChartDatasetMeta {
            name: name.to_string(),
            field_type: None,
        }
    }
}

// ============================================================================
// FIELD INDEX
// ============================================================================

#[derive(Debug, Clone)]
struct ColumnKey {
    /// Uppercased key, e.g. "AVG(AGE)".
    lookup: String,
    /// Configured casing when a section field matched, else the metadata name.
    origin: String,
}

/// Shared case-insensitive index from field key to column position.
#[derive(Debug, Clone, Default)]
pub struct FieldIndex {
    columns: Vec<ColumnKey>,
    positions: FxHashMap<String, usize>,
}

impl FieldIndex {
    pub fn build(metas: &[ChartDatasetMeta], sections: &[ChartDataConfig]) -> Self {
        let mut columns = Vec::with_capacity(metas.len());
        let mut positions = FxHashMap::default();
        positions.reserve(metas.len());

        for (position, meta) in metas.iter().enumerate() {
            let parsed = FieldKey::parse(&meta.name);
            let lookup = parsed.lookup_key();

            let origin = sections
                .iter()
                .flat_map(|section| section.rows.iter())
                .find(|field| parsed.matches(field))
                .map(ChartDataSectionField::column_key)
                .unwrap_or_else(|| meta.name.clone());

            // First column wins when a result repeats a key.
            positions.entry(lookup.clone()).or_insert(position);
            columns.push(ColumnKey { lookup, origin });
        }

        FieldIndex { columns, positions }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn position_of(&self, field: &ChartDataSectionField) -> Option<usize> {
        self.positions.get(&FieldKey::from_field(field).lookup_key()).copied()
    }

    pub fn position_of_key(&self, key: &str) -> Option<usize> {
        self.positions.get(&to_lookup_key(key)).copied()
    }

    /// Uppercased key of the column matching `field`.
    pub fn lookup_key(&self, field: &ChartDataSectionField) -> String {
        let key = FieldKey::from_field(field).lookup_key();
        match self.positions.get(&key) {
            Some(&position) => self.columns[position].lookup.clone(),
            None => key,
        }
    }

    /// Display-cased key of the column matching `field`. Falls back to the
    /// field's own key when the result has no such column.
    pub fn origin_key(&self, field: &ChartDataSectionField) -> String {
        match self.position_of(field) {
            Some(position) => self.columns[position].origin.clone(),
            None => field.column_key(),
        }
    }

    /// `(position, key)` for every column a key lookup can reach. A repeated
    /// key yields only its first column.
    fn keys(&self, case_sensitive: bool) -> impl Iterator<Item = (usize, &str)> {
        self.columns
            .iter()
            .enumerate()
            .filter(move |(position, column)| self.positions.get(&column.lookup) == Some(position))
            .map(move |(position, column)| {
                let key = if case_sensitive {
                    column.origin.as_str()
                } else {
                    column.lookup.as_str()
                };
                (position, key)
            })
    }
}

// ============================================================================
// ROW
// ============================================================================

/// One record of a chart dataset.
#[derive(Debug, Clone)]
pub struct ChartDatasetRow {
    cells: Vec<CellValue>,
    index: Arc<FieldIndex>,
}

impl ChartDatasetRow {
    pub fn new(cells: Vec<CellValue>, index: Arc<FieldIndex>) -> Self {
        ChartDatasetRow { cells, index }
    }

    pub fn raw(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn get_cell(&self, field: &ChartDataSectionField) -> Option<&CellValue> {
        self.index.position_of(field).and_then(|position| self.cells.get(position))
    }

    pub fn get_cell_by_key(&self, key: &str) -> Option<&CellValue> {
        self.index.position_of_key(key).and_then(|position| self.cells.get(position))
    }

    pub fn get_field_key(&self, field: &ChartDataSectionField) -> String {
        self.index.lookup_key(field)
    }

    pub fn get_field_origin_key(&self, field: &ChartDataSectionField) -> String {
        self.index.origin_key(field)
    }

    pub fn get_field_index(&self, field: &ChartDataSectionField) -> Option<usize> {
        self.index.position_of(field)
    }

    /// Uppercased key -> value.
    pub fn convert_to_object(&self) -> HashMap<String, CellValue> {
        self.to_object(false)
    }

    /// Configured-casing key -> value.
    pub fn convert_to_case_sensitive_object(&self) -> HashMap<String, CellValue> {
        self.to_object(true)
    }

    fn to_object(&self, case_sensitive: bool) -> HashMap<String, CellValue> {
        self.index
            .keys(case_sensitive)
            .filter_map(|(position, key)| Some((key.to_string(), self.cells.get(position)?.clone())))
            .collect()
    }

    pub(crate) fn shares_index(&self, index: &Arc<FieldIndex>) -> bool {
        Arc::ptr_eq(&self.index, index)
    }
}

impl Serialize for ChartDatasetRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.cells.serialize(serializer)
    }
}

// ============================================================================
// DATASET
// ============================================================================

/// Immutable row model built from one query result.
#[derive(Debug, Clone, Default)]
pub struct ChartDataset {
    rows: Vec<ChartDatasetRow>,
    index: Arc<FieldIndex>,
}

impl ChartDataset {
    /// Build a dataset from row-major cells, column metadata and optional
    /// field configuration (used only for display casing).
    pub fn build(
        columns: Vec<Vec<CellValue>>,
        metas: &[ChartDatasetMeta],
        sections: Option<&[ChartDataConfig]>,
    ) -> Self {
        let index = Arc::new(FieldIndex::build(metas, sections.unwrap_or_default()));

        if columns.is_empty() {
            log::debug!("chart dataset built without rows ({} columns)", metas.len());
        }

        let rows = columns
            .into_iter()
            .map(|cells| {
                if cells.len() != index.column_count() {
                    log::debug!(
                        "row has {} cells for {} columns",
                        cells.len(),
                        index.column_count()
                    );
                }
                ChartDatasetRow::new(cells, Arc::clone(&index))
            })
            .collect();

        ChartDataset { rows, index }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ChartDatasetRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChartDatasetRow> {
        self.rows.iter()
    }

    pub fn get(&self, row: usize) -> Option<&ChartDatasetRow> {
        self.rows.get(row)
    }

    pub fn field_index(&self) -> &FieldIndex {
        &self.index
    }

    pub fn get_field_key(&self, field: &ChartDataSectionField) -> String {
        self.index.lookup_key(field)
    }

    pub fn get_field_origin_key(&self, field: &ChartDataSectionField) -> String {
        self.index.origin_key(field)
    }

    pub fn get_field_index(&self, field: &ChartDataSectionField) -> Option<usize> {
        self.index.position_of(field)
    }

    /// One column's cells, row by row.
    pub fn column<'a>(
        &'a self,
        field: &ChartDataSectionField,
    ) -> impl Iterator<Item = Option<&'a CellValue>> + 'a {
        let position = self.index.position_of(field);
        self.rows
            .iter()
            .map(move |row| position.and_then(|p| row.cells.get(p)))
    }

    /// True when every row points at this dataset's single index.
    pub fn is_homogeneous(&self) -> bool {
        self.rows.iter().all(|row| row.shares_index(&self.index))
    }
}

impl Index<usize> for ChartDataset {
    type Output = ChartDatasetRow;

    fn index(&self, row: usize) -> &Self::Output {
        &self.rows[row]
    }
}

impl<'a> IntoIterator for &'a ChartDataset {
    type Item = &'a ChartDatasetRow;
    type IntoIter = std::slice::Iter<'a, ChartDatasetRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Build a dataset from loosely typed JSON cells.
pub fn transform_to_dataset(
    columns: &[Vec<serde_json::Value>],
    metas: &[ChartDatasetMeta],
    sections: Option<&[ChartDataConfig]>,
) -> ChartDataset {
    let cells = columns
        .iter()
        .map(|row| row.iter().map(CellValue::from).collect())
        .collect();
    ChartDataset::build(cells, metas, sections)
}

/// Rows as maps keyed by the metadata names verbatim.
pub fn transform_to_object_array(
    columns: &[Vec<CellValue>],
    metas: &[ChartDatasetMeta],
) -> Vec<HashMap<String, CellValue>> {
    columns
        .iter()
        .map(|row| {
            metas
                .iter()
                .zip(row.iter())
                .map(|(meta, value)| (meta.name.clone(), value.clone()))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metas(names: &[&str]) -> Vec<ChartDatasetMeta> {
        names.iter().map(|name| ChartDatasetMeta::new(name)).collect()
    }

    fn row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|cell| CellValue::from(*cell)).collect()
    }

    #[test]
    fn test_index_is_shared_across_rows() {
        let dataset = ChartDataset::build(
            vec![row(&["a", "1"]), row(&["b", "2"]), row(&["c", "3"])],
            &metas(&["name", "age"]),
            None,
        );
        assert!(dataset.is_homogeneous());
        assert_eq!(Arc::strong_count(&dataset.index), 4);
    }

    #[test]
    fn test_empty_columns_still_resolve_keys() {
        let dataset = ChartDataset::build(Vec::new(), &metas(&["name", "SUM(num)"]), None);
        assert!(dataset.is_empty());
        let field = ChartDataSectionField::new("num").with_aggregate("sum");
        assert_eq!(dataset.get_field_index(&field), Some(1));
        assert_eq!(dataset.get_field_key(&field), "SUM(NUM)");
    }

    #[test]
    fn test_length_mismatch_is_tolerated() {
        let dataset = ChartDataset::build(
            vec![row(&["a", "1", "extra"]), row(&["b"])],
            &metas(&["name", "age"]),
            None,
        );
        let age = ChartDataSectionField::new("age");
        assert_eq!(dataset[0].get_cell(&age), Some(&CellValue::from("1")));
        assert_eq!(dataset[1].get_cell(&age), None);
        assert_eq!(dataset[0].convert_to_object().len(), 2);
        assert_eq!(dataset[1].convert_to_object().len(), 1);
    }

    #[test]
    fn test_duplicate_keys_resolve_to_first_column() {
        let dataset = ChartDataset::build(vec![row(&["x", "y"])], &metas(&["Name", "NAME"]), None);
        assert_eq!(dataset[0].get_cell_by_key("name"), Some(&CellValue::from("x")));

        let object = dataset[0].convert_to_object();
        assert_eq!(object.len(), 1);
        assert_eq!(object.get("NAME"), Some(&CellValue::from("x")));

        let case_sensitive = dataset[0].convert_to_case_sensitive_object();
        assert_eq!(case_sensitive.len(), 1);
        assert_eq!(case_sensitive.get("Name"), Some(&CellValue::from("x")));
    }

    #[test]
    fn test_missing_field_falls_back_to_own_key() {
        let dataset = ChartDataset::build(vec![row(&["x"])], &metas(&["name"]), None);
        let field = ChartDataSectionField::new("Other").with_aggregate("Sum");
        assert_eq!(dataset.get_field_index(&field), None);
        assert_eq!(dataset.get_field_key(&field), "SUM(OTHER)");
        assert_eq!(dataset.get_field_origin_key(&field), "Sum(Other)");
    }

    #[test]
    fn test_column_iterator() {
        let dataset = ChartDataset::build(
            vec![row(&["a", "1"]), row(&["b", "2"])],
            &metas(&["name", "age"]),
            None,
        );
        let ages: Vec<_> = dataset
            .column(&ChartDataSectionField::new("AGE"))
            .map(|cell| cell.map(CellValue::display_value))
            .collect();
        assert_eq!(ages, vec![Some("1".to_string()), Some("2".to_string())]);
    }

    #[test]
    fn test_row_serializes_as_raw_cells() {
        let dataset = ChartDataset::build(vec![vec![CellValue::from(30.0), CellValue::from("name1")]], &metas(&["SUM(num)", "name"]), None);
        assert_eq!(serde_json::to_value(&dataset[0]).unwrap(), serde_json::json!([30.0, "name1"]));
    }
}
