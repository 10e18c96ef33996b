//! FILENAME: core/chart-dataset/src/key.rs
//! PURPOSE: Parses query result column names into `{aggregate, colName}` keys.
//! CONTEXT: Query engines name aggregated columns `FUNC(col)` with whatever
//! casing the datasource prefers ("AVG(age)", "avg(Age)"). A `FieldKey`
//! captures the parsed parts so lookups never depend on that casing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::field::{compose_key, same_column, ChartDataSectionField};

static AGGREGATE_WRAPPED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\((.*)\)\s*$").expect("aggregate pattern is valid")
});

/// A column identity parsed from a metadata name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldKey {
    pub aggregate: Option<String>,
    pub col_name: String,
}

impl FieldKey {
    /// Parse `FUNC(col)` or a bare column name.
    pub fn parse(name: &str) -> Self {
        match AGGREGATE_WRAPPED.captures(name) {
            Some(caps) => FieldKey {
                aggregate: Some(caps[1].to_string()),
                col_name: caps[2].to_string(),
            },
            None => FieldKey {
                aggregate: None,
                col_name: name.to_string(),
            },
        }
    }

    pub fn from_field(field: &ChartDataSectionField) -> Self {
        FieldKey {
            aggregate: field.aggregate().map(str::to_string),
            col_name: field.col_name.clone(),
        }
    }

    /// The uppercased key every lookup is performed with.
    pub fn lookup_key(&self) -> String {
        compose_key(&self.col_name, self.aggregate.as_deref()).to_uppercase()
    }

    pub fn matches(&self, field: &ChartDataSectionField) -> bool {
        same_column(
            &self.col_name,
            self.aggregate.as_deref(),
            &field.col_name,
            field.aggregate(),
        )
    }
}

/// Normalize a free-form key (`"avg(Age)"`, `"name"`) to its lookup form.
pub fn to_lookup_key(key: &str) -> String {
    FieldKey::parse(key).lookup_key()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_name() {
        let key = FieldKey::parse("age");
        assert_eq!(key.aggregate, None);
        assert_eq!(key.col_name, "age");
        assert_eq!(key.lookup_key(), "AGE");
    }

    #[test]
    fn test_parse_aggregate_wrapped_name() {
        let key = FieldKey::parse("avg(Age)");
        assert_eq!(key.aggregate.as_deref(), Some("avg"));
        assert_eq!(key.col_name, "Age");
        assert_eq!(key.lookup_key(), "AVG(AGE)");
    }

    #[test]
    fn test_matches_field_case_insensitively() {
        let key = FieldKey::parse("current(profession)");
        assert!(key.matches(&ChartDataSectionField::new("Profession").with_aggregate("CURRENT")));
        assert!(!key.matches(&ChartDataSectionField::new("profession")));
    }

    #[test]
    fn test_to_lookup_key() {
        assert_eq!(to_lookup_key("AVG(age)"), "AVG(AGE)");
        assert_eq!(to_lookup_key("name"), "NAME");
    }
}
