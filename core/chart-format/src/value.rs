//! FILENAME: core/chart-format/src/value.rs
//! PURPOSE: Defines the scalar value stored in one cell of a chart query result.
//! CONTEXT: Query engines hand back strings, numbers, booleans and nulls mixed
//! in the same column. `CellValue` keeps the original shape so formatting can
//! pass a value through untouched when it cannot (or should not) be formatted.

use serde::{Deserialize, Serialize};

/// The raw data within one cell of a query result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// True only for a numeric NaN. NaN marks a value that must never be formatted.
    pub fn is_nan(&self) -> bool {
        matches!(self, CellValue::Number(n) if n.is_nan())
    }

    /// Loose numeric conversion.
    /// Numbers are returned as-is (NaN included), numeric text is parsed after
    /// trimming, anything else is not a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
            }
            CellValue::Boolean(_) | CellValue::Null => None,
        }
    }

    /// Returns the display value of the cell as a String.
    /// Used for bucketing rows by value and for tooltip text.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => b.to_string(),
        }
    }

    /// Converts back into a JSON scalar. Non-finite numbers become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CellValue::Null => serde_json::Value::Null,
            CellValue::Boolean(b) => serde_json::Value::Bool(*b),
            CellValue::Number(n) => number_to_json(*n),
            CellValue::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

/// Integral floats are emitted as JSON integers so that `25.0` serializes as `25`.
pub fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&serde_json::Value> for CellValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::Bool(b) => CellValue::Boolean(*b),
            serde_json::Value::Number(n) => CellValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => CellValue::Text(s.clone()),
            // Nested structures are not scalar cells; keep their JSON text.
            other => CellValue::Text(other.to_string()),
        }
    }
}
