//! FILENAME: core/chart-format/src/format_spec.rs
//! PURPOSE: Per-field display format configuration.
//! CONTEXT: A field's format arrives from user configuration as
//! `{ "type": "numeric", "numeric": { ... } }`. The parameter records are
//! deserialized leniently: a malformed parameter degrades to "unset" instead of
//! rejecting the whole chart configuration.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The largest number of decimal places a format may request.
/// Anything outside `0..=MAX_DECIMAL_PLACES` renders with zero decimals.
pub const MAX_DECIMAL_PLACES: i64 = 20;

// ============================================================================
// FORMAT KIND
// ============================================================================

/// Discriminant of a field format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FormatKind {
    Numeric,
    Currency,
    Percentage,
    ScientificNotation,
    Date,
    /// Anything else, including `""` and `"string"`. Formats as passthrough
    /// unless a formatter was registered under the same name.
    Other(String),
    #[default]
    Default,
}

impl FormatKind {
    pub fn as_str(&self) -> &str {
        match self {
            FormatKind::Numeric => "numeric",
            FormatKind::Currency => "currency",
            FormatKind::Percentage => "percentage",
            FormatKind::ScientificNotation => "scientificNotation",
            FormatKind::Date => "date",
            FormatKind::Other(name) => name,
            FormatKind::Default => "default",
        }
    }
}

impl From<&str> for FormatKind {
    fn from(name: &str) -> Self {
        match name {
            "numeric" => FormatKind::Numeric,
            "currency" => FormatKind::Currency,
            "percentage" => FormatKind::Percentage,
            "scientificNotation" => FormatKind::ScientificNotation,
            "date" => FormatKind::Date,
            "default" => FormatKind::Default,
            other => FormatKind::Other(other.to_string()),
        }
    }
}

impl Serialize for FormatKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FormatKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?;
        Ok(name.as_deref().map(FormatKind::from).unwrap_or_default())
    }
}

// ============================================================================
// UNIT SCALING
// ============================================================================

/// Named multiplier a magnitude is divided by before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnitKey {
    #[default]
    None,
    Thousand,
    Million,
    Billion,
    Wan,
    Yi,
}

impl UnitKey {
    pub fn from_key(key: &str) -> Self {
        match key {
            "thousand" => UnitKey::Thousand,
            "million" => UnitKey::Million,
            "billion" => UnitKey::Billion,
            "wan" => UnitKey::Wan,
            "yi" => UnitKey::Yi,
            _ => UnitKey::None,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            UnitKey::None => 1.0,
            UnitKey::Thousand => 1e3,
            UnitKey::Million => 1e6,
            UnitKey::Billion => 1e9,
            UnitKey::Wan => 1e4,
            UnitKey::Yi => 1e8,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            UnitKey::None => "",
            UnitKey::Thousand => "K",
            UnitKey::Million => "M",
            UnitKey::Billion => "B",
            UnitKey::Wan => "万",
            UnitKey::Yi => "亿",
        }
    }
}

// ============================================================================
// PARAMETER RECORDS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumericFormat {
    #[serde(deserialize_with = "lenient_decimal_places")]
    pub decimal_places: Option<i64>,
    #[serde(deserialize_with = "lenient_unit_key")]
    pub unit_key: UnitKey,
    #[serde(deserialize_with = "lenient_bool")]
    pub use_thousand_separator: bool,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrencyFormat {
    #[serde(deserialize_with = "lenient_decimal_places")]
    pub decimal_places: Option<i64>,
    #[serde(deserialize_with = "lenient_unit_key")]
    pub unit_key: UnitKey,
    #[serde(deserialize_with = "lenient_bool")]
    pub use_thousand_separator: bool,
    /// ISO 4217 code, e.g. "CNY".
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PercentageFormat {
    #[serde(deserialize_with = "lenient_decimal_places")]
    pub decimal_places: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScientificFormat {
    #[serde(deserialize_with = "lenient_decimal_places")]
    pub decimal_places: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateFormat {
    /// Moment-style pattern such as "YYYY-MM-DD HH:mm:ss".
    pub format: Option<String>,
}

/// The complete format configuration of one field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldFormat {
    #[serde(rename = "type")]
    pub kind: FormatKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<CurrencyFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<PercentageFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scientific_notation: Option<ScientificFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateFormat>,
}

impl FieldFormat {
    pub fn numeric(numeric: NumericFormat) -> Self {
        FieldFormat {
            kind: FormatKind::Numeric,
            numeric: Some(numeric),
            ..Default::default()
        }
    }

    pub fn currency(currency: CurrencyFormat) -> Self {
        FieldFormat {
            kind: FormatKind::Currency,
            currency: Some(currency),
            ..Default::default()
        }
    }

    pub fn percentage(decimal_places: i64) -> Self {
        FieldFormat {
            kind: FormatKind::Percentage,
            percentage: Some(PercentageFormat {
                decimal_places: Some(decimal_places),
            }),
            ..Default::default()
        }
    }

    pub fn scientific(decimal_places: i64) -> Self {
        FieldFormat {
            kind: FormatKind::ScientificNotation,
            scientific_notation: Some(ScientificFormat {
                decimal_places: Some(decimal_places),
            }),
            ..Default::default()
        }
    }

    pub fn date(pattern: &str) -> Self {
        FieldFormat {
            kind: FormatKind::Date,
            date: Some(DateFormat {
                format: Some(pattern.to_string()),
            }),
            ..Default::default()
        }
    }
}

// ============================================================================
// LENIENT DESERIALIZERS
// ============================================================================

fn lenient_decimal_places<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw
        .as_f64()
        .filter(|n| n.is_finite())
        .map(|n| n.trunc() as i64))
}

fn lenient_unit_key<'de, D: Deserializer<'de>>(deserializer: D) -> Result<UnitKey, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw.as_str().map(UnitKey::from_key).unwrap_or_default())
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw.as_bool().unwrap_or(false))
}
