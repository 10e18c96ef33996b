//! FILENAME: core/chart-format/src/lib.rs
//! PURPOSE: Main library entry point for chart value formatting.
//! CONTEXT: Re-exports the cell value type, the field format configuration and
//! the formatter registry used by the dataset and chart engine crates.

pub mod date_format;
pub mod format_spec;
pub mod number_format;
pub mod registry;
pub mod value;

pub use format_spec::{
    CurrencyFormat, DateFormat, FieldFormat, FormatKind, NumericFormat, PercentageFormat,
    ScientificFormat, UnitKey, MAX_DECIMAL_PLACES,
};
pub use registry::{to_formatted_value, FormatFn, FormatterRegistry};
pub use value::{number_to_json, CellValue};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn format_from(value: serde_json::Value) -> FieldFormat {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_numeric_from_json_configuration() {
        let format = format_from(json!({
            "type": "numeric",
            "numeric": { "decimalPlaces": 3, "unitKey": "thousand", "useThousandSeparator": true, "prefix": "a", "suffix": "b" }
        }));
        assert_eq!(to_formatted_value(&CellValue::from(2000.0), Some(&format)), CellValue::from("a2.000Kb"));

        let format = format_from(json!({
            "type": "numeric",
            "numeric": { "decimalPlaces": "null", "useThousandSeparator": false, "prefix": "", "suffix": "" }
        }));
        assert_eq!(to_formatted_value(&CellValue::from(12.0), Some(&format)), CellValue::from("12"));
    }

    #[test]
    fn test_non_numeric_text_passes_through() {
        let format = format_from(json!({
            "type": "numeric",
            "numeric": { "decimalPlaces": 10, "unitKey": "none" }
        }));
        assert_eq!(to_formatted_value(&CellValue::from("3232a"), Some(&format)), CellValue::from("3232a"));
    }

    #[test]
    fn test_nan_passes_through_every_kind() {
        for kind in ["numeric", "currency", "percentage", "scientificNotation", "date", ""] {
            let format = format_from(json!({ "type": kind }));
            assert!(to_formatted_value(&CellValue::from(f64::NAN), Some(&format)).is_nan());
        }
    }

    #[test]
    fn test_currency_and_empty_kind() {
        let currency = json!({ "decimalPlaces": 3, "unitKey": "thousand", "useThousandSeparator": true, "currency": "CNY" });
        let format = format_from(json!({ "type": "currency", "currency": currency.clone() }));
        assert_eq!(to_formatted_value(&CellValue::from(3.0), Some(&format)), CellValue::from("¥0.003 K"));

        let format = format_from(json!({ "type": "", "currency": currency.clone() }));
        assert_eq!(to_formatted_value(&CellValue::from(3.0), Some(&format)), CellValue::from(3.0));

        let format = format_from(json!({ "type": "string", "currency": currency }));
        assert_eq!(to_formatted_value(&CellValue::from("3"), Some(&format)), CellValue::from("3"));
    }

    #[test]
    fn test_date_kind() {
        let format = format_from(json!({ "type": "date", "date": { "format": "YYYY-MM-DD" } }));
        assert_eq!(to_formatted_value(&CellValue::from("20130208"), Some(&format)), CellValue::from("2013-02-08"));
        assert_eq!(
            to_formatted_value(&CellValue::from("2013-02-08 00:00:00"), Some(&format)),
            CellValue::from("2013-02-08 00:00:00")
        );
    }

    #[test]
    fn test_formatting_is_idempotent_for_dates() {
        let format = FieldFormat::date("YYYY-MM-DD");
        let once = to_formatted_value(&CellValue::from("2013/02/08"), Some(&format));
        let twice = to_formatted_value(&once, Some(&format));
        assert_eq!(once, CellValue::from("2013-02-08"));
        assert_eq!(twice, once);
    }
}
