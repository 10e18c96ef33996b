//! FILENAME: core/chart-engine/src/error.rs
//! PURPOSE: Error type for loading and validating chart configurations.
//! CONTEXT: Lookups over a loaded configuration are total and never fail;
//! only parsing the document and checking required sections report errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid chart configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Required data section has no fields: {0}")]
    RequiredSectionEmpty(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let empty = ConfigError::RequiredSectionEmpty("Metrics".to_string());
        assert_eq!(empty.to_string(), "Required data section has no fields: Metrics");

        let json: ConfigError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(json.to_string().starts_with("Invalid chart configuration JSON: "));
    }
}
