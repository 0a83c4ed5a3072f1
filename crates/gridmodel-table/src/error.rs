//! Error types for table configuration.

use thiserror::Error;

/// Errors raised while loading or applying a table configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML document could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON document could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An override carried a value of the wrong shape for its property.
    #[error("Invalid value for '{property}': {source}")]
    InvalidOverrideValue {
        /// Property id, e.g. `custom.align`
        property: String,
        /// Deserialization failure
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let source = serde_json::from_str::<bool>("3").unwrap_err();
        let err = ConfigError::InvalidOverrideValue {
            property: "custom.wrapText".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid value for 'custom.wrapText': "));
    }

    #[test]
    fn test_json_error_from() {
        let err: ConfigError = serde_json::from_str::<bool>("{").unwrap_err().into();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("JSON error: "));
    }
}
