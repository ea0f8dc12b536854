//! Loader options and their validation.
//!
//! The bundler hands the loader a free-form options value. It is checked
//! against [`OPTIONS_SCHEMA`] before any file content is touched: only
//! `enableHmr` is recognized, and it must be a boolean.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON schema for the loader options.
pub const OPTIONS_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "enableHmr": { "type": "boolean" }
  }
}"#;

/// Options recognized by the loader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoaderOptions {
    /// Append hot-module-replacement glue to every transformed module.
    #[serde(default)]
    pub enable_hmr: bool,
}

impl LoaderOptions {
    /// Create options with all defaults (HMR off).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether HMR glue is appended.
    #[must_use]
    pub fn with_hmr(mut self, enable_hmr: bool) -> Self {
        self.enable_hmr = enable_hmr;
        self
    }

    /// Validate a raw options value and extract the recognized options.
    ///
    /// `None` means the bundler passed no options at all, which yields the
    /// defaults. Any property other than `enableHmr` is rejected, as is an
    /// `enableHmr` that is not a boolean (including `null`).
    pub fn from_value(value: Option<&Value>) -> Result<Self, ConfigError> {
        let Some(value) = value else {
            return Ok(Self::default());
        };

        let Value::Object(map) = value else {
            return Err(ConfigError::NotAnObject {
                found: json_type(value),
            });
        };

        let mut options = Self::default();
        for (key, value) in map {
            match key.as_str() {
                "enableHmr" => match value {
                    Value::Bool(enabled) => options.enable_hmr = *enabled,
                    other => {
                        return Err(ConfigError::InvalidType {
                            field: key.clone(),
                            expected: "boolean",
                            found: json_type(other),
                        })
                    }
                },
                _ => {
                    return Err(ConfigError::UnknownProperty { field: key.clone() });
                }
            }
        }

        Ok(options)
    }

    /// Parse options from JSON text, then validate them.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(Some(&value))
    }
}

/// JSON schema type name of a value, for error messages.
fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_options_are_default() {
        let options = LoaderOptions::from_value(None).unwrap();
        assert!(!options.enable_hmr);
    }

    #[test]
    fn test_empty_object_is_default() {
        let options = LoaderOptions::from_value(Some(&json!({}))).unwrap();
        assert_eq!(options, LoaderOptions::default());
    }

    #[test]
    fn test_enable_hmr_true() {
        let options = LoaderOptions::from_value(Some(&json!({ "enableHmr": true }))).unwrap();
        assert!(options.enable_hmr);
    }

    #[test]
    fn test_enable_hmr_wrong_type() {
        let err = LoaderOptions::from_value(Some(&json!({ "enableHmr": "yes" }))).unwrap_err();
        match err {
            ConfigError::InvalidType {
                field,
                expected,
                found,
            } => {
                assert_eq!(field, "enableHmr");
                assert_eq!(expected, "boolean");
                assert_eq!(found, "string");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_enable_hmr_null_is_rejected() {
        let err = LoaderOptions::from_value(Some(&json!({ "enableHmr": null }))).unwrap_err();
        assert_eq!(err.field(), Some("enableHmr"));
    }

    #[test]
    fn test_unknown_property() {
        let err = LoaderOptions::from_value(Some(&json!({ "foo": true }))).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProperty { ref field } if field == "foo"));
    }

    #[test]
    fn test_unknown_property_next_to_valid_one() {
        let value = json!({ "enableHmr": true, "namespace": "Drupal" });
        let err = LoaderOptions::from_value(Some(&value)).unwrap_err();
        assert_eq!(err.field(), Some("namespace"));
    }

    #[test]
    fn test_non_object_options() {
        let err = LoaderOptions::from_value(Some(&json!([true]))).unwrap_err();
        assert!(matches!(err, ConfigError::NotAnObject { found: "array" }));
    }

    #[test]
    fn test_from_json_str() {
        let options = LoaderOptions::from_json_str(r#"{"enableHmr": false}"#).unwrap();
        assert!(!options.enable_hmr);

        let err = LoaderOptions::from_json_str("{enableHmr: true}").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_serde_matches_schema() {
        let options: LoaderOptions = serde_json::from_str(r#"{"enableHmr": true}"#).unwrap();
        assert!(options.enable_hmr);
        assert!(serde_json::from_str::<LoaderOptions>(r#"{"foo": 1}"#).is_err());
        assert_eq!(
            serde_json::to_string(&LoaderOptions::new().with_hmr(true)).unwrap(),
            r#"{"enableHmr":true}"#
        );
    }

    #[test]
    fn test_schema_is_valid_json() {
        let schema: Value = serde_json::from_str(OPTIONS_SCHEMA).unwrap();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["enableHmr"]["type"], "boolean");
    }
}
