use crate::plugin::PluginError;
use thiserror::Error;

/// Loader options failed validation against the options schema.
///
/// Raised before any content is transformed. The bundler is expected to
/// fail the build for the file being processed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Drupal Behaviors Loader: options should be an object, got {found}")]
    NotAnObject { found: &'static str },

    #[error(
        "Drupal Behaviors Loader: options has an unknown property '{field}'. \
         These properties are valid: enableHmr"
    )]
    UnknownProperty { field: String },

    #[error("Drupal Behaviors Loader: options.{field} should be a {expected}, got {found}")]
    InvalidType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Drupal Behaviors Loader: options are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// The option name this error is about, if it concerns a single field.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnknownProperty { field } | Self::InvalidType { field, .. } => Some(field),
            Self::NotAnObject { .. } | Self::Json(_) => None,
        }
    }
}

/// Errors raised while running behavior modules through a plugin pipeline.
///
/// Option validation happens before a pipeline is built and reports
/// [`ConfigError`] on its own.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Plugin(#[from] PluginError),
}
