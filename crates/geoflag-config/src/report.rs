//! Report synthesis configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default `generator` property of aggregate documents.
pub const DEFAULT_GENERATOR: &str = "GeoFlag";

/// Default display name used when the decorator finds no `name`.
pub const DEFAULT_NAME: &str = "Task";

fn default_generator() -> String {
    DEFAULT_GENERATOR.to_string()
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Value of the `generator` property in aggregate documents.
    #[serde(default = "default_generator")]
    pub generator: String,

    /// Display name the decorator falls back to when none is present.
    #[serde(default = "default_name")]
    pub default_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            generator: default_generator(),
            default_name: default_name(),
        }
    }
}

impl ReportConfig {
    /// Reject blank values that would produce unnamed documents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first blank field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("report.generator", &self.generator),
            ("report.default_name", &self.default_name),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
