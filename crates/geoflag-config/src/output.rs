//! Event output configuration.

use serde::{Deserialize, Serialize};

fn default_directory() -> String {
    "flags".to_string()
}

const fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory receiving one line-delimited file per check.
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Whether events are written at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Check documents against the schema registry before writing.
    /// Failures are logged, never fatal.
    #[serde(default)]
    pub validate: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            enabled: default_enabled(),
            validate: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = OutputConfig::default();
        assert_eq!(config.directory, "flags");
        assert!(config.enabled);
        assert!(!config.validate);
    }
}
