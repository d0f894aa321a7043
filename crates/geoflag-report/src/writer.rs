//! JSONL event writer.
//!
//! Appends the aggregate document of each event to a per-check
//! `{directory}/{check_name}.geojsonl` file, one document per line.

use std::path::{Path, PathBuf};

use geoflag_config::{GeoFlagConfig, ReportConfig};
use geoflag_schema::{FLAG_FEATURE, SchemaRegistry};
use parking_lot::Mutex;

use crate::error::ReportError;
use crate::event::CheckFlagEvent;

/// Extension of the per-check output files.
pub const FILE_EXTENSION: &str = "geojsonl";

/// Appends check events to per-check JSONL files.
///
/// Shared across the workers of a check run; appends are serialized so
/// lines from concurrent events never interleave.
pub struct EventWriter {
    directory: PathBuf,
    enabled: bool,
    report: ReportConfig,
    schema: Option<SchemaRegistry>,
    write_lock: Mutex<()>,
}

impl EventWriter {
    /// Create a writer from the `[output]` and `[report]` configuration.
    ///
    /// Creates the output directory if writing is enabled.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Io` if the directory cannot be created.
    pub fn new(config: &GeoFlagConfig) -> Result<Self, ReportError> {
        if !config.output.enabled {
            return Ok(Self::disabled());
        }

        let directory = PathBuf::from(&config.output.directory);
        std::fs::create_dir_all(&directory)?;
        Ok(Self {
            directory,
            enabled: true,
            report: config.report.clone(),
            schema: config.output.validate.then(SchemaRegistry::new),
            write_lock: Mutex::new(()),
        })
    }

    /// A writer that accepts events and writes nothing.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            directory: PathBuf::new(),
            enabled: false,
            report: ReportConfig::default(),
            schema: None,
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File receiving the events of `check_name`.
    ///
    /// Path separators and `..` in the check name become `_`, so the file
    /// always lands directly inside the output directory.
    #[must_use]
    pub fn path_for(&self, check_name: &str) -> PathBuf {
        let stem = check_name.replace("..", "_").replace(['/', '\\'], "_");
        self.directory.join(format!("{stem}.{FILE_EXTENSION}"))
    }

    /// Append the aggregate document of `event`.
    ///
    /// With validation enabled, schema failures are logged as warnings and
    /// the line is still written.
    ///
    /// # Errors
    ///
    /// Returns `ReportError` if serialization or the file write fails.
    pub fn append(&self, event: &CheckFlagEvent<'_>) -> Result<(), ReportError> {
        if !self.enabled {
            return Ok(());
        }

        let feature = event.to_geojson_feature(&self.report);
        if let Some(schema) = &self.schema {
            let value = serde_json::to_value(&feature)?;
            if let Err(e) = schema.validate(FLAG_FEATURE, &value) {
                tracing::warn!(
                    check = event.check_name(),
                    flag = event.flag().identifier(),
                    "flag document failed validation: {e}"
                );
            }
        }

        let path = self.path_for(event.check_name());
        let _guard = self.write_lock.lock();
        serde_jsonlines::append_json_lines(&path, [&feature])?;
        tracing::debug!(path = %path.display(), flag = event.flag().identifier(), "appended flag");
        Ok(())
    }
}
