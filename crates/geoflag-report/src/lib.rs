//! # geoflag-report
//!
//! Turns completed flags into shareable GeoJSON reports.
//!
//! - `ReportSynthesizer`: aggregate single-feature and flattened
//!   feature-collection documents, with composite member deduplication
//! - `feature_decorator`: highest highway classification among contributors
//! - `CheckFlagEvent`: a flag paired with its check name and timestamp
//! - `EventWriter`: appends aggregate documents to per-check JSONL files

mod decorator;
mod error;
mod event;
mod synthesizer;
mod writer;

pub use decorator::{NAME_KEY, decorate_name, feature_decorator};
pub use error::ReportError;
pub use event::{CheckFlagEvent, GENERATOR_KEY, TIMESTAMP_KEY};
pub use synthesizer::{ID_KEY, INSTRUCTIONS_KEY, ReportSynthesizer};
pub use writer::{EventWriter, FILE_EXTENSION};
