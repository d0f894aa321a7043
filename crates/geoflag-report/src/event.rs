//! A completed flag paired with the check that raised it.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use geoflag_config::ReportConfig;
use geoflag_core::documents::{FlagFeature, FlagFeatureCollection};
use geoflag_core::{Flag, PropertyMap};

use crate::decorator::NAME_KEY;
use crate::synthesizer::ReportSynthesizer;

/// Property key of the producing tool.
pub const GENERATOR_KEY: &str = "generator";
/// Property key of the event's creation time.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// One detected violation: the check name, its flag, and when it was raised.
///
/// Serialization is a pure function of the event, so both forms can be
/// produced any number of times with identical output.
#[derive(Debug, Clone)]
pub struct CheckFlagEvent<'a> {
    check_name: String,
    flag: Flag<'a>,
    timestamp: DateTime<Utc>,
}

impl<'a> CheckFlagEvent<'a> {
    /// Wrap `flag`, timestamped now.
    #[must_use]
    pub fn new(check_name: impl Into<String>, flag: Flag<'a>) -> Self {
        Self::with_timestamp(check_name, flag, Utc::now())
    }

    #[must_use]
    pub fn with_timestamp(
        check_name: impl Into<String>,
        flag: Flag<'a>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            check_name: check_name.into(),
            flag,
            timestamp,
        }
    }

    #[must_use]
    pub fn check_name(&self) -> &str {
        &self.check_name
    }

    #[must_use]
    pub const fn flag(&self) -> &Flag<'a> {
        &self.flag
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn formatted_timestamp(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    /// Aggregate document. `name` is the challenge name when set, otherwise
    /// the check name.
    #[must_use]
    pub fn to_geojson_feature(&self, config: &ReportConfig) -> FlagFeature {
        let name = self.flag.challenge_name().unwrap_or(self.check_name.as_str());
        let context = PropertyMap::from([
            (NAME_KEY.to_string(), name.to_string()),
            (GENERATOR_KEY.to_string(), config.generator.clone()),
            (TIMESTAMP_KEY.to_string(), self.formatted_timestamp()),
        ]);
        ReportSynthesizer::new(config).to_feature(&self.flag, context)
    }

    /// Flattened document, with the check name as `generator`.
    #[must_use]
    pub fn to_geojson_feature_collection(&self) -> FlagFeatureCollection {
        let context = PropertyMap::from([
            (GENERATOR_KEY.to_string(), self.check_name.clone()),
            (TIMESTAMP_KEY.to_string(), self.formatted_timestamp()),
        ]);
        ReportSynthesizer::default().to_feature_collection(&self.flag, context)
    }
}

impl fmt::Display for CheckFlagEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json =
            serde_json::to_string(&self.to_geojson_feature_collection()).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use geoflag_core::{Coordinate, Dataset, Entity};
    use pretty_assertions::assert_eq;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 30, 0).unwrap()
    }

    fn dataset() -> Dataset {
        [Entity::line(5, 50, vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)])
            .with_tag("highway", "tertiary")]
        .into_iter()
        .collect()
    }

    #[test]
    fn feature_context_uses_check_name_and_generator() {
        let dataset = dataset();
        let mut flag = Flag::for_entity(dataset.get(5).unwrap());
        flag.add_instruction("check the road");
        let event = CheckFlagEvent::with_timestamp("RoadCheck", flag, fixed_time());

        let feature = event.to_geojson_feature(&ReportConfig::default());
        let context = &feature.properties.context;
        assert_eq!(context["name"], "RoadCheck (highway=tertiary)");
        assert_eq!(context["generator"], "GeoFlag");
        assert_eq!(context["timestamp"], "2026-10-19T12:30:00+00:00");
        assert_eq!(feature.properties.instructions, "1. check the road");
    }

    #[test]
    fn challenge_name_overrides_check_name() {
        let dataset = dataset();
        let mut flag = Flag::for_entity(dataset.get(5).unwrap());
        flag.set_challenge_name("Fix tertiary roads");
        let event = CheckFlagEvent::with_timestamp("RoadCheck", flag, fixed_time());

        let feature = event.to_geojson_feature(&ReportConfig::default());
        assert_eq!(
            feature.properties.context["name"],
            "Fix tertiary roads (highway=tertiary)"
        );
    }

    #[test]
    fn collection_generator_is_check_name() {
        let dataset = dataset();
        let event = CheckFlagEvent::with_timestamp(
            "RoadCheck",
            Flag::for_entity(dataset.get(5).unwrap()),
            fixed_time(),
        );

        let collection = event.to_geojson_feature_collection();
        assert_eq!(collection.properties["generator"], "RoadCheck");
        assert_eq!(collection.properties["id"], "5");
        assert_eq!(collection.features.len(), 1);
    }

    #[test]
    fn display_is_compact_collection_json() {
        let dataset = dataset();
        let event = CheckFlagEvent::with_timestamp(
            "RoadCheck",
            Flag::for_entity(dataset.get(5).unwrap()),
            fixed_time(),
        );

        let rendered = event.to_string();
        assert!(!rendered.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["type"], "FeatureCollection");
        assert_eq!(rendered, event.to_string());
    }

    #[test]
    fn new_stamps_current_time() {
        let before = Utc::now();
        let event = CheckFlagEvent::new("RoadCheck", Flag::new("x"));
        assert!(event.timestamp() >= before);
        assert_eq!(event.check_name(), "RoadCheck");
        assert!(event.flag().is_empty());
    }
}
