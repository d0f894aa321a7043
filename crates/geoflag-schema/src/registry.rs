//! Central schema registry for GeoFlag document types.
//!
//! The `SchemaRegistry` builds JSON Schemas from geoflag-core types at
//! construction time using [`schemars::schema_for!`] and provides validation
//! via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Schema name of the aggregate single-feature document.
pub const FLAG_FEATURE: &str = "flag_feature";
/// Schema name of the flattened feature-collection document.
pub const FLAG_FEATURE_COLLECTION: &str = "flag_feature_collection";

/// Store of the JSON Schemas for every produced document shape.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`. Panics if `serde_json::to_value` fails (should be
/// infallible for valid `schemars` output).
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap());
    };
}

impl SchemaRegistry {
    /// Build a registry containing the document, geometry, and entity schemas.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on any `schemars`-generated
    /// schema. This is not expected in practice because `schemars` always
    /// produces valid JSON-serialisable output.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Report documents (3) ---
        register!(schemas, FLAG_FEATURE, geoflag_core::documents::FlagFeature);
        register!(
            schemas,
            FLAG_FEATURE_COLLECTION,
            geoflag_core::documents::FlagFeatureCollection
        );
        register!(
            schemas,
            "member_feature",
            geoflag_core::documents::MemberFeature
        );

        // --- Building blocks (2) ---
        register!(schemas, "geometry", geoflag_core::Geometry);
        register!(schemas, "entity", geoflag_core::Entity);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
    }

    fn valid_feature() -> serde_json::Value {
        json!({
            "type": "Feature",
            "id": "flag-1",
            "geometry": {"type": "Point", "coordinates": [-122.0, 37.0]},
            "properties": {
                "instructions": "1. fix",
                "name": "SomeCheck",
                "generator": "GeoFlag",
                "timestamp": "2026-10-19T12:00:00+00:00",
                "feature_count": 1,
                "feature_properties": [{"osmid": "5", "ItemId": "5000001"}],
                "feature_osmids": ["5"]
            }
        })
    }

    #[test]
    fn registry_has_expected_count() {
        assert_eq!(registry().schema_count(), 5);
    }

    #[test]
    fn registry_list_is_sorted() {
        let names = registry().list();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn all_expected_schemas_present() {
        let reg = registry();
        for name in [
            FLAG_FEATURE,
            FLAG_FEATURE_COLLECTION,
            "member_feature",
            "geometry",
            "entity",
        ] {
            assert!(reg.get(name).is_some(), "Missing expected schema: {name}");
        }
    }

    #[test]
    fn validate_valid_feature() {
        assert!(registry().validate(FLAG_FEATURE, &valid_feature()).is_ok());
    }

    #[test]
    fn validate_rejects_missing_feature_count() {
        let mut invalid = valid_feature();
        invalid["properties"]
            .as_object_mut()
            .unwrap()
            .remove("feature_count");
        let result = registry().validate(FLAG_FEATURE, &invalid);
        if let Err(SchemaError::ValidationFailed { errors }) = result {
            assert!(!errors.is_empty());
        } else {
            panic!("Expected ValidationFailed");
        }
    }

    #[test]
    fn validate_rejects_non_string_property_values() {
        let mut invalid = valid_feature();
        invalid["properties"]["feature_properties"][0]["osmid"] = json!(5);
        assert!(registry().validate(FLAG_FEATURE, &invalid).is_err());
    }

    #[test]
    fn validate_rejects_unknown_geometry_type() {
        let invalid = json!({"type": "Circle", "coordinates": [0.0, 0.0]});
        assert!(registry().validate("geometry", &invalid).is_err());
    }

    #[test]
    fn validate_empty_collection() {
        let collection = json!({
            "type": "FeatureCollection",
            "features": [],
            "properties": {"id": "f", "instructions": ""}
        });
        assert!(
            registry()
                .validate(FLAG_FEATURE_COLLECTION, &collection)
                .is_ok()
        );
    }

    #[test]
    fn validate_nonexistent_schema_returns_not_found() {
        let result = registry().validate("bogus", &json!({}));
        assert!(matches!(result, Err(SchemaError::NotFound(_))));
    }
}
