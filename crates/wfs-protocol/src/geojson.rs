//! Decode-side GeoJSON types for GetFeature responses.
//!
//! Only the subset a point-measurement source needs: feature
//! collections, features with free-form properties, and the geometry
//! kinds a WFS station layer serves.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use heatmap_common::{HeatmapError, HeatmapResult};

/// A GeoJSON FeatureCollection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub type_: String,

    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Decode from a JSON document, verifying the collection marker.
    pub fn from_json(json: &str) -> HeatmapResult<Self> {
        let collection: FeatureCollection = serde_json::from_str(json)?;
        if collection.type_ != "FeatureCollection" {
            return Err(HeatmapError::GeoJsonError(format!(
                "expected FeatureCollection, got {}",
                collection.type_
            )));
        }
        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// A GeoJSON Feature with free-form properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub type_: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default)]
    pub geometry: Option<Geometry>,

    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Feature {
    /// A property value, if present and non-null.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name).filter(|v| !v.is_null())
    }

    /// A property coerced to f64.
    ///
    /// JSON numbers convert directly; numeric strings are parsed, since
    /// WFS servers serialize measurement columns either way. Anything
    /// else (missing, null, non-numeric) is None.
    pub fn number_property(&self, name: &str) -> Option<f64> {
        match self.property(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// The geometry kinds a station-values layer serves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: [f64; 2],
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
}

impl Geometry {
    pub fn point(lon: f64, lat: f64) -> Self {
        Geometry::Point {
            coordinates: [lon, lat],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::sample_collection_json;

    #[test]
    fn test_decode_sample_collection() {
        let collection = FeatureCollection::from_json(&sample_collection_json()).unwrap();
        assert_eq!(collection.len(), 3);

        let first = &collection.features[0];
        assert!(matches!(
            first.geometry,
            Some(Geometry::Point { coordinates: [x, _] }) if x > 16.0
        ));
    }

    #[test]
    fn test_rejects_non_collection() {
        let json = r#"{"type": "Feature", "features": []}"#;
        assert!(FeatureCollection::from_json(json).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(FeatureCollection::from_json("{not json").is_err());
    }

    #[test]
    fn test_number_property_coercion() {
        let json = r#"{
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [17.0, 41.0]},
            "properties": {
                "as_number": 0.12,
                "as_string": " 3.5 ",
                "as_null": null,
                "as_text": "high"
            }
        }"#;
        let feature: Feature = serde_json::from_str(json).unwrap();

        assert_eq!(feature.number_property("as_number"), Some(0.12));
        assert_eq!(feature.number_property("as_string"), Some(3.5));
        assert_eq!(feature.number_property("as_null"), None);
        assert_eq!(feature.number_property("as_text"), None);
        assert_eq!(feature.number_property("missing"), None);
    }

    #[test]
    fn test_property_filters_null() {
        let json = r#"{
            "type": "Feature",
            "geometry": null,
            "properties": {"v": null}
        }"#;
        let feature: Feature = serde_json::from_str(json).unwrap();
        assert!(feature.property("v").is_none());
    }
}
