//! Pre-built GeoJSON documents for source and weight tests.

use serde_json::{json, Value};

/// A single GeoJSON feature as a JSON value.
///
/// `properties` is any JSON object, e.g.
/// `json!({"sulfurdioxide_total_vertical_column": 0.12})`.
pub fn feature_json(lon: f64, lat: f64, properties: Value) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [lon, lat]
        },
        "properties": properties
    })
}

/// Wrap features into a FeatureCollection document string.
pub fn wrap_collection(features: Vec<Value>) -> String {
    json!({
        "type": "FeatureCollection",
        "features": features
    })
    .to_string()
}

/// A small station-values collection over the Puglia coast: one clean
/// measurement, one serialized as a string, one null.
pub fn sample_collection_json() -> String {
    wrap_collection(vec![
        feature_json(
            16.87,
            41.12,
            json!({"sulfurdioxide_total_vertical_column": 0.12}),
        ),
        feature_json(
            17.23,
            40.47,
            json!({"sulfurdioxide_total_vertical_column": "0.31"}),
        ),
        feature_json(
            16.60,
            40.66,
            json!({"sulfurdioxide_total_vertical_column": null}),
        ),
    ])
}
