//! OGC WFS GetFeature protocol support.
//!
//! Covers the two pieces a feature source needs: building GetFeature
//! query URLs against a WFS endpoint, and decoding the GeoJSON
//! documents it returns.

pub mod geojson;
pub mod getfeature;

pub use geojson::{Feature, FeatureCollection, Geometry};
pub use getfeature::GetFeatureRequest;
