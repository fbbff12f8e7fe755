//! Heatmap layer and per-feature weight computation.

use uuid::Uuid;

use heatmap_common::{DerivedConfig, Domain, HeatmapStyle};
use wfs_protocol::Feature;

use crate::source::VectorSource;

/// Per-feature intensity weighting for a heatmap layer.
///
/// Consults exactly the configured value fields, in order; the first
/// present, non-null value wins and is normalized into the domain.
/// A feature with no usable value weighs 0.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightSpec {
    value_fields: Vec<String>,
    domain: Domain,
}

impl WeightSpec {
    pub fn new(value_fields: Vec<String>, domain: Domain) -> Self {
        Self {
            value_fields,
            domain,
        }
    }

    pub fn from_config(config: &DerivedConfig) -> Self {
        Self::new(config.value_fields.clone(), config.domain)
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Heatmap intensity weight for one feature.
    pub fn weight(&self, feature: &Feature) -> f64 {
        for field in &self.value_fields {
            if let Some(value) = feature.number_property(field) {
                return self.domain.normalize(value);
            }
        }
        0.0
    }
}

/// A heatmap rendering layer over a vector source.
///
/// Owned by the map once attached; the service keeps only the id.
/// Never mutated after construction apart from its source accumulating
/// features.
#[derive(Debug)]
pub struct HeatmapLayer {
    id: Uuid,
    style: HeatmapStyle,
    weight: WeightSpec,
    source: VectorSource,
}

impl HeatmapLayer {
    pub fn new(style: HeatmapStyle, weight: WeightSpec, source: VectorSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            style,
            weight,
            source,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn style(&self) -> &HeatmapStyle {
        &self.style
    }

    pub fn source(&self) -> &VectorSource {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut VectorSource {
        &mut self.source
    }

    /// Weight of one feature under this layer's configuration.
    pub fn weight_for(&self, feature: &Feature) -> f64 {
        self.weight.weight(feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_utils::feature_json;

    fn feature(properties: serde_json::Value) -> Feature {
        serde_json::from_value(feature_json(16.9, 41.1, properties)).unwrap()
    }

    fn spec() -> WeightSpec {
        WeightSpec::new(
            vec!["primary".to_string(), "fallback".to_string()],
            Domain::new(0.0, 10.0),
        )
    }

    #[test]
    fn test_first_field_wins() {
        let f = feature(json!({"primary": 5.0, "fallback": 100.0}));
        assert_eq!(spec().weight(&f), 0.5);
    }

    #[test]
    fn test_falls_back_in_order() {
        let f = feature(json!({"primary": null, "fallback": 2.5}));
        assert_eq!(spec().weight(&f), 0.25);
    }

    #[test]
    fn test_numeric_string_coerces() {
        let f = feature(json!({"primary": "7.5"}));
        assert_eq!(spec().weight(&f), 0.75);
    }

    #[test]
    fn test_all_null_weighs_zero() {
        let f = feature(json!({"primary": null, "fallback": null}));
        assert_eq!(spec().weight(&f), 0.0);

        let empty = feature(json!({}));
        assert_eq!(spec().weight(&empty), 0.0);
    }

    #[test]
    fn test_unconfigured_fields_are_not_consulted() {
        // A value under a name outside the configured fields must not
        // leak into the weight.
        let f = feature(json!({"other": 9.0}));
        assert_eq!(spec().weight(&f), 0.0);
    }

    #[test]
    fn test_degenerate_domain_weighs_zero() {
        let spec = WeightSpec::new(vec!["primary".to_string()], Domain::empty());
        let f = feature(json!({"primary": 3.0}));
        assert_eq!(spec.weight(&f), 0.0);
    }

    #[test]
    fn test_layer_ids_are_unique() {
        let layer_a = HeatmapLayer::new(
            HeatmapStyle::default(),
            spec(),
            VectorSource::bbox("http://example.org/wfs?x=1"),
        );
        let layer_b = HeatmapLayer::new(
            HeatmapStyle::default(),
            spec(),
            VectorSource::bbox("http://example.org/wfs?x=1"),
        );
        assert_ne!(layer_a.id(), layer_b.id());
    }
}
