//! WFS GetFeature request construction.
//!
//! Example of the URL shape a geoserver expects:
//! `http://host:8080/geoserver/wfs?service=WFS&version=1.1.0&request=GetFeature&typename=stations_values&outputFormat=application/json&srsname=EPSG:4326&CQL_FILTER=(['ts'] BEFORE '2022-03-13T23:00:00Z')`

use serde::{Deserialize, Serialize};

use heatmap_common::BoundingBox;

const WFS_VERSION: &str = "1.1.0";
const OUTPUT_FORMAT: &str = "application/json";
const SRS_NAME: &str = "EPSG:4326";

/// A GetFeature query against a WFS endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetFeatureRequest {
    /// Endpoint base, e.g. "http://host:8080/geoserver/wfs"
    pub base_url: String,

    /// Feature type names (layer names), comma-joined in the URL
    pub type_names: Vec<String>,

    /// Optional CQL filter expression, passed verbatim apart from
    /// percent-encoding
    pub cql_filter: Option<String>,
}

impl GetFeatureRequest {
    pub fn new(base_url: impl Into<String>, type_names: Vec<String>) -> Self {
        Self {
            base_url: base_url.into(),
            type_names,
            cql_filter: None,
        }
    }

    pub fn with_cql_filter(mut self, filter: impl Into<String>) -> Self {
        let filter = filter.into();
        self.cql_filter = if filter.is_empty() {
            None
        } else {
            Some(filter)
        };
        self
    }

    /// Build the query URL without a spatial constraint.
    pub fn to_url(&self) -> String {
        let mut url = format!(
            "{}?service=WFS&version={}&request=GetFeature&typename={}&outputFormat={}&srsname={}",
            self.base_url,
            WFS_VERSION,
            self.type_names.join(","),
            encode_query_value(OUTPUT_FORMAT),
            SRS_NAME,
        );
        if let Some(filter) = &self.cql_filter {
            url.push_str("&CQL_FILTER=");
            url.push_str(&encode_query_value(filter));
        }
        url
    }

    /// Build the query URL restricted to one extent, for bbox-strategy
    /// loading.
    pub fn url_for_extent(&self, bbox: &BoundingBox) -> String {
        format!("{}&bbox={}", self.to_url(), bbox.to_wfs_param())
    }
}

/// Percent-encode the characters that break query strings in practice.
/// WFS servers accept the rest of the CQL alphabet raw.
fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '&' => out.push_str("%26"),
            '+' => out.push_str("%2B"),
            '/' => out.push_str("%2F"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_url_minimal() {
        let request = GetFeatureRequest::new(
            "http://example.org/geoserver/wfs",
            vec!["sulfurdioxide".to_string()],
        );
        assert_eq!(
            request.to_url(),
            "http://example.org/geoserver/wfs?service=WFS&version=1.1.0&request=GetFeature\
             &typename=sulfurdioxide&outputFormat=application%2Fjson&srsname=EPSG:4326"
        );
    }

    #[test]
    fn test_to_url_with_filter_and_multiple_types() {
        let request = GetFeatureRequest::new(
            "http://example.org/wfs",
            vec!["aerosol".to_string(), "stations".to_string()],
        )
        .with_cql_filter("(['delta_time'] BEFORE '2022-03-13T23:00:00Z')");

        let url = request.to_url();
        assert!(url.contains("typename=aerosol,stations"));
        assert!(url.contains(
            "CQL_FILTER=(['delta_time']%20BEFORE%20'2022-03-13T23:00:00Z')"
        ));
    }

    #[test]
    fn test_empty_filter_is_dropped() {
        let request = GetFeatureRequest::new("http://example.org/wfs", vec!["x".to_string()])
            .with_cql_filter("");
        assert!(!request.to_url().contains("CQL_FILTER"));
    }

    #[test]
    fn test_url_for_extent_appends_bbox() {
        let request =
            GetFeatureRequest::new("http://example.org/wfs", vec!["methane".to_string()]);
        let bbox = BoundingBox::new(16.0, 40.0, 18.0, 42.0);
        let url = request.url_for_extent(&bbox);
        assert!(url.ends_with("&bbox=16,40,18,42,EPSG:4326"));
    }
}
