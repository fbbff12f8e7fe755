//! Error types for the pollution-heatmap crates.

use thiserror::Error;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Primary error type for heatmap operations.
#[derive(Debug, Error)]
pub enum HeatmapError {
    // === Configuration Errors ===
    #[error("Invalid pollutant registry: {0}")]
    InvalidRegistry(String),

    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    // === Request Errors ===
    #[error("Invalid BBOX: {0}")]
    InvalidBbox(String),

    #[error("Invalid time specification: {0}")]
    InvalidTime(String),

    // === Source Errors ===
    #[error("Feature fetch failed: {0}")]
    FetchError(String),

    #[error("Invalid GeoJSON: {0}")]
    GeoJsonError(String),

    // === Infrastructure Errors ===
    #[error("Internal error: {0}")]
    InternalError(String),
}

// Conversion from common error types
impl From<std::io::Error> for HeatmapError {
    fn from(err: std::io::Error) -> Self {
        HeatmapError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for HeatmapError {
    fn from(err: serde_json::Error) -> Self {
        HeatmapError::GeoJsonError(format!("JSON error: {}", err))
    }
}
