//! Pollutant-concentration heatmap layer for an interactive map.
//!
//! The [`service::HeatmapService`] owns the pollutant selection state,
//! derives layer configuration from the registry, and replaces the
//! heatmap layer on an externally-owned map. Feature loading happens
//! through [`source::VectorSource`], driven by the map per viewport.

pub mod layer;
pub mod notify;
pub mod service;
pub mod source;

pub use layer::{HeatmapLayer, WeightSpec};
pub use notify::ChangeNotifier;
pub use service::{HeatmapService, MapBackend, SearchFilters};
pub use source::{FeatureFetcher, HttpFeatureFetcher, LoadingStrategy, VectorSource};
