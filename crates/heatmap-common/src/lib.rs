//! Common types shared across the pollution-heatmap crates.

pub mod bbox;
pub mod domain;
pub mod error;
pub mod pollutant;
pub mod style;
pub mod time;

pub use bbox::BoundingBox;
pub use domain::Domain;
pub use error::{HeatmapError, HeatmapResult};
pub use pollutant::{DerivedConfig, PollutantRegistry, PollutantSpec};
pub use style::{Color, HeatmapStyle};
pub use time::TimeRange;
