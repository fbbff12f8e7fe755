//! Vector feature source with incremental, extent-based loading.
//!
//! Mirrors the loading model of web map widgets: the source is bound to
//! a query URL at construction, and the map asks it to load features
//! for each extent that becomes visible. Extents already covered by a
//! previous load are skipped.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use heatmap_common::{BoundingBox, HeatmapError, HeatmapResult};
use wfs_protocol::{Feature, FeatureCollection};

/// Fetches and decodes a feature document from a URL.
#[async_trait]
pub trait FeatureFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> HeatmapResult<FeatureCollection>;
}

/// HTTP fetcher for GeoJSON feature documents.
pub struct HttpFeatureFetcher {
    client: reqwest::Client,
}

impl HttpFeatureFetcher {
    pub fn new() -> HeatmapResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| HeatmapError::FetchError(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeatureFetcher for HttpFeatureFetcher {
    async fn fetch(&self, url: &str) -> HeatmapResult<FeatureCollection> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| HeatmapError::FetchError(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| HeatmapError::FetchError(e.to_string()))?;

        FeatureCollection::from_json(&body)
    }
}

/// How a source schedules its loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingStrategy {
    /// One load of the bound URL, no spatial constraint.
    All,
    /// One load per uncovered viewport extent, with a bbox constraint.
    BoundingBox,
}

/// A feature source bound to a query URL.
#[derive(Debug)]
pub struct VectorSource {
    url: String,
    strategy: LoadingStrategy,
    loaded_extents: Vec<BoundingBox>,
    features: Vec<Feature>,
}

impl VectorSource {
    /// Source with the bounding-box strategy (the heatmap default).
    pub fn bbox(url: impl Into<String>) -> Self {
        Self::with_strategy(url, LoadingStrategy::BoundingBox)
    }

    pub fn with_strategy(url: impl Into<String>, strategy: LoadingStrategy) -> Self {
        Self {
            url: url.into(),
            strategy,
            loaded_extents: Vec::new(),
            features: Vec::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn strategy(&self) -> LoadingStrategy {
        self.strategy
    }

    /// Features accumulated over all loads so far.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    fn is_covered(&self, extent: &BoundingBox) -> bool {
        self.loaded_extents.iter().any(|e| e.covers(extent))
    }

    /// Load features for a newly visible extent.
    ///
    /// Returns the number of features added; 0 when the extent was
    /// already covered. On failure the accumulated state is unchanged,
    /// so the caller may retry the same extent.
    pub async fn load_extent(
        &mut self,
        extent: BoundingBox,
        fetcher: &dyn FeatureFetcher,
    ) -> HeatmapResult<usize> {
        let (url, mark) = match self.strategy {
            LoadingStrategy::All => {
                if !self.loaded_extents.is_empty() {
                    return Ok(0);
                }
                (self.url.clone(), BoundingBox::world())
            }
            LoadingStrategy::BoundingBox => {
                if self.is_covered(&extent) {
                    debug!(extent = %extent.to_wfs_param(), "Extent already loaded");
                    return Ok(0);
                }
                (format!("{}&bbox={}", self.url, extent.to_wfs_param()), extent)
            }
        };

        let collection = fetcher.fetch(&url).await?;
        let added = collection.features.len();

        self.features.extend(collection.features);
        self.loaded_extents.push(mark);

        debug!(
            added = added,
            total = self.features.len(),
            "Loaded features for extent"
        );
        Ok(added)
    }
}
