//! The heatmap service: selection state, derived configuration, and
//! layer replacement against an externally-owned map.

use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

use heatmap_common::{DerivedConfig, Domain, HeatmapStyle, PollutantRegistry};

use crate::layer::{HeatmapLayer, WeightSpec};
use crate::notify::ChangeNotifier;
use crate::source::VectorSource;

/// Feature attribute carrying observation time on the remote layers.
pub const TIME_FIELD: &str = "delta_time";

/// The map collaborator: builds feature-query URLs and owns the
/// attached layers.
pub trait MapBackend {
    /// URL serving features for the given layers under the given
    /// filter expression.
    fn feature_url(&self, layers: &[String], filter: &str) -> String;

    /// Attach a layer; the map takes ownership.
    fn add_layer(&mut self, layer: HeatmapLayer);

    /// Detach a layer by id. Returns false when no such layer is
    /// attached.
    fn remove_layer(&mut self, id: Uuid) -> bool;
}

/// The search collaborator: serializes filter expressions for a field.
pub trait SearchFilters {
    fn filter_expression(&self, field: &str) -> String;
}

/// Pollution heatmap component over a map and a search service.
///
/// Holds the single current selection; every setter call atomically
/// replaces the derived configuration, so readers never observe a
/// partially-updated state.
pub struct HeatmapService<M, S> {
    map: M,
    search: S,
    registry: PollutantRegistry,
    style: HeatmapStyle,
    selection: DerivedConfig,
    layer_id: Option<Uuid>,
    changed: ChangeNotifier,
}

impl<M: MapBackend, S: SearchFilters> HeatmapService<M, S> {
    /// Service with the built-in pollutant table and default style,
    /// starting with nothing selected.
    pub fn new(map: M, search: S) -> Self {
        Self {
            map,
            search,
            registry: PollutantRegistry::builtin(),
            style: HeatmapStyle::default(),
            selection: DerivedConfig::empty(""),
            layer_id: None,
            changed: ChangeNotifier::new(),
        }
    }

    pub fn with_registry(mut self, registry: PollutantRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_style(mut self, style: HeatmapStyle) -> Self {
        self.style = style;
        self
    }

    /// The current derived configuration.
    pub fn selection(&self) -> &DerivedConfig {
        &self.selection
    }

    pub fn domain(&self) -> Domain {
        self.selection.domain
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    /// Subscribe to pollutant-change notifications. Prior emissions
    /// are not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.changed.subscribe()
    }

    /// Select a pollutant by code and notify subscribers.
    ///
    /// Unknown codes (including the empty string) select the empty
    /// configuration: no layers, zero weight and domain. That fallback
    /// is silent by design; subscribers still hear the change.
    pub fn select_pollutant(&mut self, code: &str) {
        let derived = self.registry.derive(code);
        info!(
            code = %code,
            layers = derived.layers.len(),
            domain_max = derived.domain.max,
            "Pollutant selected"
        );
        self.selection = derived;
        self.changed.emit(code);
    }

    /// Re-emit the current selection without re-deriving it.
    pub fn refresh(&self) {
        self.changed.emit(&self.selection.code);
    }

    /// The time filter expression for the query, as serialized by the
    /// search collaborator. Opaque to this component.
    pub fn time_filter(&self) -> String {
        self.search.filter_expression(TIME_FIELD)
    }

    /// Replace the heatmap layer on the map.
    ///
    /// Tears down the previous layer, binds a fresh bbox-strategy
    /// source to the collaborator-built feature URL, and attaches a new
    /// layer carrying the current weight configuration. Feature loading
    /// happens later, driven by the map per viewport; requests still in
    /// flight against the old source are abandoned to their owner.
    pub fn load(&mut self) {
        self.remove_layer();

        let url = self
            .map
            .feature_url(&self.selection.layers, &self.time_filter());
        let source = VectorSource::bbox(url);
        let weight = WeightSpec::from_config(&self.selection);
        let layer = HeatmapLayer::new(self.style.clone(), weight, source);

        let id = layer.id();
        self.map.add_layer(layer);
        self.layer_id = Some(id);

        info!(
            layer = %id,
            pollutant = %self.selection.code,
            "Heatmap layer attached"
        );
    }

    /// Remove the tracked heatmap layer, if any. Safe to call
    /// repeatedly or before any load.
    pub fn remove_layer(&mut self) {
        if let Some(id) = self.layer_id.take() {
            let removed = self.map.remove_layer(id);
            debug!(layer = %id, removed = removed, "Heatmap layer detached");
        }
    }
}
