//! Application state management.
//!
//! All mutable state lives in one `AppState` owned by the app. The UI
//! functions receive it by reference; nothing is held in globals.

mod config;
mod controls;
mod viewport;
mod visibility;

pub use config::AppConfig;
pub use controls::{ControlPanel, ControlState};
pub use viewport::ViewportState;
pub use visibility::{LayerContext, VisibilityController};

use crate::catalog::Catalog;
use crate::facility::{apply_readiness, CategoryLayers, LoadPoll, LoadState};
use crate::geo::{MapSurface, RenderSurface};

/// Root application state containing all sub-states.
pub struct AppState {
    pub config: AppConfig,

    /// Facility categories offered by the viewer
    pub catalog: Catalog,

    /// Layers of the most recent load cycle
    pub layers: CategoryLayers,

    /// Per-category toggle button state
    pub controls: ControlPanel,

    /// Which categories are on the map
    pub visibility: VisibilityController,

    /// Rendered layer stack
    pub surface: MapSurface,

    /// Projection, resize handling and marker selection
    pub viewport: ViewportState,

    /// Application status message displayed in top bar
    pub status_message: String,

    /// Flag set by the UI to start a new load cycle
    pub reload_requested: bool,

    /// Categories still to be shown after the first successful load
    pending_initial: Vec<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_catalog(config, Catalog::facilities())
    }

    pub fn with_catalog(config: AppConfig, catalog: Catalog) -> Self {
        Self {
            layers: CategoryLayers::not_loaded(catalog.ids()),
            controls: ControlPanel::for_catalog(&catalog),
            visibility: VisibilityController::new(),
            surface: MapSurface::new(),
            viewport: ViewportState::default(),
            status_message: "Ready".to_string(),
            reload_requested: false,
            pending_initial: config.initially_visible.clone(),
            config,
            catalog,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.surface.is_loading()
    }

    /// Prepares for a new load cycle.
    ///
    /// Visible layers are taken off the map and every control is disabled
    /// until the cycle reports back.
    pub fn begin_load(&mut self) {
        self.visibility.reset(&mut self.controls, &mut self.surface);
        self.viewport.prune_selection(&self.surface);
        self.layers = CategoryLayers::not_loaded(self.catalog.ids());
        self.controls = ControlPanel::for_catalog(&self.catalog);
        self.surface.set_loading(true);
        self.status_message = "Loading facility data...".to_string();
    }

    /// Applies the outcome of a load cycle.
    ///
    /// The loading indicator is cleared whether the cycle finished or its
    /// task was lost. Returns true if the state changed.
    pub fn finish_load(&mut self, poll: LoadPoll) -> bool {
        match poll {
            LoadPoll::Pending => false,
            LoadPoll::Ready(layers) => {
                self.surface.set_loading(false);
                self.layers = layers;
                apply_readiness(&self.catalog, &self.layers, &mut self.controls);
                self.status_message = self.load_summary();
                self.show_initial();
                true
            }
            LoadPoll::Aborted => {
                self.surface.set_loading(false);
                log::error!("Load cycle ended without a result");
                for id in self.catalog.ids() {
                    self.controls
                        .set_enabled(id, false, Some("Loading did not complete"));
                }
                self.status_message = "Loading failed; try reloading".to_string();
                true
            }
        }
    }

    fn load_summary(&self) -> String {
        let loaded = self.layers.loaded_ids().count();
        let failed = self
            .layers
            .iter()
            .filter(|l| matches!(l.state, LoadState::LoadFailed(_)))
            .count();
        let facilities: usize = self
            .layers
            .iter()
            .filter(|l| l.state.is_loaded())
            .map(|l| l.records.len())
            .sum();

        if failed > 0 {
            format!(
                "{} facilities in {} categories ({} failed to load)",
                facilities, loaded, failed
            )
        } else {
            format!("{} facilities in {} categories", facilities, loaded)
        }
    }

    fn show_initial(&mut self) {
        let ids = std::mem::take(&mut self.pending_initial);
        for id in &ids {
            if self.catalog.get(id).is_none() {
                log::warn!("Ignoring unknown initially visible category {}", id);
                continue;
            }
            self.toggle(id);
        }
        if !self.visibility.visible().is_empty() {
            self.viewport.fit_to(&self.surface);
        }
    }

    fn layer_context(&mut self) -> (&mut VisibilityController, LayerContext<'_, MapSurface>) {
        (
            &mut self.visibility,
            LayerContext {
                catalog: &self.catalog,
                layers: &self.layers,
                controls: &mut self.controls,
                surface: &mut self.surface,
            },
        )
    }

    /// Toggles one category's layer.
    pub fn toggle(&mut self, id: &str) -> bool {
        let (visibility, mut ctx) = self.layer_context();
        let changed = visibility.toggle(id, &mut ctx);
        self.viewport.prune_selection(&self.surface);
        changed
    }

    /// Shows every loaded category.
    pub fn show_all(&mut self) {
        let (visibility, mut ctx) = self.layer_context();
        visibility.show_all(&mut ctx);
    }

    /// Hides every visible category.
    pub fn hide_all(&mut self) {
        let (visibility, mut ctx) = self.layer_context();
        visibility.hide_all(&mut ctx);
        self.viewport.prune_selection(&self.surface);
    }
}
