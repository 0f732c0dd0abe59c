//! Layer visibility controller.
//!
//! Each category is either hidden or visible. Toggling flips exactly one
//! direction based on current membership in the visibility set, so
//! repeated show/hide requests settle without errors.

use super::ControlPanel;
use crate::catalog::Catalog;
use crate::facility::CategoryLayers;
use crate::geo::{LayerStyle, RenderSurface};

/// Category ids currently on the map, in the order they were shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilitySet {
    ids: Vec<String>,
}

impl VisibilitySet {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|v| v == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn insert(&mut self, id: &str) {
        if !self.contains(id) {
            self.ids.push(id.to_string());
        }
    }

    fn remove(&mut self, id: &str) {
        self.ids.retain(|v| v != id);
    }
}

/// Everything a visibility change reads or writes.
pub struct LayerContext<'a, S: RenderSurface + ?Sized> {
    pub catalog: &'a Catalog,
    pub layers: &'a CategoryLayers,
    pub controls: &'a mut ControlPanel,
    pub surface: &'a mut S,
}

/// Tracks which categories are shown and keeps the surface in step.
#[derive(Debug, Clone, Default)]
pub struct VisibilityController {
    visible: VisibilitySet,
}

impl VisibilityController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> &VisibilitySet {
        &self.visible
    }

    /// Shows a hidden category or hides a visible one.
    ///
    /// Disabled and unknown categories are ignored entirely. Returns true
    /// if anything changed.
    pub fn toggle<S: RenderSurface + ?Sized>(
        &mut self,
        id: &str,
        ctx: &mut LayerContext<'_, S>,
    ) -> bool {
        if !ctx.controls.is_enabled(id) {
            log::debug!("Ignoring toggle of disabled category {}", id);
            return false;
        }

        if self.visible.contains(id) {
            ctx.surface.remove_layer(id);
            self.visible.remove(id);
            ctx.controls.set_active(id, false);
            return true;
        }

        let (Some(def), Some(layer)) = (ctx.catalog.get(id), ctx.layers.get(id)) else {
            log::warn!("Toggle of {} with no definition or layer", id);
            return false;
        };
        ctx.surface.add_layer(id, layer, &LayerStyle::for_color(def.color));
        self.visible.insert(id);
        ctx.controls.set_active(id, true);
        true
    }

    /// Shows every category that is not already visible.
    pub fn show_all<S: RenderSurface + ?Sized>(&mut self, ctx: &mut LayerContext<'_, S>) {
        let hidden: Vec<&'static str> = ctx
            .catalog
            .ids()
            .filter(|id| !self.visible.contains(id))
            .collect();
        for id in hidden {
            self.toggle(id, ctx);
        }
    }

    /// Hides every visible category.
    pub fn hide_all<S: RenderSurface + ?Sized>(&mut self, ctx: &mut LayerContext<'_, S>) {
        let shown: Vec<String> = self.visible.iter().map(str::to_string).collect();
        for id in shown {
            self.toggle(&id, ctx);
        }
    }

    /// Removes every visible layer regardless of control state.
    ///
    /// Used before a reload replaces the layers.
    pub fn reset<S: RenderSurface + ?Sized>(
        &mut self,
        controls: &mut ControlPanel,
        surface: &mut S,
    ) {
        for id in self.visible.iter() {
            surface.remove_layer(id);
            controls.set_active(id, false);
        }
        self.visible = VisibilitySet::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategoryDefinition, RecordFilter};
    use crate::facility::{apply_readiness, CategoryLayer, FacilityRecord, LoadError};
    use eframe::egui::Color32;

    /// Records every surface call.
    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<String>,
    }

    impl RenderSurface for RecordingSurface {
        fn add_layer(&mut self, category_id: &str, layer: &CategoryLayer, _style: &LayerStyle) {
            self.calls
                .push(format!("add {} ({})", category_id, layer.records.len()));
        }

        fn remove_layer(&mut self, category_id: &str) {
            self.calls.push(format!("remove {}", category_id));
        }

        fn set_loading(&mut self, loading: bool) {
            self.calls.push(format!("loading {}", loading));
        }
    }

    struct Fixture {
        catalog: Catalog,
        layers: CategoryLayers,
        controls: ControlPanel,
        surface: RecordingSurface,
    }

    impl Fixture {
        fn new() -> Self {
            let def = |id: &'static str, source: Option<&'static str>| CategoryDefinition {
                id,
                source,
                color: Color32::GOLD,
                display_name: id,
                description: "",
                filter: RecordFilter::All,
            };
            let catalog = Catalog::new(vec![
                def("mrf", Some("a.geojson")),
                def("glass", Some("a.geojson")),
                def("broken", Some("b.geojson")),
                def("composting", None),
            ]);
            let point = FacilityRecord::point(-100.0, 40.0, Default::default());
            let layers = CategoryLayers::new(vec![
                CategoryLayer::loaded("mrf", vec![point.clone()]),
                CategoryLayer::loaded("glass", vec![point.clone(), point]),
                CategoryLayer::failed("broken", LoadError::Fetch("HTTP 404".to_string())),
                CategoryLayer::no_data("composting"),
            ]);
            let mut controls = ControlPanel::for_catalog(&catalog);
            apply_readiness(&catalog, &layers, &mut controls);

            Self {
                catalog,
                layers,
                controls,
                surface: RecordingSurface::default(),
            }
        }

        fn ctx(&mut self) -> LayerContext<'_, RecordingSurface> {
            LayerContext {
                catalog: &self.catalog,
                layers: &self.layers,
                controls: &mut self.controls,
                surface: &mut self.surface,
            }
        }
    }

    fn ids(controller: &VisibilityController) -> Vec<&str> {
        controller.visible().iter().collect()
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut fixture = Fixture::new();
        let mut controller = VisibilityController::new();

        assert!(controller.toggle("glass", &mut fixture.ctx()));
        assert_eq!(ids(&controller), vec!["glass"]);
        assert!(fixture.controls.get("glass").unwrap().active);

        assert!(controller.toggle("glass", &mut fixture.ctx()));
        assert!(controller.visible().is_empty());
        assert!(!fixture.controls.get("glass").unwrap().active);

        assert_eq!(fixture.surface.calls, vec!["add glass (2)", "remove glass"]);
    }

    #[test]
    fn test_disabled_controls_are_inert() {
        let mut fixture = Fixture::new();
        let mut controller = VisibilityController::new();

        for id in ["broken", "composting", "not-in-catalog"] {
            assert!(!controller.toggle(id, &mut fixture.ctx()));
        }

        assert!(controller.visible().is_empty());
        assert!(fixture.surface.calls.is_empty());
    }

    #[test]
    fn test_show_all_then_hide_all() {
        let mut fixture = Fixture::new();
        let mut controller = VisibilityController::new();

        controller.show_all(&mut fixture.ctx());
        let loaded: Vec<&str> = fixture.layers.loaded_ids().collect();
        assert_eq!(ids(&controller), loaded);

        controller.hide_all(&mut fixture.ctx());
        assert!(controller.visible().is_empty());
        let calls = fixture.surface.calls.len();

        controller.hide_all(&mut fixture.ctx());
        assert!(controller.visible().is_empty());
        assert_eq!(fixture.surface.calls.len(), calls);
    }

    #[test]
    fn test_show_all_keeps_already_visible_layers() {
        let mut fixture = Fixture::new();
        let mut controller = VisibilityController::new();

        controller.toggle("mrf", &mut fixture.ctx());
        controller.show_all(&mut fixture.ctx());
        controller.show_all(&mut fixture.ctx());

        assert_eq!(ids(&controller), vec!["mrf", "glass"]);
        assert_eq!(
            fixture.surface.calls,
            vec!["add mrf (1)", "add glass (2)"]
        );
    }

    #[test]
    fn test_reset_clears_surface() {
        let mut fixture = Fixture::new();
        let mut controller = VisibilityController::new();
        controller.show_all(&mut fixture.ctx());

        controller.reset(&mut fixture.controls, &mut fixture.surface);

        assert!(controller.visible().is_empty());
        assert!(fixture.surface.calls.ends_with(&[
            "remove mrf".to_string(),
            "remove glass".to_string()
        ]));
        assert!(!fixture.controls.get("mrf").unwrap().active);
    }
}
