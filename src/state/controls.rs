//! Category toggle control state.

use crate::catalog::Catalog;
use std::collections::HashMap;

/// State of one category's toggle button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    /// Whether the button accepts clicks
    pub enabled: bool,
    /// Whether the button is drawn as pressed (layer visible)
    pub active: bool,
    /// Explanation shown while disabled
    pub tooltip: Option<String>,
}

/// Toggle controls keyed by category id.
#[derive(Debug, Clone, Default)]
pub struct ControlPanel {
    controls: HashMap<String, ControlState>,
}

impl ControlPanel {
    /// One disabled, inactive control per catalog category.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        let controls = catalog
            .ids()
            .map(|id| {
                (
                    id.to_string(),
                    ControlState {
                        enabled: false,
                        active: false,
                        tooltip: Some("Loading...".to_string()),
                    },
                )
            })
            .collect();
        Self { controls }
    }

    pub fn get(&self, id: &str) -> Option<&ControlState> {
        self.controls.get(id)
    }

    /// Unknown ids count as disabled.
    pub fn is_enabled(&self, id: &str) -> bool {
        self.controls.get(id).is_some_and(|c| c.enabled)
    }

    pub fn set_enabled(&mut self, id: &str, enabled: bool, tooltip: Option<&str>) {
        if let Some(control) = self.controls.get_mut(id) {
            control.enabled = enabled;
            control.tooltip = tooltip.map(str::to_string);
            if !enabled {
                control.active = false;
            }
        }
    }

    pub fn set_active(&mut self, id: &str, active: bool) {
        if let Some(control) = self.controls.get_mut(id) {
            control.active = active;
        }
    }
}
