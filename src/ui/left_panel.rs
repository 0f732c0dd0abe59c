//! Left panel UI: facility category toggles.

use super::colors;
use crate::catalog::CategoryDefinition;
use crate::facility::{CategoryLayer, LoadState};
use crate::state::{AppState, ControlState};
use eframe::egui::{self, RichText, ScrollArea, Sense, Vec2};
use egui_phosphor::regular;

pub fn render_left_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::left("left_panel")
        .resizable(true)
        .default_width(260.0)
        .min_width(200.0)
        .max_width(400.0)
        .show(ctx, |ui| {
            ui.heading("Facility Types");
            ui.separator();

            let mut clicked = None;
            ScrollArea::vertical().show(ui, |ui| {
                for def in state.catalog.iter() {
                    let Some(control) = state.controls.get(def.id) else {
                        continue;
                    };
                    let layer = state.layers.get(def.id);
                    if category_row(ui, def, control, layer).clicked() {
                        clicked = Some(def.id);
                    }
                    ui.add_space(2.0);
                }
            });

            // Applied after the loop so the catalog borrow has ended.
            if let Some(id) = clicked {
                state.toggle(id);
            }

            ui.add_space(10.0);
            ui.label(
                RichText::new(format!("{} markers shown", visible_marker_count(state)))
                    .small()
                    .color(colors::ui::LABEL),
            );
        });
}

fn category_row(
    ui: &mut egui::Ui,
    def: &CategoryDefinition,
    control: &ControlState,
    layer: Option<&CategoryLayer>,
) -> egui::Response {
    ui.horizontal(|ui| {
        let (swatch, _) = ui.allocate_exact_size(Vec2::splat(14.0), Sense::hover());
        let color = if control.enabled {
            def.color
        } else {
            def.color.gamma_multiply(0.35)
        };
        ui.painter().circle_filled(swatch.center(), 6.0, color);

        let failed = matches!(layer.map(|l| &l.state), Some(LoadState::LoadFailed(_)));
        let text = match layer {
            Some(l) if l.state.is_loaded() => {
                RichText::new(format!("{}  ({})", def.display_name, l.records.len()))
            }
            _ if failed => RichText::new(format!("{} {}", def.display_name, regular::WARNING))
                .color(colors::ui::WARNING),
            _ => RichText::new(def.display_name),
        };

        let button = egui::Button::new(text)
            .selected(control.active)
            .min_size(Vec2::new(ui.available_width(), 0.0));
        let mut response = ui.add_enabled(control.enabled, button);
        if let Some(tooltip) = &control.tooltip {
            response = response.on_disabled_hover_text(tooltip);
        }
        if !def.description.is_empty() {
            response = response.on_hover_text(def.description);
        }
        response
    })
    .inner
}

fn visible_marker_count(state: &AppState) -> usize {
    state.surface.layers().map(|l| l.markers.len()).sum()
}
