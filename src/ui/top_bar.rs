//! Top bar UI: app title, load status, and bulk visibility actions.

use super::colors;
use crate::state::AppState;
use eframe::egui::{self, Color32, RichText};
use egui_phosphor::regular;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(
                    RichText::new(format!("{} Recycling Facilities", regular::RECYCLE))
                        .strong()
                        .size(16.0)
                        .color(Color32::WHITE),
                );

                ui.separator();

                if state.is_loading() {
                    ui.spinner();
                }
                ui.label(
                    RichText::new(&state.status_message)
                        .size(13.0)
                        .color(colors::ui::VALUE),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let loading = state.is_loading();

                    let reload = ui
                        .add_enabled(
                            !loading,
                            egui::Button::new(format!("{} Reload", regular::ARROWS_CLOCKWISE)),
                        )
                        .on_hover_text("Fetch all facility data again");
                    if reload.clicked() {
                        state.reload_requested = true;
                    }

                    ui.separator();

                    if ui
                        .add_enabled(
                            !loading,
                            egui::Button::new(format!("{} Hide all", regular::EYE_SLASH)),
                        )
                        .on_hover_text("Ctrl+Shift+H")
                        .clicked()
                    {
                        state.hide_all();
                    }
                    if ui
                        .add_enabled(
                            !loading,
                            egui::Button::new(format!("{} Show all", regular::EYE)),
                        )
                        .on_hover_text("Ctrl+Shift+A")
                        .clicked()
                    {
                        state.show_all();
                    }
                });
            });
        });
}
