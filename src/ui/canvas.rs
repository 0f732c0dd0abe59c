//! Central canvas UI: facility map area.

use super::colors;
use super::popup::{render_facility_popup, render_facility_tooltip};
use crate::geo::{hit_test, render_graticule, render_surface, MapProjection};
use crate::state::AppState;
use eframe::egui::{self, Align2, FontId, Painter, Pos2, Rect, Sense, Vec2};
use std::time::Duration;
use web_time::Instant;

/// Render the map canvas with facility markers and popups.
pub fn render_canvas(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
        let rect = response.rect;

        // Layout follows the canvas size only after resizing settles.
        let now = Instant::now();
        let debounce = Duration::from_millis(state.config.resize_debounce_ms);
        state.viewport.observe_canvas_rect(rect, now, debounce);
        if state.viewport.apply_due_refit(now) {
            log::debug!("Canvas resized to {:?}, layout recomputed", rect.size());
        }
        if let Some(wait) = state.viewport.refit_pending_for(now) {
            ctx.request_repaint_after(wait);
        }

        painter.rect_filled(rect, 0.0, colors::map::BACKGROUND);
        render_graticule(&painter, &state.viewport.projection, rect);

        let highlighted = state
            .viewport
            .pinned
            .as_ref()
            .or(state.viewport.hovered.as_ref());
        render_surface(
            &painter,
            &state.surface,
            &state.viewport.projection,
            highlighted,
        );

        if state.is_loading() {
            painter.rect_filled(rect, 0.0, colors::map::LOADING_VEIL);
            ui.put(
                Rect::from_center_size(rect.center(), Vec2::splat(40.0)),
                egui::Spinner::new().size(40.0),
            );
        }

        if let Some(pos) = response.hover_pos() {
            draw_cursor_position(&painter, rect, &state.viewport.projection, pos);
        }

        handle_canvas_interaction(&response, state);
    });

    show_marker_popups(ctx, state);
}

fn draw_cursor_position(painter: &Painter, rect: Rect, projection: &MapProjection, pos: Pos2) {
    let coord = projection.screen_to_geo(pos);
    painter.text(
        rect.left_bottom() + Vec2::new(10.0, -10.0),
        Align2::LEFT_BOTTOM,
        format!("{:.4}, {:.4}", coord.y, coord.x),
        FontId::monospace(12.0),
        colors::map::OVERLAY_TEXT,
    );
}

fn handle_canvas_interaction(response: &egui::Response, state: &mut AppState) {
    let viewport = &mut state.viewport;

    // Handle dragging for panning
    if response.dragged() {
        viewport.projection.pan_offset += response.drag_delta();
    }

    // Handle scroll for zooming relative to cursor position
    if let Some(cursor_pos) = response.hover_pos() {
        let scroll_delta = response.ctx.input(|i| i.raw_scroll_delta);
        if scroll_delta.y != 0.0 {
            let zoom_factor = (1.0 + scroll_delta.y * 0.001).clamp(0.5, 2.0);
            viewport.projection.zoom_at(zoom_factor, cursor_pos);
        }
    }

    viewport.hovered = response
        .hover_pos()
        .and_then(|pos| hit_test(&state.surface, &viewport.projection, pos));
    if viewport.hovered.is_some() {
        response.ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    // Clicking empty map closes the open popup.
    if response.clicked() {
        viewport.pinned = viewport.hovered.clone();
    }

    // Reset view on double-click
    if response.double_clicked() {
        viewport.fit_to(&state.surface);
    }
}

fn show_marker_popups(ctx: &egui::Context, state: &mut AppState) {
    let projection = &state.viewport.projection;

    if let Some(hovered) = &state.viewport.hovered {
        let already_open = state.viewport.pinned.as_ref() == Some(hovered);
        if let (false, Some((layer, marker))) = (already_open, state.surface.marker(hovered)) {
            let anchor = projection.geo_to_screen(marker.coord) + Vec2::new(10.0, 10.0);
            egui::Area::new(egui::Id::new("facility_hover"))
                .fixed_pos(anchor)
                .order(egui::Order::Tooltip)
                .interactable(false)
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        render_facility_tooltip(ui, &marker.popup, layer.style.fill_color);
                    });
                });
        }
    }

    let Some(pinned) = &state.viewport.pinned else {
        return;
    };
    let Some((layer, marker)) = state.surface.marker(pinned) else {
        return;
    };
    let anchor = projection.geo_to_screen(marker.coord) + Vec2::new(12.0, -12.0);
    let mut close = false;
    egui::Area::new(egui::Id::new("facility_popup"))
        .fixed_pos(anchor)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                close = render_facility_popup(ui, &marker.popup, layer.style.fill_color);
            });
        });

    if close {
        state.viewport.pinned = None;
    }
}
