//! Map viewport state: projection, resize debounce and marker selection.

use crate::geo::{MapProjection, MapSurface, MarkerRef};
use eframe::egui::Rect;
use std::time::Duration;
use web_time::Instant;

/// Viewport state for the map canvas.
#[derive(Debug, Clone, Default)]
pub struct ViewportState {
    pub projection: MapProjection,
    /// Canvas rectangle seen on the most recent frame
    last_canvas_rect: Option<Rect>,
    /// When the pending layout refit becomes due
    refit_due: Option<Instant>,
    /// Marker under the pointer this frame
    pub hovered: Option<MarkerRef>,
    /// Marker whose popup is pinned open
    pub pinned: Option<MarkerRef>,
}

impl ViewportState {
    /// Records this frame's canvas rectangle.
    ///
    /// The first rectangle is applied at once; later size changes schedule
    /// a refit `debounce` after the most recent change.
    pub fn observe_canvas_rect(&mut self, rect: Rect, now: Instant, debounce: Duration) {
        match self.last_canvas_rect {
            None => self.projection.set_screen_rect(rect),
            Some(previous) if previous != rect => self.refit_due = Some(now + debounce),
            Some(_) => {}
        }
        self.last_canvas_rect = Some(rect);
    }

    /// Time left until a pending refit, if any.
    pub fn refit_pending_for(&self, now: Instant) -> Option<Duration> {
        self.refit_due.map(|due| due.saturating_duration_since(now))
    }

    /// Applies the pending layout once its debounce has elapsed.
    ///
    /// Only the canvas rectangle changes; zoom, pan and center are kept.
    /// Returns true if the layout was recomputed.
    pub fn apply_due_refit(&mut self, now: Instant) -> bool {
        match (self.refit_due, self.last_canvas_rect) {
            (Some(due), Some(rect)) if now >= due => {
                self.refit_due = None;
                self.projection.set_screen_rect(rect);
                true
            }
            _ => false,
        }
    }

    /// Fits the view to every marker on the surface, or to the default
    /// view when the surface is empty.
    pub fn fit_to(&mut self, surface: &MapSurface) {
        match surface.bounds() {
            Some(bounds) => self.projection.fit_bounds(bounds.min(), bounds.max()),
            None => {
                let screen_rect = self.projection.screen_rect;
                self.projection = MapProjection {
                    screen_rect,
                    ..Default::default()
                };
            }
        }
    }

    /// Drops selections that point at markers no longer on the surface.
    pub fn prune_selection(&mut self, surface: &MapSurface) {
        if self.pinned.as_ref().is_some_and(|m| surface.marker(m).is_none()) {
            self.pinned = None;
        }
        if self.hovered.as_ref().is_some_and(|m| surface.marker(m).is_none()) {
            self.hovered = None;
        }
    }
}
