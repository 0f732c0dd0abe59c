//! Map projection and coordinate transformation.
//!
//! Handles converting between geographic coordinates (lat/lon) and
//! screen coordinates for rendering on the canvas.

use eframe::egui::{Pos2, Rect, Vec2};
use geo_types::{Coord, Rect as GeoRect};

/// Map projection for converting geographic to screen coordinates.
#[derive(Debug, Clone)]
pub struct MapProjection {
    /// Center latitude of the view
    pub center_lat: f64,
    /// Center longitude of the view
    pub center_lon: f64,
    /// Half the visible span in degrees at zoom 1.0
    pub range_deg: f64,
    /// Current zoom level
    pub zoom: f32,
    /// Pan offset in screen pixels
    pub pan_offset: Vec2,
    /// Screen rectangle for the canvas
    pub screen_rect: Rect,
}

impl Default for MapProjection {
    fn default() -> Self {
        Self {
            // Continental US
            center_lat: 39.5,
            center_lon: -98.35,
            range_deg: 14.0,
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
            screen_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)),
        }
    }
}

impl MapProjection {
    pub const MIN_ZOOM: f32 = 0.2;
    pub const MAX_ZOOM: f32 = 200.0;

    /// Recomputes layout for a new canvas rectangle.
    pub fn set_screen_rect(&mut self, screen_rect: Rect) {
        self.screen_rect = screen_rect;
    }

    /// Centers the view on a geographic bounding box (min/max as lon/lat)
    /// and resets zoom and pan so the whole box is visible.
    pub fn fit_bounds(&mut self, min: Coord<f64>, max: Coord<f64>) {
        self.center_lon = (min.x + max.x) / 2.0;
        self.center_lat = (min.y + max.y) / 2.0;

        let half_lon = (max.x - min.x) / 2.0 * self.lon_scale();
        let half_lat = (max.y - min.y) / 2.0;

        let size = self.screen_rect.size();
        let aspect = (size.x.max(1.0) / size.y.max(1.0)) as f64;
        // The shorter screen side spans 2 * range_deg.
        let needed = if aspect >= 1.0 {
            half_lat.max(half_lon / aspect)
        } else {
            half_lon.max(half_lat * aspect)
        };

        // 10% margin, and never closer than ~1km for a single point.
        self.range_deg = (needed * 1.1).max(0.01);
        self.zoom = 1.0;
        self.pan_offset = Vec2::ZERO;
    }

    /// Zooms by `factor`, keeping the geographic point under `anchor` fixed.
    pub fn zoom_at(&mut self, factor: f32, anchor: Pos2) {
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        let anchor_rel = anchor - self.screen_rect.center();
        let ratio = new_zoom / old_zoom;
        self.pan_offset = anchor_rel * (1.0 - ratio) + self.pan_offset * ratio;
        self.zoom = new_zoom;
    }

    /// Degrees of latitude covered by one screen pixel.
    fn degrees_per_pixel(&self) -> f64 {
        let half_size = (self.screen_rect.size().min_elem() / 2.0).max(1.0) as f64;
        self.range_deg / self.zoom as f64 / half_size
    }

    /// Longitude degrees shrink by this factor at the view center.
    fn lon_scale(&self) -> f64 {
        self.center_lat.to_radians().cos().max(0.01)
    }

    /// Screen position of the view center, after panning.
    fn screen_origin(&self) -> Pos2 {
        self.screen_rect.center() + self.pan_offset
    }

    /// Converts geographic coordinates (lon, lat) to screen position.
    ///
    /// Equirectangular, with longitude scaled at the view center's latitude.
    pub fn geo_to_screen(&self, coord: Coord<f64>) -> Pos2 {
        let per_pixel = self.degrees_per_pixel();
        let dx = (coord.x - self.center_lon) * self.lon_scale() / per_pixel;
        // Screen Y grows downward.
        let dy = (self.center_lat - coord.y) / per_pixel;
        self.screen_origin() + Vec2::new(dx as f32, dy as f32)
    }

    /// Converts screen position to geographic coordinates (lon, lat).
    pub fn screen_to_geo(&self, pos: Pos2) -> Coord<f64> {
        let per_pixel = self.degrees_per_pixel();
        let offset = pos - self.screen_origin();
        Coord {
            x: self.center_lon + offset.x as f64 * per_pixel / self.lon_scale(),
            y: self.center_lat - offset.y as f64 * per_pixel,
        }
    }

    /// Geographic area currently covered by the canvas.
    pub fn visible_bounds(&self) -> GeoRect<f64> {
        GeoRect::new(
            self.screen_to_geo(self.screen_rect.left_top()),
            self.screen_to_geo(self.screen_rect.right_bottom()),
        )
    }

    /// True if `coord` lies within the visible area grown by `margin_deg`.
    pub fn is_visible(&self, coord: Coord<f64>, margin_deg: f64) -> bool {
        let bounds = self.visible_bounds();
        let (min, max) = (bounds.min(), bounds.max());
        (min.x - margin_deg..=max.x + margin_deg).contains(&coord.x)
            && (min.y - margin_deg..=max.y + margin_deg).contains(&coord.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> MapProjection {
        let mut p = MapProjection::default();
        p.set_screen_rect(Rect::from_min_size(Pos2::ZERO, Vec2::new(1000.0, 500.0)));
        p
    }

    #[test]
    fn test_center_maps_to_screen_center() {
        let p = projection();
        let pos = p.geo_to_screen(Coord {
            x: p.center_lon,
            y: p.center_lat,
        });
        assert!((pos - p.screen_rect.center()).length() < 1e-3);
    }

    #[test]
    fn test_screen_round_trip() {
        let mut p = projection();
        p.zoom = 3.0;
        p.pan_offset = Vec2::new(40.0, -25.0);
        let coord = Coord {
            x: -104.99,
            y: 39.74,
        };
        let back = p.screen_to_geo(p.geo_to_screen(coord));
        assert!((back.x - coord.x).abs() < 1e-3);
        assert!((back.y - coord.y).abs() < 1e-3);
    }

    #[test]
    fn test_fit_bounds_shows_both_corners() {
        let mut p = projection();
        p.zoom = 7.0;
        let min = Coord { x: -124.0, y: 32.0 };
        let max = Coord { x: -67.0, y: 48.0 };
        p.fit_bounds(min, max);

        assert_eq!(p.zoom, 1.0);
        assert!(p.is_visible(min, 0.0));
        assert!(p.is_visible(max, 0.0));
    }

    #[test]
    fn test_zoom_at_keeps_anchor_fixed() {
        let mut p = projection();
        let anchor = Pos2::new(700.0, 120.0);
        let before = p.screen_to_geo(anchor);
        p.zoom_at(2.0, anchor);
        let after = p.screen_to_geo(anchor);
        assert!((before.x - after.x).abs() < 1e-3);
        assert!((before.y - after.y).abs() < 1e-3);
    }
}
