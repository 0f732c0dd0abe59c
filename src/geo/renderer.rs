//! Facility layer rendering.
//!
//! Renders the map surface's markers to the egui canvas and resolves
//! which marker sits under the pointer.

use super::{LayerStyle, MapProjection, MapSurface, MarkerRef};
use eframe::egui::{Color32, FontId, Painter, Pos2, Rect, Stroke};
use geo_types::Coord;

/// Extra pick radius around a marker, in pixels.
const PICK_SLOP: f32 = 3.0;

/// Renders every layer on the surface, back to front.
pub fn render_surface(
    painter: &Painter,
    surface: &MapSurface,
    projection: &MapProjection,
    highlighted: Option<&MarkerRef>,
) {
    for layer in surface.layers() {
        for (index, marker) in layer.markers.iter().enumerate() {
            if !projection.is_visible(marker.coord, 0.5) {
                continue;
            }
            let is_highlighted = highlighted
                .is_some_and(|h| h.category_id == layer.category_id && h.index == index);
            let style = if is_highlighted {
                layer.style.highlighted()
            } else {
                layer.style
            };
            render_marker(painter, projection.geo_to_screen(marker.coord), &style);
        }
    }
}

fn render_marker(painter: &Painter, pos: Pos2, style: &LayerStyle) {
    painter.circle_filled(pos, style.radius, style.fill_color);
    painter.circle_stroke(
        pos,
        style.radius,
        Stroke::new(style.stroke_width, style.stroke_color),
    );
}

/// Finds the topmost marker under `pos`.
pub fn hit_test(surface: &MapSurface, projection: &MapProjection, pos: Pos2) -> Option<MarkerRef> {
    for layer in surface.layers().rev() {
        let pick_radius = layer.style.radius + PICK_SLOP;
        let hit = layer
            .markers
            .iter()
            .enumerate()
            .rev()
            .find(|(_, m)| projection.geo_to_screen(m.coord).distance(pos) <= pick_radius);
        if let Some((index, _)) = hit {
            return Some(MarkerRef {
                category_id: layer.category_id.clone(),
                index,
            });
        }
    }
    None
}

/// Draws a light lon/lat graticule as the base map.
pub fn render_graticule(painter: &Painter, projection: &MapProjection, rect: Rect) {
    let bounds = projection.visible_bounds();
    let (min_lon, min_lat) = bounds.min().x_y();
    let (max_lon, max_lat) = bounds.max().x_y();
    let span = (max_lon - min_lon).max(max_lat - min_lat);
    let step = graticule_step(span);

    let line_color = Color32::from_rgba_unmultiplied(90, 110, 140, 60);
    let label_color = Color32::from_rgba_unmultiplied(150, 160, 180, 160);
    let stroke = Stroke::new(0.5, line_color);
    let font = FontId::proportional(10.0);

    let mut lon = (min_lon / step).floor() * step;
    while lon <= max_lon {
        let top = projection.geo_to_screen(Coord { x: lon, y: max_lat });
        let bottom = projection.geo_to_screen(Coord { x: lon, y: min_lat });
        painter.line_segment([top, bottom], stroke);
        painter.text(
            Pos2::new(top.x + 2.0, rect.top() + 2.0),
            eframe::egui::Align2::LEFT_TOP,
            format_degrees(lon, 'E', 'W'),
            font.clone(),
            label_color,
        );
        lon += step;
    }

    let mut lat = (min_lat / step).floor() * step;
    while lat <= max_lat {
        let left = projection.geo_to_screen(Coord { x: min_lon, y: lat });
        let right = projection.geo_to_screen(Coord { x: max_lon, y: lat });
        painter.line_segment([left, right], stroke);
        painter.text(
            Pos2::new(rect.left() + 2.0, left.y - 2.0),
            eframe::egui::Align2::LEFT_BOTTOM,
            format_degrees(lat, 'N', 'S'),
            font.clone(),
            label_color,
        );
        lat += step;
    }
}

/// Picks a round grid spacing giving roughly 4-10 lines across the view.
fn graticule_step(span_deg: f64) -> f64 {
    const STEPS: [f64; 9] = [0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 15.0, 30.0];
    STEPS
        .iter()
        .copied()
        .find(|s| span_deg / s <= 10.0)
        .unwrap_or(30.0)
}

fn format_degrees(value: f64, positive: char, negative: char) -> String {
    let hemisphere = if value >= 0.0 { positive } else { negative };
    format!("{:.1}°{}", value.abs(), hemisphere)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::{CategoryLayer, FacilityRecord};
    use crate::geo::RenderSurface;
    use eframe::egui::Vec2;

    fn surface_with_points() -> (MapSurface, MapProjection) {
        let mut projection = MapProjection::default();
        projection.set_screen_rect(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)));

        let mut surface = MapSurface::new();
        let center = FacilityRecord::point(projection.center_lon, projection.center_lat, Default::default());
        surface.add_layer(
            "bottom",
            &CategoryLayer::loaded("bottom", vec![center.clone()]),
            &LayerStyle::for_color(Color32::RED),
        );
        surface.add_layer(
            "top",
            &CategoryLayer::loaded("top", vec![center]),
            &LayerStyle::for_color(Color32::BLUE),
        );
        (surface, projection)
    }

    #[test]
    fn test_hit_test_prefers_topmost_layer() {
        let (surface, projection) = surface_with_points();
        let hit = hit_test(&surface, &projection, projection.screen_rect.center()).unwrap();
        assert_eq!(hit.category_id, "top");
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn test_hit_test_misses_far_points() {
        let (surface, projection) = surface_with_points();
        let far = projection.screen_rect.center() + Vec2::new(50.0, 50.0);
        assert!(hit_test(&surface, &projection, far).is_none());
    }

    #[test]
    fn test_graticule_step() {
        assert_eq!(graticule_step(0.5), 0.1);
        assert_eq!(graticule_step(28.0), 5.0);
        assert_eq!(graticule_step(360.0), 30.0);
    }
}
