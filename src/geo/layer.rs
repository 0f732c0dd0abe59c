//! Renderable facility layers and the surface that holds them.

use crate::facility::{CategoryLayer, FacilityPopup};
use eframe::egui::Color32;
use geo_types::{Coord, Rect};

/// Visual style applied to every marker of a layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerStyle {
    pub fill_color: Color32,
    pub radius: f32,
    pub stroke_width: f32,
    pub stroke_color: Color32,
}

impl LayerStyle {
    /// Default point style for a category color.
    pub fn for_color(fill_color: Color32) -> Self {
        Self {
            fill_color,
            radius: 5.0,
            stroke_width: 1.0,
            stroke_color: Color32::from_rgb(255, 255, 255),
        }
    }

    /// Style used for the marker under the pointer.
    pub fn highlighted(&self) -> Self {
        Self {
            radius: self.radius * 1.6,
            stroke_width: self.stroke_width * 2.0,
            stroke_color: Color32::from_rgb(255, 230, 80),
            ..*self
        }
    }
}

/// A single facility point ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Geographic position (lon, lat)
    pub coord: Coord<f64>,
    pub popup: FacilityPopup,
}

/// A category's markers as placed on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLayer {
    pub category_id: String,
    pub style: LayerStyle,
    pub markers: Vec<Marker>,
}

impl RenderedLayer {
    /// Converts a category layer's records into styled markers.
    ///
    /// Only Point geometries become markers.
    pub fn from_category(layer: &CategoryLayer, style: LayerStyle) -> Self {
        let markers: Vec<Marker> = layer
            .records
            .iter()
            .filter_map(|record| {
                record.point_coord().map(|coord| Marker {
                    coord,
                    popup: FacilityPopup::from_record(record),
                })
            })
            .collect();

        let skipped = layer.records.len() - markers.len();
        if skipped > 0 {
            log::debug!(
                "{}: skipped {} records without point geometry",
                layer.category_id,
                skipped
            );
        }

        Self {
            category_id: layer.category_id.clone(),
            style,
            markers,
        }
    }
}

/// Rendering surface operations used by the visibility controller and
/// the load cycle.
pub trait RenderSurface {
    /// Places a category's layer on the map.
    fn add_layer(&mut self, category_id: &str, layer: &CategoryLayer, style: &LayerStyle);

    /// Removes a category's layer from the map.
    fn remove_layer(&mut self, category_id: &str);

    /// Shows or hides the loading indicator.
    fn set_loading(&mut self, loading: bool);
}

/// Addresses one marker on a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRef {
    pub category_id: String,
    pub index: usize,
}

/// The map's layer stack, drawn in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MapSurface {
    layers: Vec<RenderedLayer>,
    loading: bool,
}

impl MapSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> impl DoubleEndedIterator<Item = &RenderedLayer> {
        self.layers.iter()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn marker(&self, marker: &MarkerRef) -> Option<(&RenderedLayer, &Marker)> {
        let layer = self
            .layers
            .iter()
            .find(|l| l.category_id == marker.category_id)?;
        layer.markers.get(marker.index).map(|m| (layer, m))
    }

    /// Geographic bounding box of every marker on the surface.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        let mut coords = self.layers.iter().flat_map(|l| l.markers.iter().map(|m| m.coord));
        let first = coords.next()?;
        let (min, max) = coords.fold((first, first), |(min, max), c| {
            (
                Coord {
                    x: min.x.min(c.x),
                    y: min.y.min(c.y),
                },
                Coord {
                    x: max.x.max(c.x),
                    y: max.y.max(c.y),
                },
            )
        });
        Some(Rect::new(min, max))
    }
}

impl RenderSurface for MapSurface {
    fn add_layer(&mut self, category_id: &str, layer: &CategoryLayer, style: &LayerStyle) {
        self.remove_layer(category_id);
        self.layers.push(RenderedLayer::from_category(layer, *style));
    }

    fn remove_layer(&mut self, category_id: &str) {
        self.layers.retain(|l| l.category_id != category_id);
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}
