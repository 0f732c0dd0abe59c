//! Geographic support for the facility map.
//!
//! This module provides reprojection of source coordinates, the
//! geographic-to-screen projection, and the renderable layer stack.

mod layer;
mod projection;
mod renderer;
mod reproject;

pub use layer::{LayerStyle, MapSurface, MarkerRef, RenderSurface};
pub use projection::MapProjection;
pub use renderer::{hit_test, render_graticule, render_surface};
pub use reproject::{reproject_geometry, Crs, TransformError, MERCATOR_HALF_EXTENT};
