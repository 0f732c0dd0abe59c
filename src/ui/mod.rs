//! UI modules for the facility map.
//!
//! The UI is split into distinct panels:
//! - Top bar: Title, load status, and bulk visibility actions
//! - Left panel: One toggle per facility category
//! - Central canvas: Facility markers over a graticule, with popups

mod canvas;
mod colors;
mod left_panel;
mod popup;
mod shortcuts;
mod top_bar;

pub use canvas::render_canvas;
pub use left_panel::render_left_panel;
pub use shortcuts::handle_shortcuts;
#[cfg(target_arch = "wasm32")]
pub use shortcuts::install_browser_guard;
pub use top_bar::render_top_bar;
