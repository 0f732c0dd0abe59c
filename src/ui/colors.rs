//! Centralized color constants for the UI.

use eframe::egui::Color32;

/// General UI colors for labels and values.
pub mod ui {
    use super::Color32;

    /// Muted gray for secondary labels.
    pub const LABEL: Color32 = Color32::from_rgb(120, 120, 130);
    /// Slightly brighter for values.
    pub const VALUE: Color32 = Color32::from_rgb(170, 170, 180);
    /// Failed-load indicator.
    pub const WARNING: Color32 = Color32::from_rgb(230, 150, 60);
}

/// Colors for the map canvas.
pub mod map {
    use super::Color32;

    /// Canvas background.
    pub const BACKGROUND: Color32 = Color32::from_rgb(20, 24, 32);
    /// Overlay text (cursor position, loading message).
    pub const OVERLAY_TEXT: Color32 = Color32::from_rgb(200, 200, 220);
    /// Dimming veil drawn while data loads.
    pub const LOADING_VEIL: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 90);
}
