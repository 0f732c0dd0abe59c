#![warn(clippy::all)]

//! Facility Map - A web-based viewer for recycling facility locations.
//!
//! Facilities are grouped into categories that can be toggled on and off
//! over a map. Category data is loaded from GeoJSON sources when the app
//! starts and whenever the user asks for a reload.

mod catalog;
mod facility;
mod geo;
mod state;
mod ui;

use eframe::egui;
use facility::LoadChannel;
use state::{AppConfig, AppState};

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "Facility Map",
        native_options,
        Box::new(|cc| Ok(Box::new(FacilityMapApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document to attach to");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("app_canvas")
            .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("Failed to find app_canvas");
            return;
        };

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(FacilityMapApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    log::error!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct FacilityMapApp {
    /// Application state containing all sub-states
    state: AppState,

    /// Channel for the async category load cycle
    load_channel: LoadChannel,
}

impl FacilityMapApp {
    /// Creates a new FacilityMapApp and starts the first load cycle.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        #[cfg(target_arch = "wasm32")]
        ui::install_browser_guard();

        let state = AppState::new(AppConfig::load());
        log::info!(
            "Starting with {} facility categories from {}",
            state.catalog.len(),
            state.config.data_root
        );

        let mut app = Self {
            state,
            load_channel: LoadChannel::new(),
        };
        app.start_load(&cc.egui_ctx);
        app
    }

    fn start_load(&mut self, ctx: &egui::Context) {
        self.state.begin_load();
        self.load_channel.spawn(
            ctx.clone(),
            self.state.catalog.clone(),
            self.state.config.data_root.clone(),
            self.state.config.dedupe_fetches,
        );
    }
}

impl eframe::App for FacilityMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for a finished load cycle
        self.state.finish_load(self.load_channel.poll());

        // Handle reload request
        if self.state.reload_requested {
            self.state.reload_requested = false;
            if self.load_channel.is_loading() {
                log::debug!("Reload ignored, a load cycle is already running");
            } else {
                log::info!("Reloading facility data");
                self.start_load(ctx);
            }
        }

        ui::handle_shortcuts(ctx, &mut self.state);

        // Render UI panels in the correct order for egui layout
        // Side and top/bottom panels must be rendered before CentralPanel
        ui::render_top_bar(ctx, &mut self.state);
        ui::render_left_panel(ctx, &mut self.state);
        ui::render_canvas(ctx, &mut self.state);
    }
}
