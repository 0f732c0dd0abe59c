//! Global keyboard shortcuts.

use crate::state::AppState;
use eframe::egui::{self, Key, KeyboardShortcut, Modifiers};

/// Bulk visibility actions bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    ShowAll,
    HideAll,
}

impl ShortcutAction {
    pub fn shortcut(self) -> KeyboardShortcut {
        let modifiers = Modifiers::CTRL | Modifiers::SHIFT;
        match self {
            ShortcutAction::ShowAll => KeyboardShortcut::new(modifiers, Key::A),
            ShortcutAction::HideAll => KeyboardShortcut::new(modifiers, Key::H),
        }
    }

    /// Matches a browser `keydown` against the bindings.
    ///
    /// `key` is the DOM `KeyboardEvent.key` value, which is upper case while
    /// Shift is held.
    pub fn from_dom_key(key: &str, ctrl: bool, shift: bool, alt: bool) -> Option<Self> {
        if !ctrl || !shift || alt {
            return None;
        }
        match key {
            "a" | "A" => Some(ShortcutAction::ShowAll),
            "h" | "H" => Some(ShortcutAction::HideAll),
            _ => None,
        }
    }
}

/// Stops the browser acting on the bound key combinations.
///
/// egui still receives the key events; only the page defaults (select all,
/// history) are suppressed. The listener lives for the life of the page.
#[cfg(target_arch = "wasm32")]
pub fn install_browser_guard() {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("No document, browser shortcuts stay active");
        return;
    };

    let onkeydown = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
        let action = ShortcutAction::from_dom_key(
            &event.key(),
            event.ctrl_key(),
            event.shift_key(),
            event.alt_key(),
        );
        if action.is_some() {
            event.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);

    if let Err(e) =
        document.add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref())
    {
        log::warn!("Failed to install keydown guard: {:?}", e);
    }
    onkeydown.forget(); // Prevent closure from being dropped
}

/// Consumes this frame's shortcut presses and returns the first action.
pub fn read_shortcut(ctx: &egui::Context) -> Option<ShortcutAction> {
    ctx.input_mut(|i| {
        [ShortcutAction::ShowAll, ShortcutAction::HideAll]
            .into_iter()
            .find(|action| i.consume_shortcut(&action.shortcut()))
    })
}

/// Applies any shortcut pressed this frame.
pub fn handle_shortcuts(ctx: &egui::Context, state: &mut AppState) {
    match read_shortcut(ctx) {
        Some(ShortcutAction::ShowAll) => state.show_all(),
        Some(ShortcutAction::HideAll) => state.hide_all(),
        None => {}
    }
}
