//! Facility popup contents.

use super::colors;
use crate::facility::FacilityPopup;
use eframe::egui::{self, Color32, RichText};
use egui_phosphor::regular;

/// Renders the pinned detail card for one facility.
///
/// Returns true if the close button was clicked.
pub fn render_facility_popup(ui: &mut egui::Ui, popup: &FacilityPopup, accent: Color32) -> bool {
    ui.set_max_width(300.0);

    let mut close = false;
    ui.horizontal(|ui| {
        ui.label(RichText::new(&popup.name).strong().size(14.0).color(accent));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            close = ui.small_button(regular::X).on_hover_text("Close").clicked();
        });
    });
    render_details(ui, popup);

    close
}

/// Renders the same content as a read-only hover tooltip.
pub fn render_facility_tooltip(ui: &mut egui::Ui, popup: &FacilityPopup, accent: Color32) {
    ui.set_max_width(300.0);
    ui.label(RichText::new(&popup.name).strong().size(14.0).color(accent));
    render_details(ui, popup);
}

/// Everything below the name; absent fields are skipped.
fn render_details(ui: &mut egui::Ui, popup: &FacilityPopup) {
    if let Some(facility_type) = &popup.facility_type {
        ui.label(RichText::new(facility_type).italics().color(colors::ui::VALUE));
    }
    ui.separator();

    if let Some(address) = &popup.address {
        detail_row(ui, regular::MAP_PIN, |ui| {
            ui.label(address);
        });
    }
    if let Some(phone) = &popup.phone {
        detail_row(ui, regular::PHONE, |ui| {
            ui.label(phone);
        });
    }
    if let (Some(email), Some(link)) = (&popup.email, popup.email_link()) {
        detail_row(ui, regular::ENVELOPE, |ui| {
            ui.hyperlink_to(email, link);
        });
    }
    if let (Some(website), Some(link)) = (&popup.website, popup.website_link()) {
        detail_row(ui, regular::GLOBE, |ui| {
            ui.hyperlink_to(website, link);
        });
    }
    if let Some(feedstock) = &popup.feedstock {
        detail_row(ui, regular::PACKAGE, |ui| {
            ui.label(RichText::new("Feedstock:").color(colors::ui::LABEL));
            ui.label(feedstock);
        });
    }
}

fn detail_row(ui: &mut egui::Ui, icon: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new(icon).color(colors::ui::LABEL));
        add_contents(ui);
    });
}
