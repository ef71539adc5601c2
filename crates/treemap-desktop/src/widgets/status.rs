use eframe::egui::{RichText, Ui};

/// Centered placeholder shown instead of the chart.
pub enum Status<'a> {
    Loading,
    Failed(&'a str),
    Empty,
}

pub fn ui(ui: &mut Ui, status: &Status<'_>) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 2.0 - 40.0);
        match status {
            Status::Loading => {
                ui.spinner();
                ui.label("Loading...");
            }
            Status::Failed(message) => {
                ui.heading("Failed to load accounts");
                ui.label(RichText::new(*message).color(ui.visuals().error_fg_color));
            }
            Status::Empty => {
                ui.heading("No accounts to show");
            }
        }
    });
}
