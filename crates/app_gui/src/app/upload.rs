//! Upload block: click target, drop zone and in-flight preview.

use super::UiApp;
use eframe::egui;
use scope_core::data_url;
use scope_core::{PendingPreview, Preview, UploadLayout};

const BLOCK_SIZE: egui::Vec2 = egui::vec2(420.0, 180.0);
const PREVIEW_SIZE: egui::Vec2 = egui::vec2(140.0, 140.0);

impl UiApp {
    /// Draws the upload block and reports whether it was clicked.
    pub(super) fn render_upload_block(&self, ui: &mut egui::Ui) -> bool {
        let presenter = self.controller.presenter();
        if presenter.layout() == UploadLayout::Centered {
            let free = ui.available_height() - BLOCK_SIZE.y;
            ui.add_space((free / 2.0).max(0.0));
        }
        let stroke_color = if presenter.is_drag_over() {
            ui.visuals().selection.stroke.color
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke.color
        };

        let mut clicked = false;
        ui.vertical_centered(|ui| {
            let response = egui::Frame::group(ui.style())
                .stroke(egui::Stroke::new(2.0, stroke_color))
                .inner_margin(16.0)
                .show(ui, |ui| {
                    ui.set_min_size(BLOCK_SIZE);
                    ui.vertical_centered(|ui| match presenter.loading() {
                        Some(message) => {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(message);
                            });
                            if let Some(pending) = self.controller.pending_preview() {
                                show_preview(ui, pending);
                            }
                        }
                        None => {
                            ui.add_space(40.0);
                            ui.heading("Click or drop an image here");
                            ui.label("JPEG, PNG, TIFF and other image formats");
                        }
                    });
                })
                .response
                .interact(egui::Sense::click());
            clicked = response.clicked();
        });
        clicked
    }
}

fn show_preview(ui: &mut egui::Ui, pending: &PendingPreview) {
    match (&pending.preview, &pending.path) {
        (Preview::Placeholder(url), _) => {
            if let Some(decoded) = data_url::decode(url) {
                ui.add(
                    egui::Image::from_bytes("bytes://tiff-placeholder.svg", decoded.bytes)
                        .max_size(PREVIEW_SIZE),
                );
            }
        }
        (Preview::Native, Some(path)) => {
            ui.add(egui::Image::new(format!("file://{}", path.display())).max_size(PREVIEW_SIZE));
        }
        (Preview::Native, None) => {
            ui.label(&pending.name);
        }
    }
}
