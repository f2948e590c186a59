//! Results panel: original image, label, probability and optional heatmap.

use super::UiApp;
use eframe::egui;
use scope_core::Label;

const IMAGE_SIZE: egui::Vec2 = egui::vec2(320.0, 320.0);

fn label_text(label: Label) -> &'static str {
    match label {
        Label::Positive => "Differentiation present",
        Label::Negative => "No differentiation",
    }
}

impl UiApp {
    /// Results panel; drawn only while the panel is visible.
    pub(super) fn render_results_panel(&self, ui: &mut egui::Ui) {
        let presenter = self.controller.presenter();
        let display = presenter.display_state();
        if !display.panel_visible {
            return;
        }
        let Some(rendered) = presenter.rendered() else {
            return;
        };

        ui.add_space(16.0);
        ui.separator();
        ui.add_space(8.0);
        ui.horizontal_top(|ui| {
            if let Some(original) = &self.images.original {
                ui.add(original.source().max_size(IMAGE_SIZE));
            }
            ui.vertical(|ui| {
                ui.heading(label_text(rendered.interpretation.label));
                ui.label(format!(
                    "Probability: {}",
                    rendered.interpretation.confidence_text()
                ));
                ui.label(&rendered.caption);
            });
        });

        if display.heatmap_visible
            && let Some(heatmap) = &self.images.heatmap
        {
            ui.add_space(12.0);
            ui.label("Heatmap");
            ui.add(heatmap.source().max_size(IMAGE_SIZE));
        }
    }
}
