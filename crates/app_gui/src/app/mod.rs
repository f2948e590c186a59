//! Main window: wires egui input to the scope_core controller.

mod results;
mod upload;

use crate::dropzone::{HoverEvent, HoverTracker, candidate_from_drop};
use crate::images::ShownImage;
use eframe::{App, Frame, egui};
use rfd::FileDialog;
use scope_core::{
    ClickOutcome, Completion, Controller, HttpPredictApi, ReadinessState, Submission,
    UploadCandidate,
};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

const IMAGE_EXTENSIONS: [&str; 9] = [
    "jpg", "jpeg", "png", "tif", "tiff", "bmp", "gif", "webp", "jfif",
];

enum WorkerEvent {
    Probed(bool),
    Completed(Completion),
}

/// Images decoded for the current results panel.
#[derive(Default)]
struct ResultImages {
    original: Option<ShownImage>,
    heatmap: Option<ShownImage>,
}

pub struct UiApp {
    ctx: egui::Context,
    controller: Controller<HttpPredictApi>,
    tx: Sender<WorkerEvent>,
    rx: Receiver<WorkerEvent>,
    hover: HoverTracker,
    images: ResultImages,
    generation: u64,
}

impl UiApp {
    pub fn new(ctx: egui::Context, api: HttpPredictApi) -> Self {
        let (tx, rx) = channel();
        let mut controller = Controller::new(Arc::new(api), ReadinessState::new());
        let prober = controller.startup();
        let worker_tx = tx.clone();
        let worker_ctx = ctx.clone();
        thread::spawn(move || {
            let ready = prober.probe();
            let _ = worker_tx.send(WorkerEvent::Probed(ready));
            worker_ctx.request_repaint();
        });
        Self {
            ctx,
            controller,
            tx,
            rx,
            hover: HoverTracker::default(),
            images: ResultImages::default(),
            generation: 0,
        }
    }

    fn spawn_submission(&self, submission: Submission) {
        let prober = self.controller.prober();
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        tracing::debug!("Starting request {}", submission.id());
        thread::spawn(move || {
            let completion = submission.run(&prober);
            let _ = tx.send(WorkerEvent::Completed(completion));
            ctx.request_repaint();
        });
    }

    fn drain_worker_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                WorkerEvent::Probed(ready) => {
                    tracing::debug!("Startup probe finished, ready: {ready}");
                }
                WorkerEvent::Completed(completion) => {
                    self.controller.finish(completion);
                    self.refresh_images();
                }
            }
        }
    }

    /// Re-decode panel images after a render.
    fn refresh_images(&mut self) {
        let Some(rendered) = self.controller.presenter().rendered() else {
            return;
        };
        let original = rendered.original_image.clone();
        let heatmap = rendered.heatmap_image.clone();
        self.generation += 1;
        for old in [self.images.original.take(), self.images.heatmap.take()]
            .into_iter()
            .flatten()
        {
            self.ctx.forget_image(&old.uri);
        }
        self.images.original = ShownImage::from_data_url("original", self.generation, &original);
        self.images.heatmap = heatmap
            .and_then(|url| ShownImage::from_data_url("heatmap", self.generation, &url));
    }

    fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });
        match self.hover.update(hovering, !dropped.is_empty()) {
            Some(HoverEvent::DragOver) => self.controller.on_drag_over(),
            Some(HoverEvent::DragLeave) => self.controller.on_drag_leave(),
            None => {}
        }
        if dropped.is_empty() {
            return;
        }
        let candidates = dropped.iter().filter_map(candidate_from_drop).collect();
        if let Some(submission) = self.controller.on_drop(candidates) {
            self.spawn_submission(submission);
        }
    }

    fn handle_upload_click(&mut self) {
        if self.controller.on_click() != ClickOutcome::OpenFileDialog {
            return;
        }
        let Some(path) = FileDialog::new()
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        let candidate = UploadCandidate::from_path(path);
        if let Some(submission) = self.controller.on_file_selected(candidate) {
            self.spawn_submission(submission);
        }
    }

    fn render_notification(&mut self, ctx: &egui::Context) {
        let Some(message) = self.controller.presenter().notification().map(str::to_string) else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.controller.presenter_mut().dismiss_notification();
        }
    }
}

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.drain_worker_events();
        let blocked = self.controller.presenter().notification().is_some();
        if !blocked {
            self.handle_drag_and_drop(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                if self.render_upload_block(ui) {
                    self.handle_upload_click();
                }
                self.render_results_panel(ui);
            });
        });

        self.render_notification(ctx);
    }
}
