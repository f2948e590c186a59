mod app;
mod dropzone;
mod images;

use anyhow::{Context, Result};
use eframe::NativeOptions;
use scope_core::{ClientConfig, HttpPredictApi};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const APP_VERSION: &str = env!("DIFFSCOPE_VERSION");

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    if let Err(e) = run() {
        tracing::error!("Application stopped with error: {e:#}");
        eprintln!("Application stopped with error: {e:#}");
    }
}

fn run() -> Result<()> {
    let config = match config_path() {
        Some(path) => ClientConfig::load(&path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => ClientConfig::default(),
    };
    tracing::info!("Using inference service at {}", config.base_url);
    let api = HttpPredictApi::new(&config).context("cannot build HTTP client")?;

    let options = NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_drag_and_drop(true),
        ..NativeOptions::default()
    };
    eframe::run_native(
        &format!("DiffScope {APP_VERSION}"),
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(Box::new(app::UiApp::new(
                cc.egui_ctx.clone(),
                api,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

fn config_path() -> Option<PathBuf> {
    directories_next::ProjectDirs::from("org", "DiffScope", "DiffScope")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
