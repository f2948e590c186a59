//! Visible state of the results panel, the upload block and notifications.

use crate::error::Result;
use crate::interpret::{Interpretation, interpret};
use crate::transport::PredictionResult;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Hidden,
    Visible,
}

/// Placement of the upload block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadLayout {
    /// Centered in the window; used while no results are shown.
    Centered,
    #[default]
    Docked,
}

/// Layout of the upload block as a function of panel visibility.
pub fn layout_for(panel: PanelState) -> UploadLayout {
    match panel {
        PanelState::Hidden => UploadLayout::Centered,
        PanelState::Visible => UploadLayout::Docked,
    }
}

/// What the results panel currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResult {
    pub original_image: String,
    pub caption: String,
    pub interpretation: Interpretation,
    pub heatmap_image: Option<String>,
}

/// Derived view of the panel, recomputed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub label: String,
    pub confidence_pct: f64,
    pub heatmap_visible: bool,
    pub panel_visible: bool,
}

#[derive(Debug, Default)]
pub struct Presenter {
    panel: PanelState,
    layout: UploadLayout,
    rendered: Option<RenderedResult>,
    loading: Option<String>,
    drag_over: bool,
    notifications: VecDeque<String>,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a prediction. On an uninterpretable result nothing changes.
    pub fn render(&mut self, result: &PredictionResult, file_name: &str) -> Result<()> {
        let interpretation = interpret(&result.predictions)?;
        let heatmap_image = result.heatmap().map(str::to_string);
        if heatmap_image.is_some() {
            tracing::info!("Heatmap displayed");
        } else {
            tracing::info!("Heatmap not available");
        }
        self.rendered = Some(RenderedResult {
            original_image: result.original_image.clone(),
            caption: format!("File: {file_name}"),
            interpretation,
            heatmap_image,
        });
        self.panel = PanelState::Visible;
        self.sync_layout();
        Ok(())
    }

    /// Re-derive the upload block layout from panel visibility.
    pub fn sync_layout(&mut self) {
        self.layout = layout_for(self.panel);
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn layout(&self) -> UploadLayout {
        self.layout
    }

    pub fn rendered(&self) -> Option<&RenderedResult> {
        self.rendered.as_ref()
    }

    pub fn display_state(&self) -> DisplayState {
        match (&self.rendered, self.panel) {
            (Some(rendered), PanelState::Visible) => DisplayState {
                label: rendered.interpretation.label.to_string(),
                confidence_pct: rendered.interpretation.confidence_pct,
                heatmap_visible: rendered.heatmap_image.is_some(),
                panel_visible: true,
            },
            _ => DisplayState {
                label: String::new(),
                confidence_pct: 0.0,
                heatmap_visible: false,
                panel_visible: false,
            },
        }
    }

    pub fn show_loading(&mut self, message: impl Into<String>) {
        self.loading = Some(message.into());
    }

    pub fn clear_loading(&mut self) {
        self.loading = None;
    }

    pub fn loading(&self) -> Option<&str> {
        self.loading.as_deref()
    }

    pub fn set_drag_over(&mut self, drag_over: bool) {
        self.drag_over = drag_over;
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    /// Queue a blocking notification.
    pub fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("Notify: {message}");
        self.notifications.push_back(message);
    }

    /// The notification currently blocking the UI, if any.
    pub fn notification(&self) -> Option<&str> {
        self.notifications.front().map(String::as_str)
    }

    pub fn dismiss_notification(&mut self) -> Option<String> {
        self.notifications.pop_front()
    }
}
