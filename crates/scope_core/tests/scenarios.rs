//! End-to-end interaction scenarios against a scripted service.

use scope_core::controller::STILL_LOADING_MESSAGE;
use scope_core::error::Result;
use scope_core::{
    ClickOutcome, Controller, EncodedPayload, HealthReport, PanelState, PredictApi,
    PredictionResult, ReadinessState, ScopeError, UploadCandidate, UploadLayout,
};
use std::sync::Arc;
use std::sync::Mutex;

struct ScriptedService {
    model_loaded: bool,
    predict: Mutex<Vec<Result<PredictionResult>>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedService {
    fn new(model_loaded: bool, predict: Vec<Result<PredictionResult>>) -> Arc<Self> {
        Arc::new(Self {
            model_loaded,
            predict: Mutex::new(predict),
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl PredictApi for ScriptedService {
    fn health(&self) -> Result<HealthReport> {
        Ok(HealthReport {
            model_loaded: self.model_loaded,
            model_info: None,
        })
    }

    fn predict(&self, payload: &EncodedPayload) -> Result<PredictionResult> {
        self.seen.lock().unwrap().push(payload.data_url.clone());
        self.predict.lock().unwrap().remove(0)
    }
}

fn prediction(predictions: Vec<f64>, heatmap: Option<&str>) -> Result<PredictionResult> {
    Ok(PredictionResult {
        success: true,
        predictions,
        original_image: "data:image/jpeg;base64,/9g=".into(),
        heatmap_image: heatmap.map(str::to_string),
        error: None,
    })
}

fn started(service: Arc<ScriptedService>) -> Controller<ScriptedService> {
    let mut controller = Controller::new(service, ReadinessState::new());
    controller.startup().probe();
    controller
}

#[test]
fn scenario_model_not_loaded_blocks_click() {
    let service = ScriptedService::new(false, Vec::new());
    let mut controller = started(service);

    assert!(!controller.readiness().is_ready());
    assert_eq!(controller.presenter().layout(), UploadLayout::Centered);
    assert_eq!(controller.on_click(), ClickOutcome::Blocked);
    assert_eq!(
        controller.presenter().notification(),
        Some(STILL_LOADING_MESSAGE)
    );
}

#[test]
fn scenario_http_500_is_surfaced_and_loading_cleared() {
    let service = ScriptedService::new(
        true,
        vec![Err(ScopeError::Transport {
            status: 500,
            body: "internal error".into(),
        })],
    );
    let mut controller = started(service);

    let submission = controller
        .on_file_selected(UploadCandidate::from_bytes(vec![9u8], "image/png", "a.png"))
        .unwrap();
    assert!(controller.presenter().loading().is_some());
    let completion = submission.run(&controller.prober());
    controller.finish(completion);

    assert!(controller.presenter().loading().is_none());
    assert!(controller
        .presenter()
        .notification()
        .unwrap()
        .contains("internal error"));
    assert_eq!(controller.presenter().panel(), PanelState::Hidden);
}

#[test]
fn scenario_multiclass_second_index_wins() {
    let service = ScriptedService::new(true, vec![prediction(vec![0.2, 0.8], None)]);
    let mut controller = started(service);

    controller.process(UploadCandidate::from_bytes(vec![1u8], "image/jpeg", "b.jpg"));
    let rendered = controller.presenter().rendered().unwrap();
    assert_eq!(rendered.interpretation.label.to_string(), "negative");
    assert_eq!(rendered.interpretation.confidence_text(), "80.00%");
}

#[test]
fn scenario_binary_score_and_missing_heatmap() {
    let service = ScriptedService::new(true, vec![prediction(vec![0.73], None)]);
    let mut controller = started(service);

    controller.process(UploadCandidate::from_bytes(vec![1u8], "image/jpeg", "c.jpg"));
    let display = controller.presenter().display_state();
    assert_eq!(display.label, "positive");
    assert!(display.panel_visible);
    assert!(!display.heatmap_visible);
    assert_eq!(controller.presenter().layout(), UploadLayout::Docked);
    assert_eq!(
        controller.presenter().rendered().unwrap().interpretation.confidence_text(),
        "73.00%"
    );
}

#[test]
fn scenario_tiff_from_disk_is_sent_as_data_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slide.TIF");
    std::fs::write(&path, b"II*\0").unwrap();

    let service = ScriptedService::new(
        true,
        vec![prediction(vec![0.9, 0.1], Some("data:image/png;base64,AA=="))],
    );
    let mut controller = started(service.clone());

    controller.process(UploadCandidate::from_path(&path));
    let seen = service.seen.lock().unwrap();
    assert_eq!(*seen, vec!["data:image/tiff;base64,SUkqAA=="]);
    let display = controller.presenter().display_state();
    assert_eq!(display.label, "positive");
    assert!(display.heatmap_visible);
}
