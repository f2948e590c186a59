//! Interaction handlers: click, file selection, drag and drop.
//!
//! Handlers run on the UI thread and only touch [`Presenter`] state. The
//! network round trip is packaged as a [`Submission`] that the host runs
//! wherever it likes (inline or on a worker thread) and hands back to
//! [`Controller::finish`] as a [`Completion`].

use crate::error::{Result, ScopeError};
use crate::file_kind::{Preview, UploadCandidate, is_acceptable, preview_for};
use crate::presentation::Presenter;
use crate::readiness::{Prober, ReadinessState};
use crate::transport::{self, PredictApi, PredictionResult};
use std::path::PathBuf;
use std::sync::Arc;

pub const STILL_LOADING_MESSAGE: &str = "The model is still loading. Please wait...";
pub const PROCESSING_MESSAGE: &str = "Processing image...";
pub const DROP_REJECTED_MESSAGE: &str = "Please drop an image (JPEG, PNG, TIFF)";

/// What the host should do after a click on the upload block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    OpenFileDialog,
    /// A notification was queued instead.
    Blocked,
}

/// A validated candidate on its way to the service.
#[derive(Debug, Clone)]
pub struct Submission {
    id: u64,
    candidate: UploadCandidate,
}

impl Submission {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn candidate(&self) -> &UploadCandidate {
        &self.candidate
    }

    /// Gate on readiness, then read, encode and send. Blocks.
    pub fn run<A: PredictApi + ?Sized>(self, prober: &Prober<A>) -> Completion {
        let outcome =
            gate_stage(prober).and_then(|()| transport::submit(prober.api(), &self.candidate));
        Completion {
            id: self.id,
            file_name: self.candidate.name,
            outcome,
        }
    }
}

fn gate_stage<A: PredictApi + ?Sized>(prober: &Prober<A>) -> Result<()> {
    if prober.state().is_ready() || prober.probe() {
        Ok(())
    } else {
        Err(ScopeError::ServiceUnavailable)
    }
}

/// The outcome of a [`Submission`], ready to be applied on the UI thread.
#[derive(Debug)]
pub struct Completion {
    id: u64,
    file_name: String,
    outcome: Result<PredictionResult>,
}

impl Completion {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Preview of the candidate currently being processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPreview {
    pub preview: Preview,
    pub path: Option<PathBuf>,
    pub name: String,
}

pub struct Controller<A: ?Sized> {
    prober: Prober<A>,
    presenter: Presenter,
    last_issued: u64,
    pending: Option<PendingPreview>,
}

impl<A: PredictApi + ?Sized> Controller<A> {
    pub fn new(api: Arc<A>, readiness: ReadinessState) -> Self {
        Self {
            prober: Prober::new(api, readiness),
            presenter: Presenter::new(),
            last_issued: 0,
            pending: None,
        }
    }

    /// Apply the initial layout and hand back a prober for the first health check.
    pub fn startup(&mut self) -> Prober<A> {
        self.presenter.sync_layout();
        self.prober.clone()
    }

    /// A prober sharing this controller's readiness state.
    pub fn prober(&self) -> Prober<A> {
        self.prober.clone()
    }

    pub fn readiness(&self) -> &ReadinessState {
        self.prober.state()
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut Presenter {
        &mut self.presenter
    }

    pub fn pending_preview(&self) -> Option<&PendingPreview> {
        self.pending.as_ref()
    }

    pub fn on_click(&mut self) -> ClickOutcome {
        if self.readiness().is_ready() {
            ClickOutcome::OpenFileDialog
        } else {
            self.presenter.notify(STILL_LOADING_MESSAGE);
            ClickOutcome::Blocked
        }
    }

    pub fn on_drag_over(&mut self) {
        self.presenter.set_drag_over(true);
    }

    pub fn on_drag_leave(&mut self) {
        self.presenter.set_drag_over(false);
    }

    /// Only the first dropped file is considered.
    pub fn on_drop(&mut self, files: Vec<UploadCandidate>) -> Option<Submission> {
        self.presenter.set_drag_over(false);
        match files.into_iter().next() {
            Some(first) if is_acceptable(&first) => self.on_file_selected(first),
            _ => {
                self.presenter.notify(DROP_REJECTED_MESSAGE);
                None
            }
        }
    }

    /// Validate a selection and turn it into a submission.
    pub fn on_file_selected(&mut self, candidate: UploadCandidate) -> Option<Submission> {
        if !is_acceptable(&candidate) {
            let err = ScopeError::UnsupportedFile {
                name: candidate.name.clone(),
            };
            self.presenter.notify(err.to_string());
            return None;
        }
        let preview = preview_for(&candidate);
        if matches!(preview, Preview::Placeholder(_)) {
            tracing::info!("TIFF file detected, using placeholder preview");
        }
        self.pending = Some(PendingPreview {
            preview,
            path: candidate.path().map(PathBuf::from),
            name: candidate.name.clone(),
        });
        self.presenter.show_loading(PROCESSING_MESSAGE);
        self.last_issued += 1;
        Some(Submission {
            id: self.last_issued,
            candidate,
        })
    }

    /// Apply a completion. Responses to superseded submissions are dropped.
    pub fn finish(&mut self, completion: Completion) {
        if completion.id != self.last_issued {
            tracing::debug!(
                "Discarding stale response {} (latest is {})",
                completion.id,
                self.last_issued
            );
            return;
        }
        self.presenter.clear_loading();
        self.pending = None;

        let rendered = completion
            .outcome
            .and_then(|result| self.presenter.render(&result, &completion.file_name));
        if let Err(err) = rendered {
            tracing::error!("Processing failed: {err}");
            self.presenter.notify(notification_for(&err));
        }
    }

    /// Select, run and finish inline.
    pub fn process(&mut self, candidate: UploadCandidate) {
        if let Some(submission) = self.on_file_selected(candidate) {
            let completion = submission.run(&self.prober);
            self.finish(completion);
        }
    }
}

fn notification_for(err: &ScopeError) -> String {
    match err {
        ScopeError::ServiceUnavailable => err.to_string(),
        other => format!("Error processing image: {other}"),
    }
}
