//! Tracks whether the inference service has a model loaded.

use crate::transport::PredictApi;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared readiness flag; starts unready and only a probe changes it.
#[derive(Debug, Clone, Default)]
pub struct ReadinessState {
    ready: Arc<AtomicBool>,
}

impl ReadinessState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn set(&self, ready: bool) {
        self.ready.store(ready, Ordering::Release);
    }
}

/// Probes the health endpoint and records the answer.
pub struct Prober<A: ?Sized> {
    api: Arc<A>,
    state: ReadinessState,
}

impl<A: ?Sized> Clone for Prober<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: self.state.clone(),
        }
    }
}

impl<A: PredictApi + ?Sized> Prober<A> {
    pub fn new(api: Arc<A>, state: ReadinessState) -> Self {
        Self { api, state }
    }

    pub fn state(&self) -> &ReadinessState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Query the service and update the flag. Failures count as not ready.
    pub fn probe(&self) -> bool {
        let ready = match self.api.health() {
            Ok(report) => {
                if report.model_loaded {
                    tracing::info!("Inference service and model are ready");
                    if let Some((height, width)) = report.expected_image_size() {
                        tracing::info!("Model expects {height}x{width} images");
                    }
                } else {
                    tracing::error!("Model is not loaded on the server");
                }
                report.model_loaded
            }
            Err(err) => {
                tracing::error!("Inference service unavailable: {err}");
                false
            }
        };
        self.state.set(ready);
        ready
    }
}
