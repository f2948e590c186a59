//! Client-side orchestration for the differentiation classifier service.
//!
//! Files are validated, gated on service readiness, sent as base64 data URIs
//! and the returned probabilities are rendered as a label and a confidence.

pub mod config;
pub mod controller;
pub mod data_url;
pub mod error;
pub mod file_kind;
pub mod interpret;
pub mod presentation;
pub mod readiness;
pub mod transport;

pub use config::{ClientConfig, ConfigError};
pub use controller::{ClickOutcome, Completion, Controller, PendingPreview, Submission};
pub use data_url::EncodedPayload;
pub use error::ScopeError;
pub use file_kind::{CandidateSource, Preview, UploadCandidate, is_acceptable, is_special_format};
pub use interpret::{Interpretation, Label, interpret};
pub use presentation::{DisplayState, PanelState, Presenter, RenderedResult, UploadLayout};
pub use readiness::{Prober, ReadinessState};
pub use transport::{HealthReport, HttpPredictApi, PredictApi, PredictionResult, submit};
