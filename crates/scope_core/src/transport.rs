//! Predict round trip: read, encode, send, decode.

use crate::config::ClientConfig;
use crate::data_url::{self, EncodedPayload};
use crate::error::{Result, ScopeError};
use crate::file_kind::UploadCandidate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Body of `GET /health`.
///
/// Only `model_loaded` decides readiness; `model_info` is diagnostic and an
/// unexpected shape there is dropped instead of failing the whole body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default, deserialize_with = "lenient_model_info")]
    pub model_info: Option<ModelInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Raw model input shape, e.g. `[null, 299, 299, 3]`, or one list per
    /// input for multi-input models.
    #[serde(default)]
    pub input_shape: Option<serde_json::Value>,
}

fn lenient_model_info<'de, D>(deserializer: D) -> Result<Option<ModelInfo>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl HealthReport {
    /// Expected `(height, width)` when the service reports a usable input shape.
    ///
    /// Multi-input models report the first input's shape.
    pub fn expected_image_size(&self) -> Option<(u32, u32)> {
        let shape = self.model_info.as_ref()?.input_shape.as_ref()?.as_array()?;
        let shape = match shape.first() {
            Some(serde_json::Value::Array(first)) => first,
            _ => shape,
        };
        if shape.len() < 3 {
            return None;
        }
        Some((dimension(&shape[1])?, dimension(&shape[2])?))
    }
}

fn dimension(value: &serde_json::Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let n = value.as_f64()?;
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) {
        Some(n as u32)
    } else {
        None
    }
}

/// Body of `POST /predict`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub predictions: Vec<f64>,
    #[serde(default)]
    pub original_image: String,
    #[serde(default)]
    pub heatmap_image: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PredictionResult {
    /// The heatmap data URI, treating an empty string as absent.
    pub fn heatmap(&self) -> Option<&str> {
        self.heatmap_image.as_deref().filter(|s| !s.is_empty())
    }
}

/// The inference service as seen by the client.
///
/// `predict` only reports transport-level failures; the `success` flag is
/// checked by [`submit`].
pub trait PredictApi: Send + Sync {
    fn health(&self) -> Result<HealthReport>;
    fn predict(&self, payload: &EncodedPayload) -> Result<PredictionResult>;
}

/// [`PredictApi`] over HTTP with a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpPredictApi {
    client: reqwest::blocking::Client,
    health_url: String,
    predict_url: String,
}

impl HttpPredictApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        // no request timeout; the connection layer is the only bound
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::blocking::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            health_url: config.health_url(),
            predict_url: config.predict_url(),
        }
    }
}

impl PredictApi for HttpPredictApi {
    fn health(&self) -> Result<HealthReport> {
        let response = self.client.get(&self.health_url).send()?;
        let body = read_success_body(response)?;
        serde_json::from_str(&body).map_err(|e| ScopeError::MalformedResponse(e.to_string()))
    }

    fn predict(&self, payload: &EncodedPayload) -> Result<PredictionResult> {
        let response = self
            .client
            .post(&self.predict_url)
            .header("Accept", "application/json")
            .json(payload)
            .send()?;
        let body = read_success_body(response)?;
        serde_json::from_str(&body).map_err(|e| ScopeError::MalformedResponse(e.to_string()))
    }
}

/// Non-2xx bodies are kept as raw text; they are often not JSON.
fn read_success_body(response: reqwest::blocking::Response) -> Result<String> {
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(ScopeError::Transport {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

/// Submit one candidate and return the service's verdict.
pub fn submit<A: PredictApi + ?Sized>(
    api: &A,
    candidate: &UploadCandidate,
) -> Result<PredictionResult> {
    let bytes = read_stage(candidate)?;
    let payload = encode_stage(candidate, &bytes);
    drop(bytes);
    let result = send_stage(api, &payload)?;
    check_stage(result)
}

fn read_stage(candidate: &UploadCandidate) -> Result<Vec<u8>> {
    let bytes = candidate.read_bytes()?;
    tracing::info!(
        "Processing file {}, type: {}, size: {:.2} MB",
        candidate.name,
        candidate.declared_type,
        bytes.len() as f64 / 1024.0 / 1024.0
    );
    Ok(bytes)
}

fn encode_stage(candidate: &UploadCandidate, bytes: &[u8]) -> EncodedPayload {
    data_url::encode(bytes, &candidate.declared_type)
}

fn send_stage<A: PredictApi + ?Sized>(
    api: &A,
    payload: &EncodedPayload,
) -> Result<PredictionResult> {
    tracing::info!("Sending image to the inference service");
    api.predict(payload)
}

fn check_stage(result: PredictionResult) -> Result<PredictionResult> {
    if !result.success {
        let message = result
            .error
            .unwrap_or_else(|| "unknown error".to_string());
        tracing::warn!("Service reported failure: {message}");
        return Err(ScopeError::Application(message));
    }
    tracing::info!("Prediction received: {:?}", result.predictions);
    Ok(result)
}
