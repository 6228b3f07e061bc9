//! HTTP client for the sonar prediction endpoint.
//!
//! The endpoint is injected at construction so tests can point the client at
//! a local stub instead of the deployed service.

use serde::{Deserialize, Serialize};

use crate::http_client;

const MAX_RESPONSE_BYTES: usize = 64 * 1024;

/// Classification labels the service can return.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SonarClass {
    Rock,
    Mine,
}

impl SonarClass {
    pub fn label(self) -> &'static str {
        match self {
            Self::Rock => "Rock",
            Self::Mine => "Mine",
        }
    }
}

/// Request body sent to the prediction endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct PredictRequest {
    pub features: Vec<f64>,
}

/// A successful classification.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    pub class: SonarClass,
    /// Percentage-like score in [0, 100]; not clamped by the client.
    pub confidence: f64,
    /// Raw model probability for the Mine class, when the service reports it.
    pub probability: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("HTTP {code}: {message}")]
    Status { code: u16, message: String },
    #[error("Invalid response: {0}")]
    MalformedResponse(String),
}

impl PredictError {
    /// Message shown to the user, without the "Error: " prefix the form adds.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(message) => message.clone(),
            Self::Status { message, .. } => message.clone(),
            Self::MalformedResponse(message) => message.clone(),
        }
    }
}

/// Thin client bound to one prediction endpoint URL.
#[derive(Clone, Debug)]
pub struct PredictClient {
    endpoint: String,
}

impl PredictClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit one feature vector and return the service's classification.
    ///
    /// A single best-effort attempt: no retries, no backoff. The shared agent
    /// bounds how long a hung request can stall the caller.
    pub fn predict(&self, features: &[f64]) -> Result<Prediction, PredictError> {
        let request = PredictRequest {
            features: features.to_vec(),
        };
        let response = match http_client::agent()
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(&request)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body =
                    read_body_limited(response, MAX_RESPONSE_BYTES).unwrap_or_default();
                return Err(PredictError::Status {
                    code,
                    message: status_message(code, &body),
                });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(PredictError::Transport(err.to_string()));
            }
        };

        let body = read_body_limited(response, MAX_RESPONSE_BYTES)
            .map_err(PredictError::MalformedResponse)?;
        parse_prediction(&body)
    }
}

/// Extract the service's `detail` field, or synthesize a status message.
fn status_message(code: u16, body: &str) -> String {
    serde_json::from_str::<ErrorWire>(body)
        .ok()
        .and_then(|wire| wire.detail)
        .unwrap_or_else(|| format!("API error: {code}"))
}

#[derive(Debug, Deserialize)]
struct ErrorWire {
    detail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PredictionWire {
    prediction: Option<String>,
    confidence: Option<f64>,
    #[serde(default)]
    probability: Option<f64>,
}

/// Parse a 2xx body. A success status with a missing or unknown payload is
/// reported as [`PredictError::MalformedResponse`] rather than trusted.
fn parse_prediction(body: &str) -> Result<Prediction, PredictError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(PredictError::MalformedResponse(
            "Empty response body".to_string(),
        ));
    }
    let wire: PredictionWire = serde_json::from_str(trimmed)
        .map_err(|err| PredictError::MalformedResponse(format!("{err}: {trimmed}")))?;

    let class = match wire.prediction.as_deref() {
        Some("Rock") => SonarClass::Rock,
        Some("Mine") => SonarClass::Mine,
        Some(other) => {
            return Err(PredictError::MalformedResponse(format!(
                "Unknown class {other:?}"
            )));
        }
        None => {
            return Err(PredictError::MalformedResponse(
                "Missing prediction field".to_string(),
            ));
        }
    };
    let confidence = wire.confidence.ok_or_else(|| {
        PredictError::MalformedResponse("Missing confidence field".to_string())
    })?;
    Ok(Prediction {
        class,
        confidence,
        probability: wire.probability,
    })
}

fn read_body_limited(response: ureq::Response, max_bytes: usize) -> Result<String, String> {
    let bytes = http_client::read_response_bytes(response, max_bytes)
        .map_err(|err| err.to_string())?;
    String::from_utf8(bytes).map_err(|err| err.to_string())
}
