//! Content-generation adapters.
//!
//! [`HttpContentGenerator`] talks to an Anthropic-compatible messages
//! endpoint over blocking HTTP with an explicit per-request timeout.
//! [`ScriptedGenerator`] answers from a fixed script for tests and
//! offline runs.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use tailor_core::application::ports::{ContentGenerator, GenerationRequest, GeneratorError};
use tailor_core::domain::PlaceholderKind;

/// Default messages endpoint.
const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// Default model identifier.
const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "TAILOR_AI_API_KEY";

/// Configuration for the HTTP generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    /// Hard deadline per request; hitting it reads as a soft failure to
    /// the pipeline, never an error.
    pub timeout: Duration,
    pub max_tokens: u32,
}

impl GeneratorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            timeout: Duration::from_secs(10),
            max_tokens: 512,
        }
    }

    /// Build from environment variables. `None` when no credential is
    /// configured; the caller then runs the pipeline without generation.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())?;
        let mut config = Self::new(api_key);
        if let Ok(model) = std::env::var("TAILOR_AI_MODEL") {
            config.model = model;
        }
        if let Ok(endpoint) = std::env::var("TAILOR_AI_ENDPOINT") {
            config.endpoint = endpoint;
        }
        Some(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Blocking HTTP client for an Anthropic-compatible messages endpoint.
pub struct HttpContentGenerator {
    config: GeneratorConfig,
    client: reqwest::blocking::Client,
}

impl HttpContentGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeneratorError::Unavailable(e.to_string()))?;
        Ok(Self { config, client })
    }
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

impl ContentGenerator for HttpContentGenerator {
    #[instrument(skip_all, fields(kind = %request.kind, brand = %request.brand))]
    fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "model": &self.config.model,
                "max_tokens": self.config.max_tokens,
                "messages": [{"role": "user", "content": &request.prompt}]
            }))
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    GeneratorError::Timeout(self.config.timeout)
                } else {
                    GeneratorError::Failed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(%status, "content endpoint returned an error");
            return Err(GeneratorError::Failed(format!(
                "endpoint returned {status}: {body}"
            )));
        }

        let parsed: ApiResponse = response
            .json()
            .map_err(|e| GeneratorError::BadResponse(e.to_string()))?;

        let text = parsed
            .content
            .first()
            .and_then(|block| block.text.clone())
            .ok_or_else(|| GeneratorError::BadResponse("empty completion".into()))?;

        debug!(chars = text.len(), "generation succeeded");
        Ok(text)
    }
}

/// Deterministic generator answering from a fixed per-kind script.
///
/// Useful for tests and demos: the pipeline exercises its full generation
/// path (prompt building, response cleanup, shape checks) without network
/// access. Records every request it receives.
#[derive(Default)]
pub struct ScriptedGenerator {
    responses: HashMap<PlaceholderKind, String>,
    calls: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response returned for one marker kind.
    pub fn respond_to(mut self, kind: PlaceholderKind, response: impl Into<String>) -> Self {
        self.responses.insert(kind, response.into());
        self
    }

    /// Requests seen so far, in call order.
    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().expect("call log poisoned").clone()
    }
}

impl ContentGenerator for ScriptedGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        self.calls
            .lock()
            .expect("call log poisoned")
            .push(request.clone());

        self.responses
            .get(&request.kind)
            .cloned()
            .ok_or_else(|| GeneratorError::Unavailable(format!("no script for {}", request.kind)))
    }
}
