//! Gemini `generateContent` client.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::OracleConfig;
use crate::error::{OracleError, Result};
use crate::oracle::MappingOracle;

/// Header carrying the API key, kept out of the URL so it never reaches logs.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Longest error body quoted back to the operator.
const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Blocking client for the Gemini API.
#[derive(Debug)]
pub struct GeminiClient {
    config: OracleConfig,
    client: Client,
}

impl GeminiClient {
    /// Create a client; fails without an API key.
    pub fn new(config: OracleConfig) -> Result<Self> {
        if !config.has_api_key() {
            return Err(OracleError::MissingApiKey);
        }

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    fn send(&self, prompt: &str) -> Result<String> {
        let url = self.config.generate_url();
        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let body = build_request(prompt, self.config.temperature);

        debug!(url = %url, model = %self.config.model_name(), "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header(USER_AGENT, concat!("colmap/", env!("CARGO_PKG_VERSION")))
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, api_key)
            .body(serde_json::to_vec(&body)?)
            .send()
            .map_err(|e| self.network_error(&e))?;

        let status = response.status();
        let text = response.text().map_err(|e| self.network_error(&e))?;
        debug!(status = status.as_u16(), bytes = text.len(), "oracle responded");

        if !status.is_success() {
            return Err(status_error(status, &text));
        }
        extract_text(&text)
    }

    fn network_error(&self, err: &reqwest::Error) -> OracleError {
        if err.is_timeout() {
            OracleError::Network(format!(
                "request timed out after {}s",
                self.config.timeout_secs
            ))
        } else {
            OracleError::Network(err.to_string())
        }
    }
}

impl MappingOracle for GeminiClient {
    fn name(&self) -> &str {
        self.config.model_name()
    }

    fn complete(&self, prompt: &str) -> Result<String> {
        info!(model = %self.config.model_name(), "requesting mapping from oracle");
        self.send(prompt)
    }
}

fn build_request(prompt: &str, temperature: Option<f32>) -> GenerateRequest<'_> {
    GenerateRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: vec![RequestPart { text: prompt }],
        }],
        generation_config: temperature.map(|temperature| GenerationConfig { temperature }),
    }
}

fn status_error(status: StatusCode, body: &str) -> OracleError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .ok()
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.chars().take(MAX_ERROR_BODY).collect());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => OracleError::Authentication {
            status: status.as_u16(),
            message,
        },
        // Gemini reports an invalid key as a 400
        StatusCode::BAD_REQUEST if message.contains("API key") => OracleError::Authentication {
            status: status.as_u16(),
            message,
        },
        _ => OracleError::Status {
            status: status.as_u16(),
            message,
        },
    }
}

/// Concatenates the text parts of the first candidate in a response body.
pub fn extract_text(body: &str) -> Result<String> {
    let response: GenerateResponse = serde_json::from_str(body)?;

    if let Some(usage) = &response.usage_metadata {
        debug!(
            prompt_tokens = ?usage.prompt_token_count,
            response_tokens = ?usage.candidates_token_count,
            "oracle token usage"
        );
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(OracleError::Blocked { reason });
        }
        return Err(OracleError::InvalidResponse(
            "no candidates in response".to_string(),
        ));
    };

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.is_empty() {
        if let Some(reason) = candidate.finish_reason.filter(|r| r != "STOP") {
            warn!(finish_reason = %reason, "oracle returned no text");
            return Err(OracleError::Blocked { reason });
        }
        return Err(OracleError::InvalidResponse(
            "candidate has no text parts".to_string(),
        ));
    }

    Ok(text)
}
