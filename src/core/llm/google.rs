//! Google Gemini Client (API Key-based)
//!
//! Calls the Generative Language `generateContent` endpoint with a JSON
//! response schema so the model returns structured output.

use super::{ClientError, GenerationClient, GenerationRequest, Result};
use crate::config::GenerationConfig;
use crate::core::generation::schema::RESPONSE_MIME_TYPE;
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub struct GoogleClient {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GoogleClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;

        // Keys pasted from consoles often carry trailing whitespace
        Ok(Self {
            api_key: api_key.into().trim().to_string(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    pub fn flash(api_key: impl Into<String>) -> Result<Self> {
        Self::new(api_key, DEFAULT_MODEL)
    }

    pub fn from_config(config: &GenerationConfig, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self::new(api_key, config.model.clone())?.with_base_url(&config.base_url))
    }

    /// Point the client at another host (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = base_url.as_ref().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn build_body(request: &GenerationRequest) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.instruction }]
            }],
            "generationConfig": {
                "responseMimeType": RESPONSE_MIME_TYPE,
                "responseSchema": request.schema,
                "temperature": request.temperature,
            }
        })
    }

    /// Concatenated text of the first candidate's parts; empty if absent.
    fn extract_text(json: &serde_json::Value) -> String {
        json["candidates"]
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|c| c["content"]["parts"].as_array())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p["text"].as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl GenerationClient for GoogleClient {
    fn id(&self) -> &str {
        "google"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let body = Self::build_body(&request);

        tracing::debug!(
            model = %self.model,
            temperature = request.temperature,
            instruction_len = request.instruction.len(),
            "Sending generateContent request"
        );

        let start = std::time::Instant::now();
        let resp = self
            .client
            .post(self.endpoint())
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let latency_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), latency_ms, "Gemini request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let json: serde_json::Value = resp.json().await?;
        let text = Self::extract_text(&json);
        let text = text.trim();

        tracing::debug!(latency_ms, response_len = text.len(), "Gemini request finished");

        if text.is_empty() {
            return Err(ClientError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}
