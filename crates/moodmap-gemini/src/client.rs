//! HTTP client for Gemini `generateContent`.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GeminiError;
use crate::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const USER_AGENT: &str = "moodmap/0.1 (place-recommender)";

/// Single-model Gemini client. Every call is one request; nothing is retried.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    generate_url: Url,
}

impl GeminiClient {
    /// Creates a new client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeminiError::InvalidBaseUrl`] if the
    /// endpoint URL cannot be formed.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        let base = base_url.trim_end_matches('/');
        let generate_url = Url::parse(&format!("{base}/v1beta/models/{model}:generateContent"))
            .map_err(|e| GeminiError::InvalidBaseUrl {
                url: base.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            generate_url,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `prompt` and returns the model's reply text. The model is asked
    /// to answer with an `application/json` body; callers must still
    /// validate the text.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::Http`] on network failure.
    /// - [`GeminiError::Api`] if the API returns a non-2xx status.
    /// - [`GeminiError::Blocked`] if the prompt was blocked.
    /// - [`GeminiError::EmptyResponse`] if no candidate carries text.
    /// - [`GeminiError::Deserialize`] if the body is not the expected shape.
    pub async fn generate_json(&self, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateContentRequest::json_prompt(prompt);
        let response = self
            .client
            .post(self.generate_url.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: Self::error_message(&body),
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GeminiError::Deserialize {
                context: format!("generateContent(model={})", self.model),
                source: e,
            })?;

        if let Some(text) = parsed.text() {
            tracing::debug!(model = %self.model, chars = text.len(), "gemini reply received");
            return Ok(text);
        }

        match parsed.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => Err(GeminiError::Blocked(reason)),
            None => Err(GeminiError::EmptyResponse),
        }
    }

    fn error_message(body: &str) -> String {
        serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .map(|e| e.error.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| body.trim().to_string())
    }
}
