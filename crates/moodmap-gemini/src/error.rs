use thiserror::Error;

/// Errors returned by the Gemini API client.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The prompt was rejected by safety filters.
    #[error("prompt blocked: {0}")]
    Blocked(String),

    /// The response carried no candidate text.
    #[error("Gemini returned no text")]
    EmptyResponse,

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
