use std::path::PathBuf;

use crate::types::Origin;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub maps_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub places_base_url: String,
    pub gemini_base_url: String,
    pub request_timeout_secs: u64,
    pub moods_path: Option<PathBuf>,
    /// Fixed position reported by the configured geolocator, if any.
    pub origin: Option<Origin>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field(
                "maps_api_key",
                &self.maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("places_base_url", &self.places_base_url)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("moods_path", &self.moods_path)
            .field("origin", &self.origin)
            .finish()
    }
}
