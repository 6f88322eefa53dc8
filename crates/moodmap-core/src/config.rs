use crate::app_config::AppConfig;
use crate::types::Origin;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset so `KEY=` in a .env file disables a provider.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_coord = |var: &str, limit: f64| -> Result<Option<f64>, ConfigError> {
        let Some(raw) = optional(var) else {
            return Ok(None);
        };
        let value = raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if !value.is_finite() || value.abs() > limit {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be within ±{limit}"),
            });
        }
        Ok(Some(value))
    };

    let log_level = or_default("MOODMAP_LOG_LEVEL", "info");

    let maps_api_key = optional("GOOGLE_MAPS_API_KEY");
    let gemini_api_key = optional("GEMINI_API_KEY");
    let gemini_model = or_default("MOODMAP_GEMINI_MODEL", "gemini-2.5-flash");
    let places_base_url = or_default("MOODMAP_PLACES_BASE_URL", "https://places.googleapis.com");
    let gemini_base_url = or_default(
        "MOODMAP_GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com",
    );

    let request_timeout_secs = parse_u64("MOODMAP_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MOODMAP_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let moods_path = optional("MOODMAP_MOODS_PATH").map(PathBuf::from);

    let origin = match (
        parse_coord("MOODMAP_ORIGIN_LAT", 90.0)?,
        parse_coord("MOODMAP_ORIGIN_LNG", 180.0)?,
    ) {
        (Some(lat), Some(lng)) => Some(Origin::new(lat, lng)),
        (None, None) => None,
        (Some(_), None) => return Err(ConfigError::MissingEnvVar("MOODMAP_ORIGIN_LNG".into())),
        (None, Some(_)) => return Err(ConfigError::MissingEnvVar("MOODMAP_ORIGIN_LAT".into())),
    };

    Ok(AppConfig {
        log_level,
        maps_api_key,
        gemini_api_key,
        gemini_model,
        places_base_url,
        gemini_base_url,
        request_timeout_secs,
        moods_path,
        origin,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
