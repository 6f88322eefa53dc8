pub mod app_config;
pub mod config;
pub mod geo;
pub mod moods;
pub mod place_types;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_meters, format_distance};
pub use moods::{load_moods, MoodCatalog, MoodConfig, MoodsFile};
pub use place_types::is_primary_type;
pub use types::{Origin, Place, SearchSpec, VibeScore, DEFAULT_ORIGIN};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read moods file at {path}: {source}")]
    MoodsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse moods file: {0}")]
    MoodsFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
