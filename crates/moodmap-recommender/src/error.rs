use moodmap_gemini::GeminiError;
use moodmap_places::PlacesError;
use thiserror::Error;

/// Failure of the text-generation collaborator.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No generator is configured (missing API key).
    #[error("text generation is not configured")]
    Unavailable,

    #[error(transparent)]
    Gemini(#[from] GeminiError),
}

/// A query could not be turned into a [`moodmap_core::SearchSpec`].
///
/// Callers must not proceed to search when this is returned.
#[derive(Debug, Error)]
pub enum InterpretationError {
    #[error("unknown mood: {0}")]
    UnknownMood(String),

    #[error("query is empty")]
    EmptyQuery,

    #[error("text generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("reply is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("reply has no place type")]
    MissingType,

    #[error("unsupported place type: {0}")]
    UnsupportedType(String),
}

/// The nearby search could not run or failed.
#[derive(Debug, Error)]
pub enum SearchError {
    /// No places collaborator is configured. Treated as a no-op.
    #[error("place search is not configured")]
    Unavailable,

    #[error("place search failed: {0}")]
    Provider(#[from] PlacesError),
}

/// Why a vibe analysis fell back. Never surfaced past the analyzer.
#[derive(Debug, Error)]
pub enum VibeAnalysisError {
    #[error("text generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("reply is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("reply violates vibe schema: {0}")]
    Schema(String),
}

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("location access denied")]
    Denied,

    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Errors from a search action, after they have been applied to session state.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error(transparent)]
    Interpretation(#[from] InterpretationError),

    #[error(transparent)]
    Search(#[from] SearchError),
}
