//! Mood key / free-text → [`SearchSpec`].

use std::sync::Arc;

use moodmap_core::{is_primary_type, MoodCatalog, SearchSpec};
use serde::Deserialize;

use crate::error::{GenerationError, InterpretationError};
use crate::ports::TextGenerator;
use crate::reply::parse_json_reply;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryInput {
    /// A catalog mood key, e.g. `cafe`.
    Mood(String),
    /// A typed vibe, e.g. `quiet cafe to work`.
    FreeText(String),
}

impl QueryInput {
    /// The catalog key for mood queries.
    #[must_use]
    pub fn mood_key(&self) -> Option<&str> {
        match self {
            QueryInput::Mood(key) => Some(key),
            QueryInput::FreeText(_) => None,
        }
    }
}

/// Shape the model is asked to return. Extra keys are ignored; `type` is
/// checked separately so a missing key is reported as such.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchConfigReply {
    #[serde(rename = "type", default)]
    place_type: Option<String>,
    #[serde(default)]
    keyword: Option<String>,
    #[serde(default)]
    mood_label: Option<String>,
}

pub struct QueryInterpreter<G> {
    catalog: MoodCatalog,
    generator: Option<Arc<G>>,
}

impl<G: TextGenerator> QueryInterpreter<G> {
    #[must_use]
    pub fn new(catalog: MoodCatalog, generator: Option<Arc<G>>) -> Self {
        Self { catalog, generator }
    }

    #[must_use]
    pub fn catalog(&self) -> &MoodCatalog {
        &self.catalog
    }

    /// Resolves `input` into a search spec.
    ///
    /// Mood keys are a pure catalog lookup. Free text costs exactly one
    /// generator call; its reply is validated before anything is trusted.
    ///
    /// # Errors
    ///
    /// Returns [`InterpretationError`] for unknown moods, blank text,
    /// generator failure, unparseable replies, or unsupported place types.
    pub async fn interpret(&self, input: &QueryInput) -> Result<SearchSpec, InterpretationError> {
        match input {
            QueryInput::Mood(key) => self
                .catalog
                .get(key)
                .map(moodmap_core::MoodConfig::search_spec)
                .ok_or_else(|| InterpretationError::UnknownMood(key.clone())),
            QueryInput::FreeText(text) => self.interpret_free_text(text).await,
        }
    }

    async fn interpret_free_text(&self, text: &str) -> Result<SearchSpec, InterpretationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(InterpretationError::EmptyQuery);
        }
        let generator = self
            .generator
            .as_ref()
            .ok_or(GenerationError::Unavailable)?;

        let reply = generator.generate(&search_prompt(text)).await?;
        let spec = parse_search_reply(&reply)?;

        tracing::debug!(
            place_type = %spec.place_type,
            label = %spec.label,
            "interpreted free-text query"
        );
        Ok(spec)
    }
}

/// Prompt asking for a strict `{type, keyword, moodLabel}` object.
#[must_use]
pub fn search_prompt(user_input: &str) -> String {
    // JSON-quote the input so embedded quotes cannot break out of the request line.
    let quoted = serde_json::to_string(user_input).unwrap_or_else(|_| format!("\"{user_input}\""));
    format!(
        "User request: {quoted}.\n\
         Provide a Google Maps search configuration.\n\
         Return ONLY a JSON object with these keys:\n\
         \"type\": (one valid primary type like 'cafe', 'restaurant', 'park'),\n\
         \"keyword\": (one vibe term like 'quiet', 'spicy', 'cozy'),\n\
         \"moodLabel\": (a short emoji label)."
    )
}

/// Validates a model reply into a [`SearchSpec`].
///
/// The place type is lowercased and spaces become underscores before it is
/// checked against the primary-type table. The label falls back to the
/// keyword, then to the type.
///
/// # Errors
///
/// See [`QueryInterpreter::interpret`].
pub fn parse_search_reply(reply: &str) -> Result<SearchSpec, InterpretationError> {
    let parsed: SearchConfigReply =
        parse_json_reply(reply).map_err(InterpretationError::InvalidJson)?;

    let place_type = parsed
        .place_type
        .map(|t| t.trim().to_ascii_lowercase().replace(' ', "_"))
        .filter(|t| !t.is_empty())
        .ok_or(InterpretationError::MissingType)?;

    if !is_primary_type(&place_type) {
        return Err(InterpretationError::UnsupportedType(place_type));
    }

    let keyword = non_blank(parsed.keyword);
    let label = non_blank(parsed.mood_label)
        .or_else(|| keyword.clone())
        .unwrap_or_else(|| place_type.clone());

    Ok(SearchSpec {
        place_type,
        label,
        keyword,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
