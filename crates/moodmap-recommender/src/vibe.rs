//! AI vibe analysis for a selected place.
//!
//! Analysis never fails outward: any generator, parse, or schema failure
//! yields [`VibeScore::fallback`], so a completed analysis always has
//! something renderable.

use std::sync::Arc;

use moodmap_core::{Place, VibeScore};
use serde::Deserialize;

use crate::error::{GenerationError, VibeAnalysisError};
use crate::ports::TextGenerator;
use crate::reply::parse_json_reply;

/// Terminal state of one analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VibeOutcome {
    Ready(VibeScore),
    Fallback(VibeScore),
}

impl VibeOutcome {
    #[must_use]
    pub fn score(&self) -> &VibeScore {
        match self {
            VibeOutcome::Ready(score) | VibeOutcome::Fallback(score) => score,
        }
    }

    #[must_use]
    pub fn into_score(self) -> VibeScore {
        match self {
            VibeOutcome::Ready(score) | VibeOutcome::Fallback(score) => score,
        }
    }
}

/// All four keys are required; numbers may be out of range and are clamped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VibeReply {
    cozy: f64,
    loud: f64,
    work_friendly: f64,
    summary: String,
}

pub struct VibeAnalyzer<G> {
    generator: Option<Arc<G>>,
}

impl<G: TextGenerator> VibeAnalyzer<G> {
    #[must_use]
    pub fn new(generator: Option<Arc<G>>) -> Self {
        Self { generator }
    }

    /// Vibe score for `place`; the fallback score on any failure.
    pub async fn analyze(&self, place: &Place) -> VibeScore {
        self.assess(place).await.into_score()
    }

    /// Like [`VibeAnalyzer::analyze`], but reports whether the score came
    /// from the model or is the fallback.
    pub async fn assess(&self, place: &Place) -> VibeOutcome {
        match self.try_analyze(place).await {
            Ok(score) => VibeOutcome::Ready(score),
            Err(e) => {
                tracing::warn!(place_id = %place.id, error = %e, "vibe analysis failed, using fallback");
                VibeOutcome::Fallback(VibeScore::fallback())
            }
        }
    }

    async fn try_analyze(&self, place: &Place) -> Result<VibeScore, VibeAnalysisError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(GenerationError::Unavailable)?;
        let reply = generator.generate(&vibe_prompt(&analysis_text(place))).await?;
        parse_vibe_reply(&reply)
    }
}

/// Text the model analyzes: the editorial summary, or a sentence built
/// from name and rating.
#[must_use]
pub fn analysis_text(place: &Place) -> String {
    if let Some(summary) = &place.summary_text {
        return summary.clone();
    }
    let rating = place
        .rating
        .map_or_else(|| "unknown".to_string(), |r| r.to_string());
    format!(
        "This place is called {}. It has a rating of {rating}.",
        place.name
    )
}

#[must_use]
pub fn vibe_prompt(text: &str) -> String {
    format!(
        "Analyze the following place description and infer the vibe.\n\
         \n\
         Return ONLY valid JSON in this format:\n\
         {{\n  \"cozy\": number (0-100),\n  \"loud\": number (0-100),\n  \
         \"workFriendly\": number (0-100),\n  \"summary\": string (1 short sentence)\n}}\n\
         \n\
         Text:\n\"\"\"\n{text}\n\"\"\"\n"
    )
}

/// Validates a model reply into a clamped [`VibeScore`].
///
/// # Errors
///
/// Returns [`VibeAnalysisError::InvalidJson`] when the reply is not a JSON
/// object with all four keys of the right types, and
/// [`VibeAnalysisError::Schema`] when the summary is blank.
pub fn parse_vibe_reply(reply: &str) -> Result<VibeScore, VibeAnalysisError> {
    let parsed: VibeReply = parse_json_reply(reply).map_err(VibeAnalysisError::InvalidJson)?;

    let summary = parsed.summary.trim();
    if summary.is_empty() {
        return Err(VibeAnalysisError::Schema("summary is empty".to_string()));
    }

    Ok(VibeScore::clamped(
        parsed.cozy,
        parsed.loud,
        parsed.work_friendly,
        summary.to_string(),
    ))
}
