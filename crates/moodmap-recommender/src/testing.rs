//! Scripted collaborators for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use moodmap_gemini::GeminiError;
use moodmap_places::{NearbySearchRequest, PhotoMedia, PlacesError, RawPlace};

use crate::error::GenerationError;
use crate::ports::{PlaceSearcher, TextGenerator};

/// Replies with queued texts in order; an empty queue or a queued `None`
/// fails the call.
#[derive(Default)]
pub(crate) struct ScriptedGenerator {
    replies: Mutex<VecDeque<Option<String>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub(crate) fn replying<'a>(replies: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Some(r.to_string())).collect()),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([None])),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.replies.lock().unwrap().pop_front() {
            Some(Some(reply)) => Ok(reply),
            _ => Err(GenerationError::Gemini(GeminiError::EmptyResponse)),
        }
    }
}

/// Returns a fixed result set and records each request.
pub(crate) struct FixedSearcher {
    results: Mutex<Option<Result<Vec<RawPlace>, PlacesError>>>,
    requests: Mutex<Vec<NearbySearchRequest>>,
}

impl FixedSearcher {
    pub(crate) fn returning(places: Vec<RawPlace>) -> Self {
        Self {
            results: Mutex::new(Some(Ok(places))),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing_with(status: u16) -> Self {
        Self {
            results: Mutex::new(Some(Err(PlacesError::Api {
                status,
                message: "scripted failure".to_string(),
            }))),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<NearbySearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl PlaceSearcher for FixedSearcher {
    async fn search_nearby(
        &self,
        request: &NearbySearchRequest,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.results.lock().unwrap().take() {
            Some(result) => result,
            None => Ok(Vec::new()),
        }
    }

    fn photo_media(&self) -> PhotoMedia {
        PhotoMedia::new("https://places.test", "test-key")
    }
}

/// A provider record at the given coordinate.
pub(crate) fn raw_place(id: &str, name: &str, lat: f64, lng: f64) -> RawPlace {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "displayName": { "text": name },
        "location": { "latitude": lat, "longitude": lng },
        "rating": 4.2
    }))
    .expect("valid raw place")
}
