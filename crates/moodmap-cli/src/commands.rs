//! Command handlers. Each prints to stdout; diagnostics go through `tracing`.

use moodmap_core::{MoodCatalog, Place, SearchSpec};
use moodmap_recommender::{
    PlaceSearcher, QueryInput, RecommendError, Recommender, SearchError, TextGenerator,
    VibeDelivery, VibeOutcome,
};

pub(crate) fn run_moods(catalog: &MoodCatalog) {
    for mood in catalog.iter() {
        println!("{:<10} {:<14} {}", mood.key, mood.label, mood.place_type);
    }
}

/// Runs a search and prints the result list.
///
/// Interpretation and provider failures are reported as "no results";
/// only a missing places key is an error.
pub(crate) async fn run_search<G, S>(
    recommender: &Recommender<G, S>,
    input: QueryInput,
) -> anyhow::Result<()>
where
    G: TextGenerator,
    S: PlaceSearcher,
{
    let places = search_or_report(recommender, input).await?;
    if let Some(spec) = recommender.state().active_search() {
        println!("{}", format_heading(spec));
    }
    for (index, place) in places.iter().enumerate() {
        println!("{}", format_place(index + 1, place));
    }
    Ok(())
}

/// Runs a search, then the vibe analysis for the `pick`-th result (1-based).
pub(crate) async fn run_vibe<G, S>(
    recommender: &Recommender<G, S>,
    input: QueryInput,
    pick: usize,
) -> anyhow::Result<()>
where
    G: TextGenerator,
    S: PlaceSearcher,
{
    let places = search_or_report(recommender, input).await?;
    if places.is_empty() {
        return Ok(());
    }
    let Some(place) = pick.checked_sub(1).and_then(|i| places.get(i)) else {
        anyhow::bail!("--pick must be between 1 and {}", places.len());
    };

    println!("{}", format_place(pick, place));
    println!("{}", place.maps_link());

    match recommender.select_place(&place.id).await {
        VibeDelivery::Applied(outcome) => print!("{}", format_vibe(&outcome)),
        VibeDelivery::Superseded | VibeDelivery::UnknownPlace => {
            tracing::warn!(place_id = %place.id, "vibe analysis did not apply");
        }
    }
    Ok(())
}

async fn search_or_report<G, S>(
    recommender: &Recommender<G, S>,
    input: QueryInput,
) -> anyhow::Result<Vec<Place>>
where
    G: TextGenerator,
    S: PlaceSearcher,
{
    match recommender.search(input).await {
        Ok(places) => {
            if places.is_empty() {
                println!("No places found nearby.");
            }
            Ok(places)
        }
        Err(RecommendError::Search(SearchError::Unavailable)) => {
            anyhow::bail!("place search is not configured (set GOOGLE_MAPS_API_KEY)")
        }
        Err(e) => {
            println!("No places found nearby.");
            tracing::debug!(error = %e, "search reported no results");
            Ok(Vec::new())
        }
    }
}

/// Active label, followed by the interpreted vibe term when there is one.
pub(crate) fn format_heading(spec: &SearchSpec) -> String {
    match &spec.keyword {
        Some(keyword) => format!("{} · {keyword}", spec.label),
        None => spec.label.clone(),
    }
}

pub(crate) fn format_place(position: usize, place: &Place) -> String {
    let rating = match (place.rating, place.rating_count) {
        (Some(rating), Some(count)) => format!("★ {rating:.1} ({count})"),
        (Some(rating), None) => format!("★ {rating:.1}"),
        _ => "no rating".to_string(),
    };
    format!(
        "{position:>2}. {name}  {distance}  {rating}",
        name = place.name,
        distance = place.distance_text,
    )
}

pub(crate) fn format_vibe(outcome: &VibeOutcome) -> String {
    let score = outcome.score();
    let mut out = String::new();
    for (label, value) in [
        ("Cozy", score.cozy),
        ("Loud", score.loud),
        ("Work", score.work_friendly),
    ] {
        out.push_str(&format!("{label:<5} {:<20} {value:>3}\n", meter(value)));
    }
    out.push_str(&score.summary);
    out.push('\n');
    out
}

fn meter(value: u8) -> String {
    let filled = usize::from(value) / 5;
    format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled))
}
