mod commands;

use clap::{Args, Parser, Subcommand};
use moodmap_core::{load_moods, AppConfig, MoodCatalog};
use moodmap_gemini::GeminiClient;
use moodmap_places::PlacesClient;
use moodmap_recommender::{resolve_origin, FixedLocation, QueryInput, Recommender};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "moodmap")]
#[command(about = "Find nearby places that match a mood")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the available moods
    Moods,
    /// Search nearby places for a mood or a free-text vibe
    Search {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Search, then analyze the vibe of one result
    Vibe {
        #[command(flatten)]
        query: QueryArgs,
        /// Position of the place in the result list (1 = closest)
        #[arg(long, default_value_t = 1)]
        pick: usize,
    },
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct QueryArgs {
    /// Mood key from `moodmap moods` (e.g. cafe)
    #[arg(long)]
    mood: Option<String>,
    /// Free-text vibe (e.g. "quiet place to read")
    #[arg(long)]
    query: Option<String>,
}

impl QueryArgs {
    fn into_input(self) -> QueryInput {
        match (self.mood, self.query) {
            (Some(mood), _) => QueryInput::Mood(mood),
            (None, Some(text)) => QueryInput::FreeText(text),
            // clap's group enforces exactly one of the two.
            (None, None) => QueryInput::FreeText(String::new()),
        }
    }
}

type AppRecommender = Recommender<GeminiClient, PlacesClient>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = moodmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let catalog = load_catalog(&config)?;

    match cli.command {
        Commands::Moods => commands::run_moods(&catalog),
        Commands::Search { query } => {
            let recommender = build_recommender(&config, catalog).await?;
            commands::run_search(&recommender, query.into_input()).await?;
        }
        Commands::Vibe { query, pick } => {
            let recommender = build_recommender(&config, catalog).await?;
            commands::run_vibe(&recommender, query.into_input(), pick).await?;
        }
    }

    Ok(())
}

fn load_catalog(config: &AppConfig) -> anyhow::Result<MoodCatalog> {
    match &config.moods_path {
        Some(path) => {
            let catalog = MoodCatalog::from(load_moods(path)?);
            tracing::debug!(path = %path.display(), moods = catalog.len(), "loaded mood catalog");
            Ok(catalog)
        }
        None => Ok(MoodCatalog::builtin()),
    }
}

async fn build_recommender(config: &AppConfig, catalog: MoodCatalog) -> anyhow::Result<AppRecommender> {
    let generator = config
        .gemini_api_key
        .as_deref()
        .map(|key| {
            GeminiClient::with_base_url(
                key,
                &config.gemini_model,
                config.request_timeout_secs,
                &config.gemini_base_url,
            )
        })
        .transpose()?;
    if generator.is_none() {
        tracing::warn!("GEMINI_API_KEY not set; free-text search disabled and vibes will fall back");
    }

    let searcher = config
        .maps_api_key
        .as_deref()
        .map(|key| {
            PlacesClient::with_base_url(key, config.request_timeout_secs, &config.places_base_url)
        })
        .transpose()?;
    if searcher.is_none() {
        tracing::warn!("GOOGLE_MAPS_API_KEY not set; place search disabled");
    }

    let origin = resolve_origin(&FixedLocation(config.origin)).await;
    Ok(Recommender::new(catalog, generator, searcher, origin))
}
