//! song-vocab CLI
//!
//! Finds a song's lyrics, extracts learner vocabulary with Gemini and stores
//! it in SQLite.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gemini_client::GeminiClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use song_vocab::{
    Config, GeminiModel, GoogleSearcher, HttpFetcher, PipelineAgent, RetrievalConfig,
    SqliteVocabularyStore, VocabularyItem, VocabularyStore,
};

#[derive(Parser)]
#[command(name = "song-vocab")]
#[command(about = "Extract learner vocabulary from song lyrics")]
struct Cli {
    /// Database URL (overrides VOCAB_DATABASE_URL)
    #[arg(long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the vocabulary table
    Init,

    /// Find lyrics, extract vocabulary and store it
    Process {
        song: String,
        #[arg(long)]
        artist: Option<String>,
    },

    /// List stored vocabulary for a song
    Show {
        song: String,
        #[arg(long)]
        artist: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,song_vocab=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            let url = Config::database_url(cli.database);
            let store = SqliteVocabularyStore::open(&url)
                .await
                .context("Failed to initialize database")?;
            store.close().await?;
            println!("Vocabulary database ready at {}", url);
        }

        Commands::Show { song, artist } => {
            let url = Config::database_url(cli.database);
            let store = SqliteVocabularyStore::open(&url)
                .await
                .context("Failed to open database")?;
            let artist = artist.as_deref().map(str::trim).filter(|a| !a.is_empty());
            let items = store.get_for_song(song.trim(), artist).await?;
            store.close().await?;

            if items.is_empty() {
                println!("No vocabulary stored for \"{}\"", song);
            } else {
                print_vocabulary(&items);
            }
        }

        Commands::Process { song, artist } => {
            let config = Config::from_env()
                .context("Failed to load configuration")?
                .with_database_flag(cli.database);
            tracing::info!("Configuration loaded");

            let retrieval = RetrievalConfig::default();
            let searcher =
                GoogleSearcher::new(config.google_api_key.clone(), config.google_cse_id.clone())?;
            let fetcher = HttpFetcher::with_user_agent(retrieval.user_agent.clone())?;
            let model = GeminiModel::new(
                GeminiClient::new(config.gemini_api_key.expose())
                    .context("Failed to build Gemini client")?,
                config.gemini_model.clone(),
            );
            let store = SqliteVocabularyStore::connect(&config.database_url)
                .await
                .context("Failed to connect to database")?;

            let agent = PipelineAgent::from_parts(searcher, fetcher, model, store, retrieval)
                .await
                .context("Failed to initialize pipeline")?;

            let outcome = agent.process_song(&song, artist.as_deref()).await;
            agent.close().await?;

            if let Some(error) = &outcome.error {
                let stage = outcome
                    .failed_stage()
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                anyhow::bail!("Processing \"{}\" failed while {}: {}", song, stage, error);
            }

            if let Some(source) = &outcome.lyrics_source {
                println!("Lyrics from {}", source);
            }
            print_vocabulary(&outcome.vocabulary);
            println!(
                "Stored {} new word(s), {} already known",
                outcome.stored.inserted, outcome.stored.skipped
            );
        }
    }

    Ok(())
}

fn print_vocabulary(items: &[VocabularyItem]) {
    for item in items {
        println!("  {:<20} {}", item.word, item.definition);
    }
}
