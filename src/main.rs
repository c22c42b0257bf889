//! Command-line front end for the Jotunn documentation cache.
//!
//! ```bash
//! jotunn [--config PATH] search <kind> <query> [--limit N]
//! jotunn [--config PATH] suggest <kind|ingredient> <query> [--max N]
//! jotunn [--config PATH] refresh
//! jotunn [--config PATH] watch
//! ```
//!
//! Configuration is loaded in order (later sources override earlier):
//! built-in defaults, the config file, then `JOTUNN_*` environment variables.

use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use derive_more::{Display, Error};
use exn::ResultExt;
use jotunn_cache::{Cache, DEFAULT_SUGGESTIONS, Snapshot, Source};
use jotunn_config::Config;
use jotunn_extract::models::RecordKind;
use jotunn_fetch::HttpFetcher;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, exn::Exn<ErrorKind>>;

#[derive(Debug, Display, Error)]
enum ErrorKind {
    #[display("unable to load configuration")]
    Config,
    #[display("unable to set up the document fetcher")]
    Setup,
    #[display("unable to listen for shutdown signal")]
    Signal,
}

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file (TOML, YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Searches one object list.
    Search {
        /// item, recipe, ingredient, prefab, piece or character.
        #[arg(value_parser = parse_target)]
        target: Target,
        query: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Suggests completions for a partial name.
    Suggest {
        #[arg(value_parser = parse_target)]
        target: Target,
        #[arg(default_value = "")]
        query: String,
        #[arg(long, default_value_t = DEFAULT_SUGGESTIONS)]
        max: usize,
    },
    /// Runs one refresh round and reports what happened to each source.
    Refresh,
    /// Keeps the cache warm in the background until interrupted.
    Watch,
}

/// A record kind, or recipes looked up by what they consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Kind(RecordKind),
    Ingredient,
}

fn parse_target(value: &str) -> std::result::Result<Target, String> {
    match value.trim().to_lowercase().as_str() {
        "ingredient" | "ingredients" => Ok(Target::Ingredient),
        other => other.parse::<RecordKind>().map(Target::Kind).map_err(|_| format!("unknown kind {value:?}")),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = ?err, "Fatal error");
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    let cache = build_cache(&config)?;
    match cli.command {
        Command::Search { target, query, limit } => {
            warm(&cache).await;
            search(&cache.snapshot(), target, &query, limit);
        },
        Command::Suggest { target, query, max } => {
            warm(&cache).await;
            for suggestion in suggest(&cache.snapshot(), target, &query, max) {
                println!("{suggestion}");
            }
        },
        Command::Refresh => {
            let report = cache.refresh().await;
            println!("{report}");
        },
        Command::Watch => {
            let refresher = cache.spawn_refresher(config.refresh_interval());
            tokio::signal::ctrl_c().await.or_raise(|| ErrorKind::Signal)?;
            tracing::info!("Shutting down");
            refresher.shutdown().await;
        },
    }
    Ok(())
}

fn build_cache(config: &Config) -> Result<Cache> {
    let fetcher = HttpFetcher::with_options(config.timeout(), &config.http.user_agent).or_raise(|| ErrorKind::Setup)?;
    let sources = config
        .sources()
        .into_iter()
        .map(|(kind, url)| Source::new(kind, url))
        .collect::<std::result::Result<Vec<_>, _>>()
        .or_raise(|| ErrorKind::Config)?;
    Ok(Cache::new(Arc::new(fetcher), sources, config.expiry()))
}

async fn warm(cache: &Cache) {
    if let Some(report) = cache.ensure_fresh().await
        && !report.any_succeeded()
    {
        tracing::warn!("No source could be reached; results will be empty");
    }
}

fn search(snapshot: &Snapshot, target: Target, query: &str, limit: usize) {
    match target {
        Target::Kind(RecordKind::Item) => print_all(snapshot.find_items(query, limit)),
        Target::Kind(RecordKind::Recipe) => print_all(snapshot.find_recipes_for(query, limit)),
        Target::Ingredient => print_all(snapshot.find_recipes_by_ingredient(query, limit)),
        Target::Kind(RecordKind::Prefab) => print_all(snapshot.find_prefabs(query, limit)),
        Target::Kind(RecordKind::Piece) => print_all(snapshot.find_pieces(query, limit)),
        Target::Kind(RecordKind::Character) => print_all(snapshot.find_characters(query, limit)),
    }
}

fn suggest(snapshot: &Snapshot, target: Target, query: &str, max: usize) -> Vec<String> {
    match target {
        Target::Kind(RecordKind::Item) => snapshot.suggest_items(query, max),
        Target::Kind(RecordKind::Recipe) => snapshot.suggest_recipe_results(query, max),
        Target::Ingredient => snapshot.suggest_recipe_ingredients(query, max),
        Target::Kind(RecordKind::Prefab) => snapshot.suggest_prefabs(query, max),
        Target::Kind(RecordKind::Piece) => snapshot.suggest_pieces(query, max),
        Target::Kind(RecordKind::Character) => snapshot.suggest_characters(query, max),
    }
}

fn print_all<T: fmt::Display>(records: Vec<&T>) {
    if records.is_empty() {
        println!("No matches.");
    }
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{record}");
    }
}
