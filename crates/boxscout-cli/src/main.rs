//! boxscout - TMDB movie discovery and CSV export CLI.

/// Application configuration (TOML + environment).
mod config;
/// CSV export.
mod export;
/// Filter collection and interactive prompts.
mod prompt;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, credential_from_env, resolve_base_url, resolve_config_path};
use crate::export::{output_filename, write_movies};
use crate::prompt::{FilterArgs, gather_criteria};
use boxscout_api::discover::{StopReason, discover_movies};
use boxscout_api::tmdb::{LocalTmdbApi, TmdbClient};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Discover movies matching the filters and export them to CSV.
    Discover(DiscoverArgs),
    /// List the TMDB movie genre catalog.
    Genres,
}

/// Arguments for the `discover` subcommand.
#[derive(clap::Args)]
struct DiscoverArgs {
    /// Filter values; any omitted value is prompted for.
    #[command(flatten)]
    filters: FilterArgs,

    /// Directory the CSV file is written to (default: config, then ".").
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

/// Loads the config file for `dir`.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file is malformed.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Builds a `TmdbClient` from the environment credential and the config.
///
/// # Errors
///
/// Returns an error if no credential is set, the base URL is invalid, or
/// the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let credential = credential_from_env()?;

    let mut builder = TmdbClient::builder().credential(credential).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(base_url) = resolve_base_url(config.api.base_url.as_deref())? {
        builder = builder.base_url(base_url);
    }
    if let Some(interval) = config.min_interval() {
        builder = builder.min_interval(interval);
    }

    builder.build().context("failed to build TMDB client")
}

/// Runs the `discover` subcommand.
///
/// # Errors
///
/// Returns an error if the filters are invalid, the configuration or
/// credential is missing, or the CSV file cannot be written.
#[instrument(skip_all)]
async fn run_discover(args: &DiscoverArgs, dir: Option<&PathBuf>) -> Result<()> {
    let criteria = {
        let stdin = std::io::stdin();
        gather_criteria(&args.filters, &mut stdin.lock(), &mut std::io::stderr())?
    };
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    tracing::info!(
        genre = criteria.genre().label(),
        start = %criteria.start(),
        end = %criteria.end(),
        countries = %criteria.countries().join(", "),
        release_type = %criteria.release_type(),
        "Starting discovery"
    );
    let outcome = discover_movies(&client, &criteria, &config.page_policy()).await;

    if let StopReason::PageFailed { page } = outcome.stop {
        tracing::warn!(
            page,
            collected = outcome.movies.len(),
            "Discovery stopped early; exporting partial results"
        );
    }

    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| config.export.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create directory {}", output_dir.display()))?;
    let path = output_dir.join(output_filename(&criteria, Local::now()));

    write_movies(&outcome.movies, &path)
}

/// Runs the `genres` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_genres(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let catalog = client
        .movie_genres()
        .await
        .context("TMDB genre/movie/list request failed")?;

    tracing::info!("Genres ({}):", catalog.genres.len());
    for genre in &catalog.genres {
        tracing::info!("  {:>5}  {}", genre.id, genre.name);
    }

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Discover(args) => run_discover(&args, cli.dir.as_ref()).await,
        Commands::Genres => run_genres(cli.dir.as_ref()).await,
    }
}
