//! zenflix - terminal media browser backed by the TMDB catalog.

/// Application configuration (TOML).
mod config;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, CatalogConfig, resolve_config_path, resolve_state_dir};
use zenflix_api::catalog::{
    CatalogApi, CatalogClient, CatalogPage, Genre, ImageSize, MediaKind, MediaType, TimeWindow,
    image_url,
};
use zenflix_tui::details::load_details;
use zenflix_tui::hero::load_hero;
use zenflix_tui::page::default_rows;
use zenflix_tui::route::Route;
use zenflix_tui::row::load_items;
use zenflix_tui::{BrowserOptions, run_browser};

/// File the terminal browser logs to, inside the state directory.
const LOG_FILE_NAME: &str = "zenflix.log";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/state directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run (default: `browse`).
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal browser.
    Browse(BrowseArgs),
    /// Run one catalog query and log the results.
    Catalog(CatalogCommand),
    /// Print the image CDN URL for a poster or backdrop path.
    ImageUrl(ImageUrlArgs),
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args, Default)]
struct BrowseArgs {
    /// Page to open first, e.g. `/MovieDetails?id=533535` or `/Browse`.
    #[arg(long, default_value = "/")]
    open: String,
}

/// Arguments for the `catalog` subcommand.
#[derive(clap::Args)]
struct CatalogCommand {
    /// Catalog subcommand to run.
    #[command(subcommand)]
    command: CatalogSubcommands,
}

/// Available catalog subcommands.
#[derive(Subcommand)]
enum CatalogSubcommands {
    /// Trending titles (`trending/{media}/{window}`).
    Trending {
        /// all, movie or tv.
        #[arg(long, default_value = "all")]
        media: MediaType,
        /// day or week.
        #[arg(long, default_value = "week")]
        window: TimeWindow,
    },
    /// Top-rated titles.
    TopRated {
        /// movie or tv.
        #[arg(long, default_value = "movie")]
        kind: MediaKind,
    },
    /// Popular titles.
    Popular {
        /// movie or tv.
        #[arg(long, default_value = "movie")]
        kind: MediaKind,
    },
    /// Upcoming movies.
    Upcoming,
    /// Movies in a genre (e.g. `action`, `science-fiction`).
    Genre {
        /// Genre slug.
        genre: Genre,
    },
    /// Search movies, shows and people.
    Search {
        /// Search text.
        query: String,
    },
    /// Full details of one title.
    Details {
        /// TMDB ID.
        id: u64,
        /// movie or tv.
        #[arg(long, default_value = "movie")]
        kind: MediaKind,
    },
    /// Load the hero and every home row concurrently and log a summary.
    Home,
}

/// Arguments for the `image-url` subcommand.
#[derive(clap::Args)]
struct ImageUrlArgs {
    /// Path fragment from a catalog record, e.g. `/abc.jpg`.
    #[arg(long)]
    path: Option<String>,

    /// w500, w780 or original.
    #[arg(long, default_value = "original")]
    size: ImageSize,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a config file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Log the effective configuration.
    Show,
}

/// Builds a catalog client from the environment and config.
///
/// # Errors
///
/// Returns an error if `TMDB_API_KEY` is not set or the client fails to build.
#[instrument(skip_all)]
fn build_catalog_client(config: &CatalogConfig) -> Result<CatalogClient> {
    let api_key = std::env::var("TMDB_API_KEY")
        .context("TMDB_API_KEY environment variable is required")?;

    let mut builder = CatalogClient::builder()
        .api_key(api_key)
        .base_url(config.base_url()?)
        .relay(config.relay()?)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    if let Ok(token) = std::env::var("TMDB_READ_TOKEN")
        && !token.is_empty()
    {
        builder = builder.read_token(token);
    }
    if let Some(language) = &config.language {
        builder = builder.language(language.clone());
    }

    builder.build().context("failed to build catalog client")
}

/// Loads the config file for `dir`.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    AppConfig::load(&path)
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the terminal fails.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_catalog_client(&config.catalog)?;
    tracing::info!(relay = client.relay().label(), "starting browser");

    let options = BrowserOptions {
        start: Route::parse(&args.open),
        reveal_delay: config.home.hero_reveal(),
    };
    run_browser(Arc::new(client), options).await
}

/// Logs one result page as a table.
fn log_page(page: &CatalogPage) {
    tracing::info!("Total results: {}", page.total_results);
    tracing::info!("ID\tType\tDate\t\tVote\tTitle");
    for item in page.results.iter().flatten() {
        tracing::info!(
            "{}\t{}\t{}\t{:.1}\t{}",
            item.id,
            item.media_type
                .as_deref()
                .unwrap_or(if item.is_tv() { "tv" } else { "movie" }),
            item.date().unwrap_or("-"),
            item.vote_average,
            item.display_title().unwrap_or("-"),
        );
    }
}

/// Runs a `catalog` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_catalog(command: &CatalogSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_catalog_client(&config.catalog)?;

    let page = match command {
        CatalogSubcommands::Trending { media, window } => client
            .trending(*media, *window)
            .await
            .context("trending request failed")?,
        CatalogSubcommands::TopRated { kind } => client
            .top_rated(*kind)
            .await
            .context("top_rated request failed")?,
        CatalogSubcommands::Popular { kind } => client
            .popular(*kind)
            .await
            .context("popular request failed")?,
        CatalogSubcommands::Upcoming => client
            .upcoming()
            .await
            .context("upcoming request failed")?,
        CatalogSubcommands::Genre { genre } => client
            .discover_by_genre(genre.id())
            .await
            .context("discover request failed")?,
        CatalogSubcommands::Search { query } => client
            .search(query)
            .await
            .context("search request failed")?,
        CatalogSubcommands::Details { id, kind } => {
            return run_catalog_details(&client, *kind, *id).await;
        }
        CatalogSubcommands::Home => return run_catalog_home(&client).await,
    };

    log_page(&page);
    Ok(())
}

/// Logs the details view of one title.
///
/// # Errors
///
/// Returns an error if the request fails.
#[instrument(skip_all)]
async fn run_catalog_details(client: &CatalogClient, kind: MediaKind, id: u64) -> Result<()> {
    let view = load_details(client, kind, id)
        .await
        .with_context(|| format!("details request failed for {kind}/{id}"))?;

    tracing::info!("Title:     {}", view.title);
    if !view.tagline.is_empty() {
        tracing::info!("Tagline:   {}", view.tagline);
    }
    tracing::info!("Released:  {}", or_dash(&view.release_date));
    tracing::info!("Score:     {}", view.score);
    tracing::info!("Rating:    {}", view.rating);
    tracing::info!("Duration:  {}", or_dash(&view.duration));
    tracing::info!("Genres:    {}", view.genres.join(", "));
    tracing::info!("Director:  {}", or_dash(&view.director));
    tracing::info!(
        "Cast:      {}",
        view.cast
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    tracing::info!("Trailer:   {}", view.trailer_url);
    tracing::info!("Synopsis:  {}", view.synopsis);
    tracing::info!("More Like This:");
    for item in &view.similar {
        tracing::info!("  {}\t{}", item.id, item.display_title().unwrap_or("-"));
    }
    Ok(())
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

/// Loads the home page non-interactively: hero and rows concurrently.
///
/// Row failures are logged by the row loader and show as empty rows.
#[instrument(skip_all)]
async fn run_catalog_home(client: &CatalogClient) -> Result<()> {
    let rows = default_rows();
    let row_loads = rows.iter().filter_map(|row| {
        let query = row.query()?;
        let title = row.title();
        Some(async move { (title, load_items(title, || query.fetch(client)).await) })
    });

    let (hero, rows) = futures::join!(load_hero(client), futures::future::join_all(row_loads));

    match hero {
        Ok(selection) => tracing::info!(
            "Hero: {} ({}% Match, {})",
            selection.title,
            selection.match_score,
            or_dash(&selection.year)
        ),
        Err(e) => tracing::warn!("Hero: Featured Content Unavailable: {e}"),
    }
    for (title, items) in rows {
        tracing::info!("{title}: {} titles", items.len());
    }
    Ok(())
}

/// Runs the `image-url` subcommand.
#[allow(clippy::unnecessary_wraps)]
fn run_image_url(args: &ImageUrlArgs) -> Result<()> {
    tracing::info!("{}", image_url(args.path.as_deref(), args.size));
    Ok(())
}

/// Runs a `config` subcommand.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
fn run_config(command: &ConfigSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    match command {
        ConfigSubcommands::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            AppConfig::default().save(&path)?;
            tracing::info!("Wrote {}", path.display());
        }
        ConfigSubcommands::Show => {
            let config = AppConfig::load(&path)?;
            let text =
                toml::to_string_pretty(&config).context("failed to serialize config to TOML")?;
            tracing::info!("# {}", path.display());
            for line in text.lines() {
                tracing::info!("{line}");
            }
        }
    }
    Ok(())
}

/// Log destination: stdout, or the given file (browser mode).
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
fn log_writer(log_file: Option<&Path>) -> Result<BoxMakeWriter> {
    let Some(path) = log_file else {
        return Ok(BoxMakeWriter::new(std::io::stdout));
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    Ok(BoxMakeWriter::new(Mutex::new(file)))
}

/// Installs the global tracing subscriber.
fn init_tracing(writer: BoxMakeWriter, ansi: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false);

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
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Browse(BrowseArgs::default()));
    let dir = cli.dir.as_ref();

    // The browser owns the terminal, so its logs go to a file.
    let log_file = match &command {
        Commands::Browse(_) => Some(resolve_state_dir(dir)?.join(LOG_FILE_NAME)),
        _ => None,
    };
    init_tracing(log_writer(log_file.as_deref())?, log_file.is_none());

    match command {
        Commands::Browse(args) => run_browse(&args, dir).await,
        Commands::Catalog(catalog) => run_catalog(&catalog.command, dir).await,
        Commands::ImageUrl(args) => run_image_url(&args),
        Commands::Config(config) => run_config(&config.command, dir),
    }
}
