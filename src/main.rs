use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vidsearch::YouTubeClient;
use vidsearch::api::{AppState, create_router};
use vidsearch::config::Config;
use vidsearch::data_models::{
    DEFAULT_MAX_RESULTS, SafeSearch, SearchFilter, SortOrder, VideoDefinition, VideoDuration,
};
use vidsearch::error::SearchError;
use vidsearch::render::render_outcome;

const KEY_HELP: &str = "\
Set your YouTube Data API v3 key in one of these ways:
  - add API_KEY=<your key> to a .env file in the working directory
  - export API_KEY=<your key>
  - pass --api-key <your key>
Get a key from https://console.cloud.google.com/apis/credentials
(create a project, enable YouTube Data API v3, then create an API key).";

#[derive(Parser)]
#[command(
    name = "vidsearch",
    version,
    about = "Search YouTube videos from the terminal or a browser"
)]
struct Cli {
    /// API key; overrides API_KEY from the environment.
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one search and print the results.
    Search(SearchArgs),
    /// Serve the web UI and JSON API.
    Serve {
        /// Address to listen on. Defaults to BIND_ADDR or 127.0.0.1:7860.
        #[arg(long)]
        bind: Option<String>,
        /// Directory holding the web UI.
        #[arg(long, default_value = "static")]
        static_dir: PathBuf,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Keywords to search for.
    query: String,
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: u32,
    #[arg(long, value_enum, default_value_t)]
    duration: VideoDuration,
    /// Two-letter region code. Defaults to DEFAULT_REGION or NL.
    #[arg(long)]
    region: Option<String>,
    #[arg(long, value_enum, default_value_t)]
    safe_search: SafeSearch,
    #[arg(long, value_enum, default_value_t)]
    order: SortOrder,
    #[arg(long, value_enum, default_value_t)]
    definition: VideoDefinition,
    /// Only videos published on or after this date (YYYY-MM-DD).
    #[arg(long)]
    published_after: Option<NaiveDate>,
    /// Only videos published on or before this date (YYYY-MM-DD).
    #[arg(long)]
    published_before: Option<NaiveDate>,
}

impl SearchArgs {
    fn into_filter(self, default_region: &str) -> SearchFilter {
        let mut filter = SearchFilter::new(self.query);
        filter.max_results = self.max_results;
        filter.duration = self.duration;
        filter.region_code = self.region.unwrap_or_else(|| default_region.to_string());
        filter.safe_search = self.safe_search;
        filter.order = self.order;
        filter.definition = self.definition;
        if let Some(date) = self.published_after {
            filter = filter.published_after_date(date);
        }
        if let Some(date) = self.published_before {
            filter = filter.published_before_date(date);
        }
        filter
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so search output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_api_key(cli.api_key);

    match cli.command {
        Command::Search(args) => run_search(&config, args).await,
        Command::Serve { bind, static_dir } => serve(&config, bind, static_dir).await,
    }
}

async fn run_search(config: &Config, args: SearchArgs) -> anyhow::Result<()> {
    let client = YouTubeClient::from_config(config)?;
    let filter = args.into_filter(&config.default_region);

    match client.search(&filter).await {
        Ok(outcome) => {
            print!("{}", render_outcome(filter.query.trim(), &outcome));
            Ok(())
        }
        Err(SearchError::MissingCredential) => {
            eprintln!("{KEY_HELP}");
            bail!(SearchError::MissingCredential)
        }
        Err(e) => Err(e.into()),
    }
}

async fn serve(config: &Config, bind: Option<String>, static_dir: PathBuf) -> anyhow::Result<()> {
    let client = YouTubeClient::from_config(config)?;
    if !client.has_credential() {
        tracing::warn!("API_KEY is not set; searches will fail until it is configured");
    }

    let state = Arc::new(AppState {
        client,
        default_region: config.default_region.clone(),
    });
    let app = create_router(state, &static_dir);

    let addr = bind.unwrap_or_else(|| config.bind_addr.clone());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, static_dir = %static_dir.display(), "serving web UI");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
