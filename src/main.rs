//! deletetweets CLI - main entry point

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use deletetweets::commands::{self, DeleteArgs, Source};
use deletetweets::filter::parse_cutoff;
use deletetweets::{Config, Credentials, FilterConfig, TwitterClient, TypeRestriction};

#[derive(Parser)]
#[command(name = "deletetweets")]
#[command(about = "Delete old tweets", long_about = None)]
#[command(version)]
struct Cli {
    /// Delete tweets until this date (tweets on or after it are kept)
    #[arg(short = 'd', long = "date", value_parser = parse_date)]
    date: NaiveDate,

    /// Restrict to either replies or retweets
    #[arg(short = 'r', long = "restrict", value_enum)]
    restrict: Option<TypeRestriction>,

    /// Path to the tweet.js file -OR- 'twitter' for LIVE MODE: read from the
    /// current user timeline (only the ~3200 most recent tweets are reachable)
    file: String,

    /// Tweet ids to spare
    #[arg(long = "spare-ids", num_args = 1..)]
    spare_ids: Vec<String>,

    /// Spare tweets with at least this many likes
    #[arg(long = "spare-min-likes")]
    min_likes: Option<u64>,

    /// Spare tweets with at least this many retweets
    #[arg(long = "spare-min-retweets")]
    min_retweets: Option<u64>,

    /// Remove likes (LIVE MODE only, the same 3200 limit applies)
    #[arg(long = "remove-likes", default_value_t = false)]
    remove_likes: bool,

    /// Log what would be deleted without calling the API
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Config file (defaults to ./deletetweets.yml when present)
    #[arg(long, env = "DELETETWEETS_CONFIG")]
    config: Option<PathBuf>,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    parse_cutoff(value).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for local development
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("deletetweets=info".parse()?))
        .init();

    let cli = Cli::parse();

    // Credentials are checked before anything touches the network.
    let credentials = Credentials::from_env()?;
    let config = Config::load(cli.config.as_deref())?;
    let client = TwitterClient::with_base_url(credentials, config.api_base_url.clone())?;

    let args = DeleteArgs {
        source: Source::parse(&cli.file),
        filter: FilterConfig {
            cutoff: Some(cli.date),
            restrict: cli.restrict,
            spare_ids: cli.spare_ids.into_iter().collect(),
            min_likes: cli.min_likes,
            min_retweets: cli.min_retweets,
        },
        remove_likes: cli.remove_likes,
        dry_run: cli.dry_run,
    };

    commands::delete_run(&client, &args, config.pacing).await?;

    Ok(())
}
