//! Delete command: archive or live sweep feeding the destroyers
//!
//! The sweep is one-shot. An interrupted run starts over from scratch next
//! time; already deleted tweets simply no longer show up.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::api::PlatformApi;
use crate::archive::{load_archive, ArchiveReader};
use crate::config::LIVE_SOURCE;
use crate::destroyer::{DeletionKind, Destroyer, Outcome};
use crate::error::Result;
use crate::filter::FilterConfig;
use crate::paginator::{LivePaginator, Timeline};

/// Where tweets come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `tweet.js` from an archive export
    Archive(PathBuf),
    /// The user's timeline through the API
    Live,
}

impl Source {
    /// `twitter` selects live mode; anything else is an archive path.
    pub fn parse(value: &str) -> Self {
        if value == LIVE_SOURCE {
            Source::Live
        } else {
            Source::Archive(PathBuf::from(value))
        }
    }
}

/// Arguments for the delete command.
#[derive(Debug, Clone)]
pub struct DeleteArgs {
    pub source: Source,
    pub filter: FilterConfig,
    /// Live mode only.
    pub remove_likes: bool,
    pub dry_run: bool,
}

/// Counters for one run.
///
/// `deleted_tweets` and `removed_likes` count every record handed to a
/// destroyer, including the ones whose deletion failed; the failures are
/// tallied separately.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub deleted_tweets: usize,
    pub removed_likes: usize,
    pub failed_tweets: usize,
    pub failed_likes: usize,
}

/// Run a full sweep and print the totals.
pub async fn run<A: PlatformApi>(api: &A, args: &DeleteArgs, pacing: Duration) -> Result<Summary> {
    let mut summary = Summary::default();
    let tweets = Destroyer::new(api, DeletionKind::Post, pacing, args.dry_run);

    match &args.source {
        Source::Archive(path) => {
            if args.remove_likes {
                warn!("--remove-likes is only supported in live mode, ignoring it");
            }

            info!(path = %path.display(), "Reading archive");
            let records = load_archive(path)?;
            for record in ArchiveReader::new(records, &args.filter) {
                let outcome = tweets.destroy(&record).await?;
                tally(&mut summary.deleted_tweets, &mut summary.failed_tweets, &outcome);
            }
        }
        Source::Live => {
            info!("Reading tweets from the live timeline");
            let mut timeline = LivePaginator::new(api, Timeline::Posts, &args.filter, pacing);
            while let Some(record) = timeline.next().await? {
                let outcome = tweets.destroy(&record).await?;
                tally(&mut summary.deleted_tweets, &mut summary.failed_tweets, &outcome);
            }

            if args.remove_likes {
                info!("Reading likes from the live timeline");
                let likes = Destroyer::new(api, DeletionKind::Like, pacing, args.dry_run);
                let mut favorites = LivePaginator::new(api, Timeline::Likes, &args.filter, pacing);
                while let Some(record) = favorites.next().await? {
                    let outcome = likes.destroy(&record).await?;
                    tally(&mut summary.removed_likes, &mut summary.failed_likes, &outcome);
                }
                println!("Number of removed likes: {}\n", summary.removed_likes);
            }
        }
    }

    println!("Number of deleted tweets: {}\n", summary.deleted_tweets);

    let failed = summary.failed_tweets + summary.failed_likes;
    if failed > 0 {
        warn!("{} deletions failed and are included in the counts above", failed);
    }

    Ok(summary)
}

fn tally(processed: &mut usize, failed: &mut usize, outcome: &Outcome) {
    *processed += 1;
    if matches!(outcome, Outcome::Failed(_)) {
        *failed += 1;
    }
}
