//! Single-record deletion with pacing

use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::api::PlatformApi;
use crate::error::Result;
use crate::record::Record;

/// What a destroyer removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionKind {
    /// Delete the tweet itself
    Post,
    /// Remove the like, leaving the tweet alone
    Like,
}

impl DeletionKind {
    fn verb(self) -> &'static str {
        match self {
            DeletionKind::Post => "delete tweet",
            DeletionKind::Like => "removing like",
        }
    }
}

/// Per-record result. Only provider errors end up here; everything else is an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Deleted,
    Failed(String),
    /// Dry run, no API call made
    Skipped,
}

pub struct Destroyer<'a, A> {
    api: &'a A,
    kind: DeletionKind,
    pacing: Duration,
    dry_run: bool,
}

impl<'a, A: PlatformApi> Destroyer<'a, A> {
    pub fn new(api: &'a A, kind: DeletionKind, pacing: Duration, dry_run: bool) -> Self {
        Self {
            api,
            kind,
            pacing,
            dry_run,
        }
    }

    /// Delete one record and wait out the pacing interval.
    ///
    /// A provider error for this record is logged and reported as
    /// [`Outcome::Failed`] so the batch can continue; transport errors abort.
    pub async fn destroy(&self, record: &Record) -> Result<Outcome> {
        let line = describe(record);

        if self.dry_run {
            println!("would {} {}", self.kind.verb(), line);
            return Ok(Outcome::Skipped);
        }

        println!("{} {}", self.kind.verb(), line);

        let result = match self.kind {
            DeletionKind::Post => self.api.destroy_status(&record.id).await,
            DeletionKind::Like => self.api.destroy_favorite(&record.id).await,
        };

        match result {
            Ok(()) => {
                sleep(self.pacing).await;
                Ok(Outcome::Deleted)
            }
            Err(err) if err.is_recoverable() => {
                warn!(id = %record.id, "Failed to {}: {}", self.kind.verb(), err);
                Ok(Outcome::Failed(err.to_string()))
            }
            Err(err) => Err(err),
        }
    }
}

/// `<id> (<created_at>: '<ascii text>')`
fn describe(record: &Record) -> String {
    format!(
        "{} ({}: '{}')",
        record.id,
        record.created_at,
        record.display_text()
    )
}
