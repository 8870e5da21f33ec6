//! Deletion predicate for tweets and likes

use std::collections::HashSet;

use chrono::NaiveDate;
use clap::ValueEnum;

use crate::error::{Error, Result};
use crate::record::{parse_created_at, Record};

/// Parse the cutoff date given on the command line.
///
/// Accepts plain dates (`2020-01-31`, `2020/01/31`), RFC 3339 timestamps and the
/// platform's own `created_at` format. Time and offset are dropped.
pub fn parse_cutoff(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .map(Ok)
        .unwrap_or_else(|| parse_created_at(trimmed))
        .map_err(|_| Error::InvalidDate(format!("cannot parse '{}' as a date", value)))
}

/// Restrict deletion to a single kind of tweet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeRestriction {
    /// Only tweets that reply to another user
    Reply,
    /// Only retweets
    Retweet,
}

/// Which records qualify for deletion.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Records created on or after this date are kept.
    pub cutoff: Option<NaiveDate>,
    pub restrict: Option<TypeRestriction>,
    pub spare_ids: HashSet<String>,
    /// Zero behaves like unset.
    pub min_likes: Option<u64>,
    /// Zero behaves like unset.
    pub min_retweets: Option<u64>,
}

impl FilterConfig {
    /// Whether a tweet should be deleted.
    pub fn should_delete(&self, record: &Record) -> bool {
        !(self.is_too_recent(record)
            || self.is_excluded_type(record)
            || self.is_spared_id(record)
            || self.has_enough_engagement(record))
    }

    /// Whether a like should be removed. Type restrictions do not apply to likes.
    pub fn should_remove_like(&self, record: &Record) -> bool {
        !(self.is_too_recent(record)
            || self.is_spared_id(record)
            || self.has_enough_engagement(record))
    }

    fn is_too_recent(&self, record: &Record) -> bool {
        match (self.cutoff, record.created_on) {
            (Some(cutoff), Some(created_on)) => created_on >= cutoff,
            _ => false,
        }
    }

    fn is_excluded_type(&self, record: &Record) -> bool {
        match self.restrict {
            Some(TypeRestriction::Retweet) => !record.is_retweet(),
            Some(TypeRestriction::Reply) => !record.is_reply(),
            None => false,
        }
    }

    fn is_spared_id(&self, record: &Record) -> bool {
        self.spare_ids.contains(&record.id)
    }

    fn has_enough_engagement(&self, record: &Record) -> bool {
        let meets = |threshold: Option<u64>, count: u64| {
            matches!(threshold, Some(min) if min > 0 && count >= min)
        };
        meets(self.min_likes, record.like_count) || meets(self.min_retweets, record.retweet_count)
    }
}
