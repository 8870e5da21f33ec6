//! Reading tweets from an archive export (`tweet.js`)
//!
//! The export is a JavaScript file: a `window.YTD.tweet.part0 = ` assignment
//! followed by a JSON array. The preamble is cut off by length, not by content.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::config::ARCHIVE_PREFIX_LEN;
use crate::error::{Error, Result};
use crate::filter::FilterConfig;
use crate::record::{RawTweet, Record};

/// Current exports wrap each tweet under a `tweet` key; older ones don't.
fn decode_entry(index: usize, mut entry: Value) -> Result<Record> {
    let tweet = match entry.get_mut("tweet").map(Value::take) {
        Some(inner) => inner,
        None => entry,
    };
    let raw: RawTweet = serde_json::from_value(tweet)
        .map_err(|e| Error::ArchiveParse(format!("entry {}: {}", index, e)))?;
    Record::try_from(raw).map_err(|e| Error::ArchiveParse(format!("entry {}: {}", index, e)))
}

/// Parse archive content into records, in file order.
pub fn parse_archive(content: &str) -> Result<Vec<Record>> {
    let body = match content.char_indices().nth(ARCHIVE_PREFIX_LEN) {
        Some((offset, _)) => &content[offset..],
        None => {
            return Err(Error::ArchiveParse(format!(
                "content is shorter than the {}-character preamble",
                ARCHIVE_PREFIX_LEN
            )))
        }
    };

    let entries: Vec<Value> =
        serde_json::from_str(body).map_err(|e| Error::ArchiveParse(e.to_string()))?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| decode_entry(index, entry))
        .collect()
}

/// Read and parse an archive file.
pub fn load_archive<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path.as_ref())?;
    let records = parse_archive(&content)?;
    debug!(
        path = %path.as_ref().display(),
        count = records.len(),
        "Loaded archive"
    );
    Ok(records)
}

/// Lazily yields the archive records that qualify for deletion.
pub struct ArchiveReader<'a> {
    records: std::vec::IntoIter<Record>,
    filter: &'a FilterConfig,
}

impl<'a> ArchiveReader<'a> {
    pub fn new(records: Vec<Record>, filter: &'a FilterConfig) -> Self {
        Self {
            records: records.into_iter(),
            filter,
        }
    }
}

impl Iterator for ArchiveReader<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let filter = self.filter;
        self.records.find(|record| filter.should_delete(record))
    }
}
