//! Live timeline paging
//!
//! The API only serves roughly the 3200 most recent tweets (and likes) this
//! way. No explicit limit is enforced here: paging simply ends when the
//! provider returns an empty page.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};

use crate::api::PlatformApi;
use crate::config::PAGE_SIZE;
use crate::error::Result;
use crate::filter::FilterConfig;
use crate::record::Record;

/// Which live collection to page through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeline {
    Posts,
    Likes,
}

impl Timeline {
    fn qualifies(self, filter: &FilterConfig, record: &Record) -> bool {
        match self {
            Timeline::Posts => filter.should_delete(record),
            Timeline::Likes => filter.should_remove_like(record),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Timeline::Posts => "tweets",
            Timeline::Likes => "likes",
        }
    }
}

/// Pages backwards through a live timeline and yields qualifying records.
///
/// Pages are fetched on demand; at most one page is held in memory.
pub struct LivePaginator<'a, A> {
    api: &'a A,
    timeline: Timeline,
    filter: &'a FilterConfig,
    pacing: Duration,
    /// Id of the last record of the previous page.
    cursor: Option<u64>,
    buffer: VecDeque<Record>,
    requests: usize,
    exhausted: bool,
}

impl<'a, A: PlatformApi> LivePaginator<'a, A> {
    pub fn new(api: &'a A, timeline: Timeline, filter: &'a FilterConfig, pacing: Duration) -> Self {
        Self {
            api,
            timeline,
            filter,
            pacing,
            cursor: None,
            buffer: VecDeque::new(),
            requests: 0,
            exhausted: false,
        }
    }

    /// Next qualifying record, or `None` once the provider runs out of pages.
    ///
    /// Provider errors while fetching a page are returned as-is.
    pub async fn next(&mut self) -> Result<Option<Record>> {
        loop {
            while let Some(record) = self.buffer.pop_front() {
                if self.timeline.qualifies(self.filter, &record) {
                    return Ok(Some(record));
                }
            }

            if self.exhausted {
                return Ok(None);
            }

            self.fetch_page().await?;
        }
    }

    /// Number of page requests issued so far.
    pub fn requests(&self) -> usize {
        self.requests
    }

    async fn fetch_page(&mut self) -> Result<()> {
        let max_id = match self.cursor {
            None => None,
            Some(cursor) => {
                sleep(self.pacing).await;
                Some(cursor.saturating_sub(1))
            }
        };

        self.requests += 1;
        let page = match self.timeline {
            Timeline::Posts => self.api.user_timeline(PAGE_SIZE, max_id).await?,
            Timeline::Likes => self.api.favorites(PAGE_SIZE, max_id).await?,
        };

        debug!(
            timeline = self.timeline.label(),
            request = self.requests,
            ?max_id,
            size = page.len(),
            "Fetched page"
        );

        if page.is_empty() {
            info!(
                "No more {} available after {} requests",
                self.timeline.label(),
                self.requests
            );
            self.exhausted = true;
            return Ok(());
        }

        // Every record moves the cursor, including ones the filter will drop.
        for record in &page {
            self.cursor = Some(record.numeric_id()?);
        }
        self.buffer.extend(page);
        Ok(())
    }
}
