//! Scripted in-memory `PlatformApi` for unit tests

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use crate::api::PlatformApi;
use crate::error::{Error, Result};
use crate::record::{sample, Record};

/// Failure to inject for a destroy call.
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Provider,
    Connection,
}

#[derive(Default)]
pub struct ScriptedApi {
    timeline_pages: RefCell<VecDeque<Result<Vec<Record>>>>,
    favorites_pages: RefCell<VecDeque<Result<Vec<Record>>>>,
    timeline_requests: RefCell<Vec<Option<u64>>>,
    favorites_requests: RefCell<Vec<Option<u64>>>,
    failures: HashMap<String, Failure>,
    destroyed_statuses: RefCell<Vec<String>>,
    destroyed_favorites: RefCell<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeline_page(self, page: Vec<Record>) -> Self {
        self.timeline_pages.borrow_mut().push_back(Ok(page));
        self
    }

    pub fn with_timeline_error(self, message: &str) -> Self {
        self.timeline_pages
            .borrow_mut()
            .push_back(Err(Error::TwitterError(message.to_string())));
        self
    }

    pub fn with_favorites_page(self, page: Vec<Record>) -> Self {
        self.favorites_pages.borrow_mut().push_back(Ok(page));
        self
    }

    pub fn failing(mut self, id: &str, failure: Failure) -> Self {
        self.failures.insert(id.to_string(), failure);
        self
    }

    pub fn timeline_requests(&self) -> Vec<Option<u64>> {
        self.timeline_requests.borrow().clone()
    }

    pub fn favorites_requests(&self) -> Vec<Option<u64>> {
        self.favorites_requests.borrow().clone()
    }

    pub fn destroyed_statuses(&self) -> Vec<String> {
        self.destroyed_statuses.borrow().clone()
    }

    pub fn destroyed_favorites(&self) -> Vec<String> {
        self.destroyed_favorites.borrow().clone()
    }

    fn destroy(&self, id: &str, log: &RefCell<Vec<String>>) -> Result<()> {
        log.borrow_mut().push(id.to_string());
        match self.failures.get(id) {
            Some(Failure::Provider) => Err(Error::TwitterError(format!(
                "HTTP 404: No status found with that ID. ({})",
                id
            ))),
            Some(Failure::Connection) => Err(Error::ConnectionError("connection reset".into())),
            None => Ok(()),
        }
    }
}

impl PlatformApi for ScriptedApi {
    async fn user_timeline(&self, _count: u32, max_id: Option<u64>) -> Result<Vec<Record>> {
        self.timeline_requests.borrow_mut().push(max_id);
        self.timeline_pages
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn favorites(&self, _count: u32, max_id: Option<u64>) -> Result<Vec<Record>> {
        self.favorites_requests.borrow_mut().push(max_id);
        self.favorites_pages
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn destroy_status(&self, id: &str) -> Result<()> {
        self.destroy(id, &self.destroyed_statuses)
    }

    async fn destroy_favorite(&self, id: &str) -> Result<()> {
        self.destroy(id, &self.destroyed_favorites)
    }
}

/// Old records with ids counting down from `newest` to `oldest`.
pub fn page(newest: u64, oldest: u64, len: usize) -> Vec<Record> {
    let records: Vec<Record> = (oldest..=newest)
        .rev()
        .map(|id| sample(&id.to_string(), "Mon Jan 06 10:00:00 +0000 2014", "old tweet"))
        .collect();
    assert_eq!(records.len(), len, "page({newest}, {oldest}) size");
    records
}
