//! Delete old tweets and likes
//!
//! This library provides tools to:
//! - Read tweets from an archive export (`tweet.js`)
//! - Page through the live timeline and likes via the v1.1 API
//! - Filter by age, type, spared ids and engagement
//! - Delete qualifying tweets and remove likes at a fixed pace

pub mod api;
pub mod archive;
pub mod config;
pub mod destroyer;
pub mod error;
pub mod filter;
pub mod paginator;
pub mod record;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export common types
pub use api::{PlatformApi, TwitterClient};
pub use config::{Config, Credentials};
pub use error::{Error, Result};
pub use filter::{FilterConfig, TypeRestriction};
pub use record::Record;

// Commands module uses re-exported types, so it must be declared after the re-exports
pub mod commands;
