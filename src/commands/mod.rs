//! Command implementations
//!
//! Each module corresponds to an operation exposed by the CLI.

pub mod delete;

// Re-export commonly used types
pub use delete::{run as delete_run, DeleteArgs, Source, Summary};
