//! Data models module
//!
//! Defines the items pulled from Git and Slack and the per-day summaries
//! rendered into the report.

pub mod source;
pub mod summary;

pub use source::{Commit, Message};
pub use summary::{CommitSummary, MessageSummary};
