//! Data collectors module
//!
//! Implements collectors for the report's integrations:
//! - GitCollector: list a day's commits through the `git` CLI
//! - SlackCollector: search a day's Slack messages
pub mod git;
pub mod slack;

pub use git::GitCollector;
pub use slack::SlackCollector;
