use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;

use crate::collectors::git::{self, GitCollector};
use crate::collectors::SlackCollector;
use crate::config::{GitConfig, SlackConfig};
use crate::error::Result;

/// Builds the markdown for one template entry
pub trait SectionBuilder {
    /// Render the section for `entry`, or `None` to leave it out of the report
    fn build(&self, entry: &str, day: NaiveDate) -> Result<Option<String>>;
}

/// Empty section with room for manual notes
pub struct Placeholder;

impl SectionBuilder for Placeholder {
    fn build(&self, entry: &str, _day: NaiveDate) -> Result<Option<String>> {
        Ok(Some(format!("## {}\n\n\n", entry)))
    }
}

/// Maps template entry names to their builders
///
/// Entries without a registered builder render as a `Placeholder`.
pub struct SectionRegistry<'a> {
    builders: HashMap<String, Box<dyn SectionBuilder + 'a>>,
}

impl<'a> SectionRegistry<'a> {
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Register `builder` for the template entry `name`
    pub fn register<B>(mut self, name: &str, builder: B) -> Self
    where
        B: SectionBuilder + 'a,
    {
        self.builders.insert(name.to_string(), Box::new(builder));
        self
    }

    pub fn build(&self, entry: &str, day: NaiveDate) -> Result<Option<String>> {
        match self.builders.get(entry) {
            Some(builder) => builder.build(entry, day),
            None => Placeholder.build(entry, day),
        }
    }
}

impl Default for SectionRegistry<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Today's commits across the configured repositories
pub struct GitSection<'a> {
    config: &'a GitConfig,
    collector: GitCollector<'a>,
    author: Option<String>,
}

impl<'a> GitSection<'a> {
    /// `author` overrides the identity resolved from each repository's git config
    pub fn new(config: &'a GitConfig, collector: GitCollector<'a>, author: Option<String>) -> Self {
        Self {
            config,
            collector,
            author,
        }
    }
}

impl SectionBuilder for GitSection<'_> {
    fn build(&self, entry: &str, day: NaiveDate) -> Result<Option<String>> {
        if self.config.repositories.is_empty() {
            tracing::warn!("no git repositories configured; skipping the git section");
            return Ok(None);
        }

        let mut total = 0;
        let mut body = String::new();

        for repo in &self.config.repositories {
            let author = match &self.author {
                Some(author) => author.clone(),
                None => git::resolve_author(repo)?,
            };

            let summary = self.collector.fetch_commits(repo, &author, day)?;
            if summary.count > 0 {
                total += summary.count;
                body.push_str(&format!(
                    "### {}({} commits)\n{}",
                    repo_name(repo),
                    summary.count,
                    summary.text
                ));
            }
        }

        if total == 0 {
            return Ok(None);
        }

        Ok(Some(format!(
            "## {}\n{}\n",
            self.config.heading_or(entry),
            body
        )))
    }
}

fn repo_name(repo: &Path) -> String {
    repo.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

/// The user's Slack messages around the report date
pub struct SlackSection<'a> {
    config: &'a SlackConfig,
    collector: SlackCollector,
    username: Option<String>,
    max_results: usize,
}

impl<'a> SlackSection<'a> {
    /// `username` overrides `slack.username` from the config
    pub fn new(
        config: &'a SlackConfig,
        collector: SlackCollector,
        username: Option<String>,
        max_results: usize,
    ) -> Self {
        Self {
            config,
            collector,
            username,
            max_results,
        }
    }
}

impl SectionBuilder for SlackSection<'_> {
    fn build(&self, entry: &str, day: NaiveDate) -> Result<Option<String>> {
        let username = self.username.as_deref().unwrap_or(&self.config.username);
        let summary =
            self.collector
                .fetch_messages(username, day, &self.config.token, self.max_results)?;

        if summary.count == 0 {
            return Ok(None);
        }

        Ok(Some(format!("## {}\n{}\n", entry, summary.text)))
    }
}
