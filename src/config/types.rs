use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Nippo configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ordered section names that make up the report
    pub template: Vec<String>,

    /// Git integration settings
    pub git: GitConfig,

    /// Slack integration settings
    pub slack: SlackConfig,

    /// Editor command used to finish the draft
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

/// Settings for the `git` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Heading used for the git section (falls back to the template entry)
    pub heading: Option<String>,

    /// Repositories whose commits are collected
    pub repositories: Vec<PathBuf>,
}

/// Settings for the `slack` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    /// API token with `search:read` scope
    pub token: String,

    /// Slack user whose messages are searched
    pub username: String,
}

impl Config {
    /// The configuration written by `nippo init`
    pub fn scaffold() -> Self {
        Self {
            template: ["today's work", "tomorrow's plan", "notes", "git", "slack"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            git: GitConfig {
                heading: Some("git".to_string()),
                repositories: Vec::new(),
            },
            slack: SlackConfig::default(),
            editor: None,
        }
    }
}

impl GitConfig {
    /// Heading for the git section, or `fallback` when none is configured
    pub fn heading_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.heading.as_deref() {
            Some(heading) if !heading.trim().is_empty() => heading,
            _ => fallback,
        }
    }
}
