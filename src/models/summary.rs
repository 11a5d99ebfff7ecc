use super::source::{Commit, Message};

/// Commits found in one repository for one day
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitSummary {
    /// Number of commits
    pub count: usize,
    /// One ` - <hash> <subject>` line per commit
    pub text: String,
}

impl CommitSummary {
    pub fn from_commits(commits: &[Commit]) -> Self {
        let text = commits
            .iter()
            .map(|c| format!(" - {} {}\n", c.hash, c.subject))
            .collect();

        Self {
            count: commits.len(),
            text,
        }
    }
}

/// Slack messages found for one day
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageSummary {
    /// Number of messages
    pub count: usize,
    /// One quoted bullet line per message
    pub text: String,
}

impl MessageSummary {
    pub fn from_messages(messages: &[Message]) -> Self {
        let text = messages
            .iter()
            .map(|m| {
                let body = m.text.split_whitespace().collect::<Vec<_>>().join(" ");
                format!(" - \"{}\" #{}\n", body, m.channel)
            })
            .collect();

        Self {
            count: messages.len(),
            text,
        }
    }
}
