use chrono::{DateTime, Utc};

// ============================================================================
// Git Models
// ============================================================================

/// A single Git commit as listed by `git log`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Abbreviated commit hash
    pub hash: String,
    /// First line of the commit message
    pub subject: String,
    /// Committer timestamp
    pub timestamp: DateTime<Utc>,
}

impl Commit {
    /// Parse one line of `git log --format='%ct %h %s'` output
    ///
    /// Returns `None` for blank or malformed lines.
    pub fn parse_log_line(line: &str) -> Option<Self> {
        let mut parts = line.trim_end().splitn(3, ' ');
        let seconds: i64 = parts.next()?.parse().ok()?;
        let hash = parts.next().filter(|h| !h.is_empty())?;
        let subject = parts.next().unwrap_or("");

        Some(Self {
            hash: hash.to_string(),
            subject: subject.to_string(),
            timestamp: DateTime::from_timestamp(seconds, 0)?,
        })
    }
}

// ============================================================================
// Slack Models
// ============================================================================

/// A Slack message returned by the search API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message body
    pub text: String,
    /// Name of the channel the message was posted in
    pub channel: String,
}
