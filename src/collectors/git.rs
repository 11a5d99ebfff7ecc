use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use std::path::Path;

use crate::error::{NippoError, Result};
use crate::models::{Commit, CommitSummary};
use crate::process::ProcessRunner;

const LOG_FORMAT: &str = "--format=%ct %h %s";

/// Git collector listing one author's commits for a day
pub struct GitCollector<'a> {
    runner: &'a dyn ProcessRunner,
}

impl<'a> GitCollector<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self { runner }
    }

    /// Collect commits by `author` in `repo` within `[day 00:00, day+1 00:00)` local time
    pub fn fetch_commits(&self, repo: &Path, author: &str, day: NaiveDate) -> Result<CommitSummary> {
        let next_day = next_day(day);
        let (start, end) = (local_midnight(day), local_midnight(next_day));

        let args = vec![
            "-C".to_string(),
            repo.to_string_lossy().into_owned(),
            "log".to_string(),
            format!("--author={}", author),
            format!("--since={} 00:00:00", day.format("%Y-%m-%d")),
            format!("--until={} 00:00:00", next_day.format("%Y-%m-%d")),
            "--branches".to_string(),
            LOG_FORMAT.to_string(),
        ];

        let output = self
            .runner
            .output("git", &args)
            .map_err(|e| NippoError::CommitFetchFailed {
                repo: repo.to_path_buf(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(NippoError::CommitFetchFailed {
                repo: repo.to_path_buf(),
                reason: output.stderr.trim().to_string(),
            });
        }

        // git's --until is inclusive, so the upper bound is enforced here
        let commits: Vec<Commit> = output
            .stdout
            .lines()
            .filter_map(Commit::parse_log_line)
            .filter(|c| c.timestamp >= start && c.timestamp < end)
            .collect();

        tracing::debug!(repo = %repo.display(), count = commits.len(), "collected commits");

        Ok(CommitSummary::from_commits(&commits))
    }
}

/// Resolve the committer name git would use inside `repo`
///
/// Repository-local configuration wins over the user's global configuration.
pub fn resolve_author(repo: &Path) -> Result<String> {
    let config = git2::Repository::open(repo)
        .and_then(|r| r.config())
        .or_else(|_| git2::Config::open_default())
        .map_err(|e| NippoError::CommitFetchFailed {
            repo: repo.to_path_buf(),
            reason: format!("cannot read git configuration: {}", e.message()),
        })?;

    match config.get_string("user.name") {
        Ok(name) if !name.trim().is_empty() => Ok(name.trim().to_string()),
        _ => Err(NippoError::CommitFetchFailed {
            repo: repo.to_path_buf(),
            reason: "git user.name is not configured; pass --gituser or run 'git config --global user.name <name>'".to_string(),
        }),
    }
}

fn next_day(day: NaiveDate) -> NaiveDate {
    day.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX)
}

/// Start of `day` in local time, as UTC
fn local_midnight(day: NaiveDate) -> DateTime<Utc> {
    let naive = day.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}
