//! Markdown renderer module
//!
//! Assembles the daily report draft: a date heading followed by one section per
//! template entry, each produced by the `SectionRegistry`.

mod sections;

pub use sections::{GitSection, SectionRegistry, SlackSection};

use chrono::NaiveDate;

use crate::config::Config;
use crate::error::{NippoError, Result};

/// Builds report drafts from the configured template
pub struct ReportAssembler<'a> {
    config: &'a Config,
    sections: SectionRegistry<'a>,
}

impl<'a> ReportAssembler<'a> {
    pub fn new(config: &'a Config, sections: SectionRegistry<'a>) -> Self {
        Self { config, sections }
    }

    /// Render the draft for `day`
    pub fn build_draft(&self, day: NaiveDate) -> Result<String> {
        if self.config.template.is_empty() {
            return Err(NippoError::TemplateEmpty);
        }

        let mut output = format!("# {}\n", day.format("%Y-%m-%d"));

        for entry in &self.config.template {
            if let Some(section) = self.sections.build(entry, day)? {
                output.push_str(&section);
            } else {
                tracing::debug!(entry = %entry, "section has no content; omitted");
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::GitCollector;
    use crate::process::fake::FakeRunner;
    use chrono::{Local, TimeZone};
    use std::path::PathBuf;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 4, 24).unwrap()
    }

    fn config_with_template(entries: &[&str]) -> Config {
        Config {
            template: entries.iter().map(|s| s.to_string()).collect(),
            ..Config::default()
        }
    }

    #[test]
    fn test_empty_template() {
        let config = Config::default();
        let assembler = ReportAssembler::new(&config, SectionRegistry::new());

        let result = assembler.build_draft(day());
        assert!(matches!(result, Err(NippoError::TemplateEmpty)));
    }

    #[test]
    fn test_plain_template() {
        let config = config_with_template(&["today's work", "tomorrow's plan", "notes"]);
        let assembler = ReportAssembler::new(&config, SectionRegistry::new());

        let draft = assembler.build_draft(day()).unwrap();

        assert_eq!(
            draft,
            "# 2021-04-24\n## today's work\n\n\n## tomorrow's plan\n\n\n## notes\n\n\n"
        );
        assert_eq!(draft.lines().filter(|l| l.starts_with("## ")).count(), 3);
        assert_eq!(draft.lines().filter(|l| l.starts_with("# ")).count(), 1);
    }

    #[test]
    fn test_draft_with_git_commits() {
        let ts = Local
            .with_ymd_and_hms(2021, 4, 24, 9, 30, 0)
            .earliest()
            .unwrap()
            .timestamp();
        let stdout = format!("{ts} abc1234 Add login\n{ts} def5678 Fix logout\n");
        let runner = FakeRunner::with_stdout(&stdout);

        let mut config = config_with_template(&["notes", "git"]);
        config.git.repositories = vec![PathBuf::from("/repo")];

        let registry = SectionRegistry::new().register(
            "git",
            GitSection::new(&config.git, GitCollector::new(&runner), Some("Alice".to_string())),
        );
        let assembler = ReportAssembler::new(&config, registry);

        let draft = assembler.build_draft(day()).unwrap();
        assert_eq!(
            draft,
            "# 2021-04-24\n## notes\n\n\n## git\n### repo(2 commits)\n - abc1234 Add login\n - def5678 Fix logout\n\n"
        );
    }

    #[test]
    fn test_draft_omits_empty_git_section() {
        let runner = FakeRunner::with_stdout("");

        let mut config = config_with_template(&["git", "notes"]);
        config.git.repositories = vec![PathBuf::from("/repo")];

        let registry = SectionRegistry::new().register(
            "git",
            GitSection::new(&config.git, GitCollector::new(&runner), Some("Alice".to_string())),
        );
        let assembler = ReportAssembler::new(&config, registry);

        let draft = assembler.build_draft(day()).unwrap();
        assert_eq!(draft, "# 2021-04-24\n## notes\n\n\n");
    }
}
