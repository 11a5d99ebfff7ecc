use chrono::{Local, NaiveDate};
use std::path::PathBuf;

use crate::collectors::{GitCollector, SlackCollector};
use crate::config::{self, Config};
use crate::display;
use crate::editor::{self, EditorSession};
use crate::error::{NippoError, Result};
use crate::process::{ProcessRunner, SystemRunner};
use crate::renderer::{GitSection, ReportAssembler, SectionRegistry, SlackSection};

/// Maximum Slack messages included when `--count` is not given
pub const DEFAULT_MESSAGE_COUNT: usize = 20;

/// Options of the `generate` command
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Report date as YYYY-MM-DD (defaults to today)
    pub date: Option<String>,
    /// Commit author override
    pub git_user: Option<String>,
    /// Slack user override
    pub slack_user: Option<String>,
    /// Maximum number of Slack messages
    pub count: usize,
    /// Style the printed report on color terminals
    pub pretty: bool,
}

/// Generate today's report, let the user edit it, and print the result
pub fn run(config_path: Option<PathBuf>, options: GenerateOptions) -> Result<()> {
    let config_path = config::resolve_path(config_path)?;
    let config = config::load(&config_path)?;
    let day = parse_date(options.date.as_deref())?;

    let runner = SystemRunner;
    let assembler = ReportAssembler::new(&config, sections(&config, &runner, &options)?);
    let draft = assembler.build_draft(day)?;

    let session = EditorSession::new(&runner, config.editor.as_deref(), editor::scratch_path()?);
    let report = session.run(&draft)?;

    display::print_report(&report, options.pretty);

    Ok(())
}

/// Section builders for the integrations nippo knows about
fn sections<'a>(
    config: &'a Config,
    runner: &'a dyn ProcessRunner,
    options: &GenerateOptions,
) -> Result<SectionRegistry<'a>> {
    Ok(SectionRegistry::new()
        .register(
            "git",
            GitSection::new(&config.git, GitCollector::new(runner), options.git_user.clone()),
        )
        .register(
            "slack",
            SlackSection::new(
                &config.slack,
                SlackCollector::new()?,
                options.slack_user.clone(),
                options.count,
            ),
        ))
}

/// Parse the report date (defaults to today in local time)
fn parse_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(date_str) => NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|_| NippoError::InvalidDate(date_str.to_string())),
        None => Ok(Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::fake::FakeRunner;
    use std::path::PathBuf;

    fn options() -> GenerateOptions {
        GenerateOptions {
            date: None,
            git_user: Some("Alice".to_string()),
            slack_user: None,
            count: DEFAULT_MESSAGE_COUNT,
            pretty: false,
        }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2021-04-24")).unwrap(),
            NaiveDate::from_ymd_opt(2021, 4, 24).unwrap()
        );
        assert_eq!(parse_date(None).unwrap(), Local::now().date_naive());
    }

    #[test]
    fn test_parse_invalid_date() {
        let result = parse_date(Some("24/04/2021"));
        assert!(matches!(result, Err(NippoError::InvalidDate(ref d)) if d == "24/04/2021"));
    }

    #[test]
    fn test_sections_route_git_entry_to_collector() {
        let runner = FakeRunner::with_stdout("");
        let mut config = Config::scaffold();
        config.template = vec!["notes".to_string(), "git".to_string()];
        config.git.repositories = vec![PathBuf::from("/work/api")];

        let day = NaiveDate::from_ymd_opt(2021, 4, 24).unwrap();
        let assembler = ReportAssembler::new(&config, sections(&config, &runner, &options()).unwrap());
        let draft = assembler.build_draft(day).unwrap();

        assert_eq!(draft, "# 2021-04-24\n## notes\n\n\n");
        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].1.contains(&"--author=Alice".to_string()));
    }

    #[test]
    fn test_sections_require_slack_credentials() {
        let runner = FakeRunner::with_stdout("");
        let config = Config::scaffold();

        let day = NaiveDate::from_ymd_opt(2021, 4, 24).unwrap();
        let assembler = ReportAssembler::new(&config, sections(&config, &runner, &options()).unwrap());

        let err = assembler.build_draft(day).unwrap_err();
        assert!(matches!(err, NippoError::MissingCredential { key: "slack.token" }));
    }
}
