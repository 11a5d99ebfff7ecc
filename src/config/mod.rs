//! Configuration module
//!
//! Handles locating, loading and scaffolding the `.nippo.yaml` configuration file.
//! Values from the file can be overridden by environment variables named after the
//! key path (`SLACK_TOKEN`, `GIT_REPOSITORIES`, ...).

mod types;

pub use types::{Config, GitConfig, SlackConfig};

use crate::error::{NippoError, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// File name of the configuration inside the home directory
pub const CONFIG_FILE_NAME: &str = ".nippo.yaml";

/// Resolve the configuration path: the explicit flag wins, then `$HOME/.nippo.yaml`
pub fn resolve_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .ok_or(NippoError::HomeDirUnavailable),
    }
}

/// Load configuration from a YAML file and apply environment overrides
pub fn load(path: &Path) -> Result<Config> {
    let mut config = read(path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Read configuration from a YAML file without consulting the environment
pub fn read(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            NippoError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            NippoError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|source| NippoError::ConfigInvalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Override configuration values from environment-style variables
///
/// Keys are the uppercased key paths with `.` replaced by `_`. List values are
/// comma-separated. Unset or blank variables leave the file value untouched.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(value) = get("TEMPLATE") {
        config.template = split_list(&value);
    }
    if let Some(value) = get("GIT_HEADING") {
        config.git.heading = Some(value);
    }
    if let Some(value) = get("GIT_REPOSITORIES") {
        config.git.repositories = split_list(&value).into_iter().map(PathBuf::from).collect();
    }
    if let Some(value) = get("SLACK_TOKEN") {
        config.slack.token = value;
    }
    if let Some(value) = get("SLACK_USERNAME") {
        config.slack.username = value;
    }
    if let Some(value) = get("EDITOR") {
        config.editor = Some(value);
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Write configuration to a new file
///
/// Fails with `AlreadyExists` when the path is taken. A partially written file is
/// removed before the error is returned.
pub fn create_new(config: &Config, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(config)?;

    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;

    let written = file.write_all(yaml.as_bytes()).and_then(|_| file.sync_all());
    drop(file);

    if let Err(e) = written {
        if let Err(remove_err) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %remove_err, "could not remove partial config file");
        }
        return Err(e.into());
    }

    Ok(())
}
