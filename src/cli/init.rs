use crate::config::{self, Config};
use crate::error::{NippoError, Result};
use std::io::ErrorKind;
use std::path::PathBuf;

/// Write the default `.nippo.yaml` unless a configuration already exists
pub fn run(config_path: Option<PathBuf>) -> Result<()> {
    let config_path = config::resolve_path(config_path)?;

    if config_path.exists() {
        println!(
            "nippo config is already initialized: {}",
            config_path.display()
        );
        return Ok(());
    }

    match config::create_new(&Config::scaffold(), &config_path) {
        Ok(()) => {}
        // Created by someone else between the check and the write
        Err(NippoError::Io(e)) if e.kind() == ErrorKind::AlreadyExists => {
            println!(
                "nippo config is already initialized: {}",
                config_path.display()
            );
            return Ok(());
        }
        Err(e) => return Err(e),
    }

    println!("Initialized nippo config at {}", config_path.display());
    println!("\nNext steps:");
    println!(
        "1. Edit {} to list your git repositories and Slack credentials",
        config_path.display()
    );
    println!("2. Run 'nippo generate' to write today's report");

    Ok(())
}
