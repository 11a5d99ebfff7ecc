mod cli;
mod collectors;
mod config;
mod display;
mod editor;
mod error;
mod models;
mod process;
mod renderer;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::cli::generate::{GenerateOptions, DEFAULT_MESSAGE_COUNT};

#[derive(Parser)]
#[command(name = "nippo")]
#[command(version, about = "Generate a daily report (nippo) and finish it in your editor", long_about = None)]
struct Cli {
    /// Config file (default is $HOME/.nippo.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the nippo config file
    Init,
    /// Generate a nippo
    Generate {
        /// Report date like 2021-04-24 (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Git author to collect commits for (defaults to git's user.name)
        #[arg(short, long)]
        gituser: Option<String>,

        /// Slack user to search messages for (defaults to slack.username)
        #[arg(short, long)]
        slackuser: Option<String>,

        /// Maximum number of Slack messages to include
        #[arg(short, long, default_value_t = DEFAULT_MESSAGE_COUNT)]
        count: usize,

        /// Style the printed report with colors instead of printing it verbatim
        #[arg(long)]
        pretty: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("NIPPO_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init => cli::init::run(cli.config),
        Commands::Generate {
            date,
            gituser,
            slackuser,
            count,
            pretty,
        } => cli::generate::run(
            cli.config,
            GenerateOptions {
                date,
                git_user: gituser,
                slack_user: slackuser,
                count,
                pretty,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
