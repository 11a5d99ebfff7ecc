//! Command-line interface module
//!
//! Implements the CLI commands:
//! - init: Scaffold the configuration file
//! - generate: Build, edit and print the daily report
pub mod generate;
pub mod init;
