//! Terminal display module
//!
//! Prints the finished report, with optional rich formatting on color terminals.

mod formatter;
mod terminal;

pub use formatter::print_report;
