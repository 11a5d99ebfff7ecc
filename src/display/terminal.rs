//! TTY detection and color support logic

use std::io::IsTerminal;

/// Determine if the finished report should be rendered with colors
pub fn should_use_colors() -> bool {
    colors_enabled(|key| std::env::var(key).ok(), std::io::stdout().is_terminal())
}

/// Color decision from environment values and whether stdout is a TTY
///
/// `NO_COLOR` wins, then `CLICOLOR_FORCE`, then `CLICOLOR=0`, then the TTY check.
fn colors_enabled<F>(env: F, stdout_is_tty: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if env("NO_COLOR").is_some() {
        return false;
    }

    if env("CLICOLOR_FORCE").is_some_and(|val| val != "0") {
        return true;
    }

    if env("CLICOLOR").is_some_and(|val| val == "0") {
        return false;
    }

    stdout_is_tty
}
