//! External process execution
//!
//! Git and the editor are reached through `ProcessRunner` so tests can
//! substitute a recording fake instead of spawning real programs.

use std::io;
use std::process::{Command, Stdio};

/// Exit status of a finished process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl Status {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Captured result of a non-interactive process
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: Status,
    pub stdout: String,
    pub stderr: String,
}

/// Runs external programs
pub trait ProcessRunner {
    /// Run a program to completion, capturing its output
    fn output(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;

    /// Run a program attached to the current terminal and wait for it to exit
    fn interactive(&self, program: &str, args: &[String]) -> io::Result<Status>;
}

/// Runner backed by `std::process::Command`
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn output(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        tracing::debug!(program, ?args, "running command");

        let output = Command::new(program).args(args).output()?;

        Ok(CommandOutput {
            status: Status {
                code: output.status.code(),
            },
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn interactive(&self, program: &str, args: &[String]) -> io::Result<Status> {
        tracing::debug!(program, ?args, "launching interactive command");

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        Ok(Status {
            code: status.code(),
        })
    }
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use std::cell::RefCell;

    type InteractiveHook = Box<dyn Fn(&[String]) -> io::Result<Status>>;

    /// Recording runner that never spawns anything
    pub struct FakeRunner {
        pub calls: RefCell<Vec<(String, Vec<String>)>>,
        stdout: String,
        stderr: String,
        code: Option<i32>,
        on_interactive: Option<InteractiveHook>,
    }

    impl FakeRunner {
        /// Runner whose captured commands succeed with `stdout`
        pub fn with_stdout(stdout: &str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                stdout: stdout.to_string(),
                stderr: String::new(),
                code: Some(0),
                on_interactive: None,
            }
        }

        /// Runner whose captured commands fail with `stderr`
        pub fn failing(code: i32, stderr: &str) -> Self {
            Self {
                code: Some(code),
                stderr: stderr.to_string(),
                ..Self::with_stdout("")
            }
        }

        /// Runner that calls `hook` in place of an interactive program
        pub fn interactive<F>(hook: F) -> Self
        where
            F: Fn(&[String]) -> io::Result<Status> + 'static,
        {
            Self {
                on_interactive: Some(Box::new(hook)),
                ..Self::with_stdout("")
            }
        }

        fn record(&self, program: &str, args: &[String]) {
            self.calls
                .borrow_mut()
                .push((program.to_string(), args.to_vec()));
        }
    }

    impl ProcessRunner for FakeRunner {
        fn output(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
            self.record(program, args);
            Ok(CommandOutput {
                status: Status { code: self.code },
                stdout: self.stdout.clone(),
                stderr: self.stderr.clone(),
            })
        }

        fn interactive(&self, program: &str, args: &[String]) -> io::Result<Status> {
            self.record(program, args);
            match &self.on_interactive {
                Some(hook) => hook(args),
                None => Ok(Status { code: self.code }),
            }
        }
    }
}
