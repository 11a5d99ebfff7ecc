//! Interactive editing of the report draft
//!
//! The draft lives in a scratch file in the home directory while the editor runs.
//! An existing scratch file is an unfinished earlier draft and is never overwritten.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::error::{NippoError, Result};
use crate::process::ProcessRunner;

/// File name of the scratch file inside the home directory
pub const SCRATCH_FILE_NAME: &str = "NIPPO_EDITMSG";

/// Editor used when neither `EDITOR` nor the `editor` key is set
pub const DEFAULT_EDITOR: &str = "vim";

/// Path of the scratch file, `$HOME/NIPPO_EDITMSG`
pub fn scratch_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(SCRATCH_FILE_NAME))
        .ok_or(NippoError::HomeDirUnavailable)
}

/// One edit of the draft in an external editor
pub struct EditorSession<'a> {
    runner: &'a dyn ProcessRunner,
    editor: String,
    scratch: PathBuf,
}

impl<'a> EditorSession<'a> {
    /// `editor` is a command line such as `vim` or `code --wait`
    pub fn new(runner: &'a dyn ProcessRunner, editor: Option<&str>, scratch: PathBuf) -> Self {
        let editor = editor
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_EDITOR)
            .to_string();

        Self {
            runner,
            editor,
            scratch,
        }
    }

    /// Let the user edit `initial` and return the final content
    ///
    /// The scratch file is removed afterwards, whether or not editing succeeded.
    pub fn run(&self, initial: &str) -> Result<String> {
        self.prepare(initial)?;

        let result = self.launch().and_then(|_| self.read_back());
        self.cleanup();

        result
    }

    fn prepare(&self, initial: &str) -> Result<()> {
        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.scratch)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::warn!(
                    path = %self.scratch.display(),
                    "found an unfinished draft; opening it instead of a new one"
                );
                return Ok(());
            }
            Err(source) => return Err(self.scratch_error(source)),
        };

        self.fill(file, initial)
    }

    /// Write the fresh draft, removing the scratch file again if that fails
    fn fill<W: Write>(&self, mut file: W, initial: &str) -> Result<()> {
        let written = file.write_all(initial.as_bytes()).and_then(|_| file.flush());
        drop(file);

        written.map_err(|source| {
            self.cleanup();
            self.scratch_error(source)
        })
    }

    fn launch(&self) -> Result<()> {
        let mut words = self.editor.split_whitespace();
        let program = words.next().unwrap_or(DEFAULT_EDITOR);
        let mut args: Vec<String> = words.map(String::from).collect();
        args.push(self.scratch.to_string_lossy().into_owned());

        let status = self
            .runner
            .interactive(program, &args)
            .map_err(|e| self.launch_error(e.to_string()))?;

        if !status.success() {
            let reason = match status.code {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by a signal".to_string(),
            };
            return Err(self.launch_error(reason));
        }

        Ok(())
    }

    fn read_back(&self) -> Result<String> {
        fs::read_to_string(&self.scratch).map_err(|source| self.scratch_error(source))
    }

    fn cleanup(&self) {
        if let Err(e) = fs::remove_file(&self.scratch) {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!(path = %self.scratch.display(), error = %e, "could not delete scratch file");
            }
        }
    }

    fn scratch_error(&self, source: std::io::Error) -> NippoError {
        NippoError::ScratchFileIo {
            path: self.scratch.clone(),
            source,
        }
    }

    fn launch_error(&self, reason: String) -> NippoError {
        NippoError::EditorLaunchFailed {
            editor: self.editor.clone(),
            reason,
        }
    }
}
