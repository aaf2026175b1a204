//! Error type shared by every stage of a run.
//!
//! Fatal conditions are variants here and bubble up with `?` to the single
//! boundary in `main`. A file that fails the format check is not an error; it
//! is recorded in the run outcome instead.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Action atm only supported on linux: but are on: {os}")]
    UnsupportedPlatform { os: String },

    #[error(
        "Meson format file '{raw}' not found, please specify a valid file, current working directory, that was used to resolve this path was: {}",
        .cwd.display()
    )]
    FormatFileNotFound { raw: String, cwd: PathBuf },

    #[error(
        "Input does not meet YAML 1.2 \"Core Schema\" specification: {name}\nSupport boolean input list: `true | True | TRUE | false | False | FALSE`"
    )]
    InvalidBooleanInput { name: String, value: String },

    #[error("unknown output mode '{0}' (expected human|github|json)")]
    InvalidOutputMode(String),

    #[error("failed to parse {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unable to locate executable file: {tool}. Please verify either the file path exists or the file can be found within a directory specified by the PATH environment variable.")]
    ToolNotFound { tool: String },

    #[error("{tool} exited with exit code {code}")]
    ToolExit { tool: String, code: i32 },

    #[error("{tool} wrote to stderr: {stderr}")]
    ToolStderr { tool: String, stderr: String },

    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write job summary to {}: {source}", .path.display())]
    Summary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
