//! Subprocess execution behind a small trait so discovery and checks can be
//! driven by a fake in tests.
//!
//! Every call blocks until the child exits. There is no timeout; a hung tool
//! hangs the run.

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Captured result of a finished tool invocation.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Exit code, `None` when the child was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

pub trait ToolRunner {
    /// Resolve `tool` on `PATH`, failing with `ToolNotFound` when absent.
    fn locate(&self, tool: &str) -> Result<PathBuf>;

    /// Run to completion and capture both streams.
    fn capture(&self, program: &Path, args: &[OsString], cwd: &Path) -> Result<ToolOutput>;

    /// Run to completion with the tool's own output forwarded to our stderr.
    fn status(&self, program: &Path, args: &[OsString], cwd: &Path) -> Result<Option<i32>>;
}

/// Runs real processes.
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn locate(&self, tool: &str) -> Result<PathBuf> {
        which::which(tool).map_err(|e| {
            log::debug!("which {tool}: {e}");
            Error::ToolNotFound {
                tool: tool.to_string(),
            }
        })
    }

    fn capture(&self, program: &Path, args: &[OsString], cwd: &Path) -> Result<ToolOutput> {
        log::debug!("capture: {}", display_command(program, args));
        let out = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::Spawn {
                tool: tool_name(program),
                source,
            })?;
        Ok(ToolOutput {
            code: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }

    fn status(&self, program: &Path, args: &[OsString], cwd: &Path) -> Result<Option<i32>> {
        log::debug!("status: {}", display_command(program, args));
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::from(std::io::stderr()))
            .status()
            .map_err(|source| Error::Spawn {
                tool: tool_name(program),
                source,
            })?;
        Ok(status.code())
    }
}

/// Render a command line the way CI logs echo it.
pub fn display_command(program: &Path, args: &[OsString]) -> String {
    let mut line = program.to_string_lossy().into_owned();
    for a in args {
        line.push(' ');
        line.push_str(&a.to_string_lossy());
    }
    line
}

/// Short name of a program path, used in error messages.
pub fn tool_name(program: &Path) -> String {
    program
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.to_string_lossy().into_owned())
}
