//! Locate Meson build-description files in the working tree.
//!
//! Two strategies are supported: ask git for tracked and ignored files, or
//! walk the tree with `find`. Both emit newline-delimited paths which are
//! resolved to absolute paths in emission order.

use crate::config::{resolve_file_path, Settings};
use crate::error::{Error, Result};
use crate::runner::{tool_name, ToolRunner};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// File names that make up a Meson build description.
pub const MESON_FILES: [&str; 3] = ["meson.build", "meson.options", "meson_options.txt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Git,
    Find,
}

impl Strategy {
    pub fn from_only_git_files(only_git_files: bool) -> Self {
        if only_git_files {
            Strategy::Git
        } else {
            Strategy::Find
        }
    }

    pub fn tool(self) -> &'static str {
        match self {
            Strategy::Git => "git",
            Strategy::Find => "find",
        }
    }

    /// Arguments passed to [`Strategy::tool`].
    pub fn args(self) -> Vec<String> {
        match self {
            Strategy::Git => {
                // `--exclude` doubles as the match pattern once `--ignored -c`
                // turns the listing into "tracked files matching these names".
                let mut args = vec!["ls-files".to_string()];
                for name in MESON_FILES {
                    args.push("--exclude".into());
                    args.push(name.into());
                }
                args.push("--ignored".into());
                args.push("-c".into());
                args
            }
            Strategy::Find => {
                let mut args = vec![".".to_string(), "(".to_string()];
                for (i, name) in MESON_FILES.iter().enumerate() {
                    if i != 0 {
                        args.push("-o".into());
                    }
                    args.push("-name".into());
                    args.push((*name).into());
                }
                args.push(")".into());
                args
            }
        }
    }
}

/// What to do with a candidate path that no longer exists on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingCandidate {
    /// Drop it and keep going.
    #[default]
    Skip,
    /// Stop accumulating; everything after the first unresolvable
    /// candidate is discarded. Enabled by `stop_on_missing = true`.
    Stop,
}

/// Discover Meson files under `settings.working_dir`.
pub fn discover(runner: &dyn ToolRunner, settings: &Settings) -> Result<Vec<PathBuf>> {
    let strategy = Strategy::from_only_git_files(settings.only_git_files);
    log::debug!("discovering meson files with {:?}", strategy);
    let args: Vec<OsString> = strategy.args().into_iter().map(OsString::from).collect();
    let lines = exec_and_get_stdout(runner, strategy.tool(), &args, &settings.working_dir)?;
    Ok(resolve_candidates(
        &settings.working_dir,
        &lines,
        settings.missing,
    ))
}

/// Run `tool` and return its stdout split into non-empty lines.
///
/// Discovery is all-or-nothing: a missing tool, a non-zero exit or any
/// stderr output after a clean exit fails the whole run.
pub fn exec_and_get_stdout(
    runner: &dyn ToolRunner,
    tool: &str,
    args: &[OsString],
    cwd: &Path,
) -> Result<Vec<String>> {
    let program = runner.locate(tool)?;
    let out = runner.capture(&program, args, cwd)?;
    let name = tool_name(&program);
    match out.code {
        Some(0) => {}
        // -1 stands in for termination by signal
        code => {
            log::debug!("{name} stderr: {}", out.stderr.trim_end());
            return Err(Error::ToolExit {
                tool: name,
                code: code.unwrap_or(-1),
            });
        }
    }
    if !out.stderr.is_empty() {
        return Err(Error::ToolStderr {
            tool: name,
            stderr: out.stderr.trim_end().to_string(),
        });
    }
    Ok(split_lines(&out.stdout))
}

pub fn split_lines(stdout: &str) -> Vec<String> {
    stdout
        .split('\n')
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve candidates to absolute paths, honouring `missing`.
pub fn resolve_candidates(cwd: &Path, lines: &[String], missing: MissingCandidate) -> Vec<PathBuf> {
    let mut files = Vec::with_capacity(lines.len());
    for line in lines {
        match resolve_file_path(cwd, line) {
            Some(p) => files.push(p),
            None => {
                log::warn!("skipping '{}': not found under {}", line, cwd.display());
                if missing == MissingCandidate::Stop {
                    break;
                }
            }
        }
    }
    files
}
