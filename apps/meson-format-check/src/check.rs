//! Per-file `meson format --check-only` invocation and the sequential check
//! loop.

use crate::config::Settings;
use crate::error::Result;
use crate::output::{Annotation, Reporter};
use crate::runner::{display_command, ToolRunner};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const NOT_FORMATTED: &str = "File not formatted correctly";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub file: PathBuf,
    pub is_formatted: bool,
}

/// Arguments for a read-only conformance check of `file`.
/// Paths are passed through untouched so non-UTF-8 names reach meson intact.
pub fn check_args(file: &Path, format_file: Option<&Path>) -> Vec<OsString> {
    let mut args = vec![OsString::from("format"), OsString::from("--check-only")];
    if let Some(cfg) = format_file {
        args.push("-c".into());
        args.push(cfg.as_os_str().to_os_string());
    }
    args.push(file.as_os_str().to_os_string());
    args
}

/// Check a single file. Any non-zero exit, including meson's own internal
/// errors, counts as "not formatted"; only failing to start meson is fatal.
pub fn check_file(
    runner: &dyn ToolRunner,
    meson: &Path,
    settings: &Settings,
    file: &Path,
    reporter: &mut dyn Reporter,
) -> Result<bool> {
    let args = check_args(file, settings.format_file.as_deref());
    reporter.info(&format!("[command]{}", display_command(meson, &args)));
    let code = runner.status(meson, &args, &settings.working_dir)?;
    log::debug!("{} -> {:?}", file.display(), code);
    Ok(code == Some(0))
}

/// Check `files` one after another in the given order.
pub fn check_all(
    runner: &dyn ToolRunner,
    meson: &Path,
    settings: &Settings,
    files: &[PathBuf],
    reporter: &mut dyn Reporter,
) -> Result<Vec<CheckResult>> {
    let mut results = Vec::with_capacity(files.len());
    reporter.start_group("Check all files");
    for file in files {
        reporter.info(&format!("Checking file: '{}'", file.display()));
        let is_formatted = match check_file(runner, meson, settings, file, reporter) {
            Ok(v) => v,
            Err(e) => {
                reporter.end_group();
                return Err(e);
            }
        };
        reporter.info(if is_formatted {
            "File is formatted correctly"
        } else {
            "File has formatting errors"
        });
        reporter.info("");
        if !is_formatted {
            reporter.error(
                NOT_FORMATTED,
                Some(&Annotation {
                    file,
                    title: NOT_FORMATTED,
                }),
            );
        }
        results.push(CheckResult {
            file: file.clone(),
            is_formatted,
        });
    }
    reporter.end_group();
    Ok(results)
}

/// Files that failed the check, in check order.
pub fn failing_files(results: &[CheckResult]) -> Vec<PathBuf> {
    results
        .iter()
        .filter(|r| !r.is_formatted)
        .map(|r| r.file.clone())
        .collect()
}
