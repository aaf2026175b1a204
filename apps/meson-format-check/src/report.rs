//! Final run report: failing files, the remediation command and the job
//! summary document for either outcome.

use crate::summary::{markdown_list, Summary};
use std::path::{Path, PathBuf};

pub const SUCCESS_LINE: &str = ":white_check_mark: All files are correctly formatted";
pub const FAILURE_LINE: &str = ":x: Some files are not formatted correctly";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Absolute paths in check order.
    pub failing: Vec<PathBuf>,
    /// Same files relative to the working directory.
    pub relative: Vec<String>,
    pub remediation: String,
}

impl RunReport {
    pub fn new(working_dir: &Path, format_file: Option<&Path>, failing: Vec<PathBuf>) -> Self {
        let relative: Vec<String> = failing
            .iter()
            .map(|f| to_relative_path(working_dir, f))
            .collect();
        let format_file = format_file.map(|f| to_relative_path(working_dir, f));
        let remediation = remediation_command(format_file.as_deref(), &relative);
        Self {
            failing,
            relative,
            remediation,
        }
    }
}

/// Express `file` relative to `working_dir`; relative inputs pass through.
pub fn to_relative_path(working_dir: &Path, file: &Path) -> String {
    if !file.is_absolute() {
        return file.to_string_lossy().into_owned();
    }
    pathdiff::diff_paths(file, working_dir)
        .unwrap_or_else(|| file.to_path_buf())
        .to_string_lossy()
        .into_owned()
}

/// `meson format [-c "<cfg>"] -i "<f1>" "<f2>" ...` with already-relative paths.
pub fn remediation_command(format_file: Option<&str>, files: &[String]) -> String {
    let mut cmd = String::from("meson format");
    if let Some(cfg) = format_file {
        cmd.push_str(&format!(" -c \"{cfg}\""));
    }
    cmd.push_str(" -i");
    for f in files {
        cmd.push_str(&format!(" \"{f}\""));
    }
    cmd
}

pub fn success_summary(summary: &mut Summary) {
    summary
        .clear()
        .add_heading("Result", 1)
        .add_raw(SUCCESS_LINE, true);
}

pub fn failure_summary(summary: &mut Summary, report: &RunReport) {
    let file_list = markdown_list(&report.relative, false);
    summary
        .clear()
        .add_heading("Result", 1)
        .add_raw(FAILURE_LINE, true)
        .add_break()
        .add_details("Affected Files", &file_list)
        .add_separator()
        .add_raw("To format the files run the following command", true)
        .add_break()
        .add_code_block(&report.remediation, Some("bash"));
}
