//! Input discovery and effective settings resolution.
//!
//! Inputs come from CLI flags, which fall back to the GitHub Actions
//! `INPUT_*` environment variables, and then from an optional
//! `meson-format-check.toml|yaml|yml` in the working directory.
//! Defaults:
//! - `format_file`: empty (meson picks its own configuration)
//! - `only_git_files`: false
//! - `output`: `github` inside Actions, `human` elsewhere
//! - `stop_on_missing`: false (skip discovered paths that no longer exist)
//!
//! Overrides precedence: CLI/env > config file > defaults.

use crate::discover::MissingCandidate;
use crate::error::{Error, Result};
use crate::output::OutputMode;
use crate::summary::SummaryTarget;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const CONFIG_FILES: [&str; 3] = [
    "meson-format-check.toml",
    "meson-format-check.yaml",
    "meson-format-check.yml",
];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `meson-format-check.toml|yaml`.
pub struct FileConfig {
    #[serde(alias = "format-file")]
    pub format_file: Option<String>,
    #[serde(alias = "only-git-files")]
    pub only_git_files: Option<bool>,
    pub output: Option<String>,
    /// Stop discovery at the first path that cannot be resolved instead of
    /// skipping it.
    #[serde(alias = "stop-on-missing")]
    pub stop_on_missing: Option<bool>,
}

#[derive(Debug, Clone, Default)]
/// Raw, unvalidated inputs as handed over by the CLI layer.
pub struct Inputs {
    pub repo_root: Option<String>,
    pub format_file: Option<String>,
    pub only_git_files: Option<String>,
    pub output: Option<OutputMode>,
    pub summary_file: Option<String>,
    /// Running inside GitHub Actions (`GITHUB_ACTIONS=true`).
    pub in_actions: bool,
}

impl Inputs {
    /// Output mode known before the config file is read; used to report
    /// errors raised while resolving settings.
    pub fn preliminary_output(&self) -> OutputMode {
        self.output.unwrap_or_else(|| environment_output(self.in_actions))
    }
}

fn environment_output(in_actions: bool) -> OutputMode {
    if in_actions {
        OutputMode::Github
    } else {
        OutputMode::Human
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved settings, passed by reference into every stage.
pub struct Settings {
    pub working_dir: PathBuf,
    pub format_file: Option<PathBuf>,
    pub only_git_files: bool,
    pub output: OutputMode,
    pub summary: SummaryTarget,
    pub missing: MissingCandidate,
}

/// Load `FileConfig` from the first config file present in `root`.
///
/// A file that exists but does not parse is an error rather than being
/// silently ignored.
pub fn load_config(root: &Path) -> Result<Option<FileConfig>> {
    for name in CONFIG_FILES {
        let p = root.join(name);
        if !p.is_file() {
            continue;
        }
        let s = fs::read_to_string(&p)?;
        let parsed = if name.ends_with(".toml") {
            toml::from_str::<FileConfig>(&s).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<FileConfig>(&s).map_err(|e| e.to_string())
        };
        return match parsed {
            Ok(cfg) => {
                log::debug!("loaded config from {}", p.display());
                Ok(Some(cfg))
            }
            Err(message) => Err(Error::ConfigParse { path: p, message }),
        };
    }
    Ok(None)
}

/// Resolve `Settings` by merging inputs, the discovered config file, and
/// defaults. Fails when the format file does not exist.
pub fn resolve_settings(inputs: &Inputs) -> Result<Settings> {
    let working_dir = match inputs.repo_root.as_deref().filter(|s| !s.is_empty()) {
        Some(r) if Path::new(r).is_absolute() => normalize(Path::new(r)),
        Some(r) => normalize(&env::current_dir()?.join(r)),
        None => normalize(&env::current_dir()?),
    };
    let cfg = load_config(&working_dir)?.unwrap_or_default();

    let format_raw = non_empty(inputs.format_file.as_deref())
        .map(str::to_string)
        .or_else(|| cfg.format_file.filter(|s| !s.is_empty()))
        .unwrap_or_default();

    let only_git_files = match non_empty(inputs.only_git_files.as_deref()) {
        Some(v) => parse_bool_input("only-git-files", v)?,
        None => cfg.only_git_files.unwrap_or(false),
    };

    let format_file = if format_raw.is_empty() {
        None
    } else {
        match resolve_file_path(&working_dir, &format_raw) {
            Some(p) => Some(p),
            None => {
                return Err(Error::FormatFileNotFound {
                    raw: format_raw,
                    cwd: working_dir,
                })
            }
        }
    };

    let output = match (inputs.output, non_empty(cfg.output.as_deref())) {
        (Some(mode), _) => mode,
        (None, Some(v)) => parse_output_mode(v)?,
        (None, None) => environment_output(inputs.in_actions),
    };

    // stdout belongs to the JSON report in json mode
    let summary = match non_empty(inputs.summary_file.as_deref()) {
        Some(p) => SummaryTarget::File(PathBuf::from(p)),
        None if output == OutputMode::Json => SummaryTarget::Stderr,
        None => SummaryTarget::Stdout,
    };

    let missing = if cfg.stop_on_missing.unwrap_or(false) {
        MissingCandidate::Stop
    } else {
        MissingCandidate::Skip
    };

    Ok(Settings {
        working_dir,
        format_file,
        only_git_files,
        output,
        summary,
        missing,
    })
}

/// Parse a boolean input using the YAML 1.2 core schema spellings.
pub fn parse_bool_input(name: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        _ => Err(Error::InvalidBooleanInput {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

pub fn parse_output_mode(value: &str) -> Result<OutputMode> {
    <OutputMode as clap::ValueEnum>::from_str(value, true)
        .map_err(|_| Error::InvalidOutputMode(value.to_string()))
}

/// Resolve `file` against `cwd` and return it only if it exists on disk.
pub fn resolve_file_path(cwd: &Path, file: &str) -> Option<PathBuf> {
    let p = Path::new(file);
    let abs = if p.is_absolute() {
        normalize(p)
    } else {
        normalize(&cwd.join(p))
    };
    if abs.exists() {
        Some(abs)
    } else {
        None
    }
}

/// Lexically collapse `.` and `..` components without touching the disk.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for c in path.components() {
        match c {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(c);
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}
