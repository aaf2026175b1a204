//! CLI argument parsing via `clap`.
//!
//! Every input also reads the environment variable GitHub Actions sets for
//! it, so the binary can run as an action step without extra wiring.

use crate::config::Inputs;
use crate::output::OutputMode;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "meson-format-check",
    version,
    about = "Check that Meson build files are formatted with `meson format`",
    long_about = "Find meson.build, meson.options and meson_options.txt files, run `meson format --check-only` on each and report the files that need formatting.\n\nConfiguration precedence: CLI/env > meson-format-check.toml > defaults.",
    after_help = "Examples:\n  meson-format-check\n  meson-format-check --only-git-files --format-file meson.format\n  meson-format-check --output json --summary-file summary.md"
)]
/// Top-level CLI options.
pub struct Cli {
    #[arg(
        long,
        env = "INPUT_FORMAT-FILE",
        help = "Path to a meson format configuration file, passed as `-c <path>`"
    )]
    pub format_file: Option<String>,
    #[arg(
        long,
        env = "INPUT_ONLY-GIT-FILES",
        num_args = 0..=1,
        default_missing_value = "true",
        value_name = "BOOL",
        help = "Only check files git knows about (tracked or ignored) instead of walking the tree"
    )]
    pub only_git_files: Option<String>,
    #[arg(long, help = "Working directory used for discovery and path resolution (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(long, value_enum, help = "Output mode (default: config file, else github inside Actions, human otherwise)")]
    pub output: Option<OutputMode>,
    #[arg(
        long,
        env = "GITHUB_STEP_SUMMARY",
        help = "File receiving the job summary (default: print to stdout)"
    )]
    pub summary_file: Option<String>,
    #[arg(long, default_value = "warn", help = "Diagnostic log filter, overridden by RUST_LOG")]
    pub log_level: String,
}

impl Cli {
    /// Collapse parsed flags into raw inputs. `in_actions` picks the default
    /// output mode when neither `--output` nor the config file sets one.
    pub fn into_inputs(self, in_actions: bool) -> Inputs {
        Inputs {
            repo_root: self.repo_root,
            format_file: self.format_file,
            only_git_files: self.only_git_files,
            output: self.output,
            summary_file: self.summary_file,
            in_actions,
        }
    }
}
