//! meson-format-check core library.
//!
//! Finds Meson build-description files, runs `meson format --check-only` on
//! each one and reports the files that are not formatted, both as log lines
//! and as a job summary with a ready-to-run fix command.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Input resolution and the optional config file.
//! - `discover`: git / find based file discovery.
//! - `check`: Per-file formatter invocation and the check loop.
//! - `report`: Failing-file report and remediation command.
//! - `summary`: Job summary document builder.
//! - `output`: GitHub, human and JSON output surfaces.
//! - `runner`: Subprocess execution seam.
//! - `run`: Orchestration and the run outcome.
//! - `error`: Error type shared by all stages.
pub mod check;
pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod output;
pub mod report;
pub mod run;
pub mod runner;
pub mod summary;
