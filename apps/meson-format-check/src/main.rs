//! meson-format-check binary entry point.
//! Parses inputs, runs the check and turns the outcome into an exit status.

use clap::Parser;
use meson_format_check::cli::Cli;
use meson_format_check::output::reporter_for;
use meson_format_check::run::{prepare, run, Outcome, FAILURE_MESSAGE};
use meson_format_check::runner::SystemRunner;
use std::process::ExitCode;

fn init_logger(level: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(&cli.log_level);
    let in_actions = std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true");
    let inputs = cli.into_inputs(in_actions);

    let settings = match prepare(std::env::consts::OS, &inputs) {
        Ok(s) => s,
        Err(e) => {
            log::debug!("setup failed: {e:?}");
            reporter_for(inputs.preliminary_output()).set_failed(&e.to_string());
            return ExitCode::FAILURE;
        }
    };
    let mut reporter = reporter_for(settings.output);

    match run(&settings, &SystemRunner, reporter.as_mut()) {
        Ok(Outcome::AllFormatted) => ExitCode::SUCCESS,
        Ok(Outcome::Unformatted(report)) => {
            log::debug!("{} file(s) not formatted", report.failing.len());
            reporter.set_failed(FAILURE_MESSAGE);
            ExitCode::FAILURE
        }
        Err(e) => {
            log::debug!("run failed: {e:?}");
            reporter.set_failed(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
