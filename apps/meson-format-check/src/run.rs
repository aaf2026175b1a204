//! Top-level orchestration: platform gate, input resolution, discovery, the
//! check loop and reporting, in that order.

use crate::check::{check_all, failing_files};
use crate::config::{resolve_settings, Inputs, Settings};
use crate::discover::discover;
use crate::error::{Error, Result};
use crate::output::{print_report_json, OutputMode, Reporter};
use crate::report::{failure_summary, success_summary, RunReport};
use crate::runner::ToolRunner;
use crate::summary::Summary;

pub const SUPPORTED_OS: &str = "linux";
pub const FAILURE_MESSAGE: &str = "Some files are not formatted correctly";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    AllFormatted,
    Unformatted(RunReport),
}

pub fn ensure_supported_platform(os: &str) -> Result<()> {
    if os == SUPPORTED_OS {
        Ok(())
    } else {
        Err(Error::UnsupportedPlatform { os: os.to_string() })
    }
}

/// Gate on the platform and resolve settings. Nothing is discovered or
/// executed before this succeeds.
pub fn prepare(os: &str, inputs: &Inputs) -> Result<Settings> {
    ensure_supported_platform(os)?;
    let settings = resolve_settings(inputs)?;
    log::debug!("settings: {:?}", settings);
    Ok(settings)
}

pub fn run_on_platform(
    os: &str,
    inputs: &Inputs,
    runner: &dyn ToolRunner,
    reporter: &mut dyn Reporter,
) -> Result<Outcome> {
    let settings = prepare(os, inputs)?;
    run(&settings, runner, reporter)
}

/// Check every Meson file and write the job summary. The summary is written
/// before returning `Unformatted`, so callers only need to signal failure.
pub fn run(
    settings: &Settings,
    runner: &dyn ToolRunner,
    reporter: &mut dyn Reporter,
) -> Result<Outcome> {
    let files = discover(runner, settings)?;
    log::info!("found {} meson file(s)", files.len());
    let meson = runner.locate("meson")?;

    let results = check_all(runner, &meson, settings, &files, reporter)?;
    let failing = failing_files(&results);

    let mut summary = Summary::new();
    if failing.is_empty() {
        success_summary(&mut summary);
        summary.write(&settings.summary)?;
        if settings.output == OutputMode::Json {
            print_report_json(&results, None, &settings.working_dir);
        }
        return Ok(Outcome::AllFormatted);
    }

    let report = RunReport::new(
        &settings.working_dir,
        settings.format_file.as_deref(),
        failing,
    );
    failure_summary(&mut summary, &report);
    summary.write(&settings.summary)?;
    if settings.output == OutputMode::Json {
        print_report_json(&results, Some(&report), &settings.working_dir);
    }
    Ok(Outcome::Unformatted(report))
}
