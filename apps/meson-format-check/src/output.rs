//! Output surfaces for a check run.
//!
//! Supports `github` (workflow commands, the default inside Actions),
//! `human` (colored, default elsewhere) and `json` (human log on stderr plus
//! a machine-readable report on stdout).

use crate::check::CheckResult;
use crate::report::RunReport;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputMode {
    #[default]
    Human,
    Github,
    Json,
}

/// File annotation attached to an error line.
pub struct Annotation<'a> {
    pub file: &'a Path,
    pub title: &'a str,
}

/// Logging surface used while checking and on the final failure signal.
pub trait Reporter {
    fn start_group(&mut self, name: &str);
    fn end_group(&mut self);
    fn info(&mut self, message: &str);
    fn error(&mut self, message: &str, annotation: Option<&Annotation<'_>>);
    /// Terminal failure message for the whole run.
    fn set_failed(&mut self, message: &str);
}

/// Build the reporter for `mode`, writing to the process streams.
pub fn reporter_for(mode: OutputMode) -> Box<dyn Reporter> {
    match mode {
        OutputMode::Github => Box::new(GithubReporter::new(io::stdout())),
        OutputMode::Human => Box::new(HumanReporter::new(io::stdout(), io::stderr(), use_colors())),
        OutputMode::Json => Box::new(HumanReporter::new(io::stderr(), io::stderr(), use_colors())),
    }
}

fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Emits Actions workflow commands.
pub struct GithubReporter<W: Write> {
    out: W,
}

impl<W: Write> GithubReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn command(&mut self, name: &str, props: &[(&str, String)], message: &str) {
        let mut line = format!("::{name}");
        if !props.is_empty() {
            line.push(' ');
            let joined: Vec<String> = props
                .iter()
                .map(|(k, v)| format!("{k}={}", escape_property(v)))
                .collect();
            line.push_str(&joined.join(","));
        }
        line.push_str("::");
        line.push_str(&escape_data(message));
        let _ = writeln!(self.out, "{line}");
    }
}

impl<W: Write> Reporter for GithubReporter<W> {
    fn start_group(&mut self, name: &str) {
        self.command("group", &[], name);
    }

    fn end_group(&mut self) {
        self.command("endgroup", &[], "");
    }

    fn info(&mut self, message: &str) {
        let _ = writeln!(self.out, "{message}");
    }

    fn error(&mut self, message: &str, annotation: Option<&Annotation<'_>>) {
        let props = annotation
            .map(|a| {
                vec![
                    ("file", a.file.to_string_lossy().into_owned()),
                    ("title", a.title.to_string()),
                ]
            })
            .unwrap_or_default();
        self.command("error", &props, message);
    }

    fn set_failed(&mut self, message: &str) {
        self.command("error", &[], message);
    }
}

/// Escape a workflow command message.
pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

/// Escape a workflow command property value.
pub fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

/// Plain terminal output with optional colors.
pub struct HumanReporter<O: Write, E: Write> {
    out: O,
    err: E,
    color: bool,
}

impl<O: Write, E: Write> HumanReporter<O, E> {
    pub fn new(out: O, err: E, color: bool) -> Self {
        Self { out, err, color }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> Reporter for HumanReporter<O, E> {
    fn start_group(&mut self, name: &str) {
        if self.color {
            let _ = writeln!(self.out, "{} {}", "▸".cyan(), name.bold());
        } else {
            let _ = writeln!(self.out, "▸ {name}");
        }
    }

    fn end_group(&mut self) {}

    fn info(&mut self, message: &str) {
        let _ = writeln!(self.out, "{message}");
    }

    fn error(&mut self, message: &str, annotation: Option<&Annotation<'_>>) {
        let sev = if self.color {
            "⟦error⟧".red().bold().to_string()
        } else {
            "⟦error⟧".to_string()
        };
        match annotation {
            Some(a) => {
                let file = a.file.to_string_lossy();
                let file = if self.color {
                    file.bold().to_string()
                } else {
                    file.into_owned()
                };
                let _ = writeln!(self.err, "✖ {sev} {file} — {message}");
            }
            None => {
                let _ = writeln!(self.err, "✖ {sev} {message}");
            }
        }
    }

    fn set_failed(&mut self, message: &str) {
        self.error(message, None);
    }
}

/// Compose the JSON report (pure) for testing/snapshot purposes.
pub fn compose_report_json(
    results: &[CheckResult],
    report: Option<&RunReport>,
    working_dir: &Path,
) -> JsonVal {
    let items: Vec<_> = results
        .iter()
        .map(|r| {
            json!({
                "file": crate::report::to_relative_path(working_dir, &r.file),
                "formatted": r.is_formatted,
            })
        })
        .collect();
    let summary = json!({
        "failing": results.iter().filter(|r| !r.is_formatted).count(),
        "total": results.len(),
    });
    json!({
        "results": items,
        "summary": summary,
        "remediation": report.map(|r| r.remediation.clone()),
    })
}

/// Print the JSON report to stdout.
pub fn print_report_json(results: &[CheckResult], report: Option<&RunReport>, working_dir: &Path) {
    let out = compose_report_json(results, report, working_dir);
    match serde_json::to_string_pretty(&out) {
        Ok(s) => println!("{s}"),
        Err(e) => log::error!("failed to serialize report: {e}"),
    }
}
