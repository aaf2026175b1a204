//! Integration tests that run the CLI binary.

fn bin() -> std::process::Command {
    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_meson-format-check"));
    for var in [
        "INPUT_FORMAT-FILE",
        "INPUT_ONLY-GIT-FILES",
        "GITHUB_STEP_SUMMARY",
        "GITHUB_ACTIONS",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_help_succeeds_and_outputs_usage() {
    let output = bin()
        .arg("--help")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--only-git-files"));
    assert!(stdout.contains("--format-file"));
}

#[test]
fn cli_version_succeeds() {
    let output = bin()
        .arg("--version")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[cfg(target_os = "linux")]
#[test]
fn cli_missing_format_file_fails_before_writing_summary() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let summary = tmp.path().join("summary.md");
    let output = bin()
        .args(["--format-file", "does-not-exist.ini", "--output", "human"])
        .arg("--summary-file")
        .arg(&summary)
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Meson format file 'does-not-exist.ini' not found"),
        "expected format file error, got: {}",
        stderr
    );
    assert!(!summary.exists());
}

#[cfg(target_os = "linux")]
#[test]
fn cli_invalid_boolean_input_is_reported_as_workflow_error() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin()
        .env("INPUT_ONLY-GIT-FILES", "yes")
        .args(["--output", "github"])
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with("::error::Input does not meet YAML 1.2"),
        "got: {}",
        stdout
    );
}

/// Temp tree with one `meson.build` and a stub `meson` exiting with `code`.
#[cfg(target_os = "linux")]
fn stub_repo(code: i32) -> (tempfile::TempDir, std::ffi::OsString) {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::TempDir::new().expect("temp dir");
    let bin_dir = tmp.path().join("bin");
    let repo = tmp.path().join("repo");
    std::fs::create_dir_all(&bin_dir).unwrap();
    std::fs::create_dir_all(&repo).unwrap();
    std::fs::write(repo.join("meson.build"), "project('x')\n").unwrap();
    let meson = bin_dir.join("meson");
    std::fs::write(&meson, format!("#!/bin/sh\nexit {code}\n")).unwrap();
    std::fs::set_permissions(&meson, std::fs::Permissions::from_mode(0o755)).unwrap();

    let mut paths = vec![bin_dir];
    if let Some(p) = std::env::var_os("PATH") {
        paths.extend(std::env::split_paths(&p));
    }
    let path = std::env::join_paths(paths).unwrap();
    (tmp, path)
}

#[cfg(target_os = "linux")]
#[test]
fn cli_json_output_keeps_stdout_parseable() {
    let (tmp, path) = stub_repo(0);
    let output = bin()
        .env("PATH", &path)
        .args(["--output", "json"])
        .current_dir(tmp.path().join("repo"))
        .output()
        .expect("binary not found - run cargo build first");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {}", stderr);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)
        .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {}", String::from_utf8_lossy(&output.stdout)));
    assert_eq!(report["summary"]["total"], 1);
    assert_eq!(report["results"][0]["file"], "meson.build");
    assert!(report["remediation"].is_null());
    // the job summary still gets printed, just not on stdout
    assert!(stderr.contains("<h1>Result</h1>"));
}

#[cfg(target_os = "linux")]
#[test]
fn cli_json_output_reports_unformatted_files() {
    let (tmp, path) = stub_repo(1);
    let output = bin()
        .env("PATH", &path)
        .args(["--output", "json"])
        .current_dir(tmp.path().join("repo"))
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(report["summary"]["failing"], 1);
    assert_eq!(report["remediation"], "meson format -i \"meson.build\"");
}
