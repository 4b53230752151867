use crate::common::{fixture, ripfile_command};

#[test]
fn quiet_suppresses_output() {
    let mut cmd = ripfile_command();
    cmd.arg("--quiet").arg("--pipfile").arg(fixture("minimal")).arg("hash");

    let output = cmd.output().expect("Failed to execute ripfile");

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn quiet_still_reports_errors() {
    let mut cmd = ripfile_command();
    cmd.args(["--quiet", "--pipfile", "/nonexistent/Pipfile", "parse"]);

    let output = cmd.output().expect("Failed to execute ripfile");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr.contains("error"),
        "Expected an error with --quiet, got: {stderr}"
    );
}

#[test]
fn verbose_logs_discovery() {
    let dir = tempfile::TempDir::new().unwrap();
    fs_err::copy(fixture("minimal"), dir.path().join("Pipfile")).unwrap();

    let mut cmd = ripfile_command();
    cmd.current_dir(dir.path()).args(["-v", "find"]);

    let output = cmd.output().expect("Failed to execute ripfile");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0));
    assert!(
        stderr.contains("Found Pipfile"),
        "Expected discovery log with -v, got: {stderr}"
    );
}

#[test]
fn default_verbosity_is_silent() {
    let mut cmd = ripfile_command();
    cmd.arg("--pipfile").arg(fixture("minimal")).arg("hash");

    let output = cmd.output().expect("Failed to execute ripfile");

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stderr.is_empty());
}

#[test]
fn log_filter_env_overrides_verbosity() {
    let mut cmd = ripfile_command();
    cmd.env("RIPFILE_LOG", "ripfile=debug")
        .arg("--pipfile")
        .arg(fixture("minimal"))
        .arg("hash");

    let output = cmd.output().expect("Failed to execute ripfile");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0));
    assert!(
        stderr.contains("Reading Pipfile"),
        "Expected debug logs from RIPFILE_LOG, got: {stderr}"
    );
}

#[test]
fn double_verbose_accepted() {
    let mut cmd = ripfile_command();
    cmd.arg("-vv").arg("--pipfile").arg(fixture("minimal")).arg("parse");

    let output = cmd.output().expect("Failed to execute ripfile");

    assert_eq!(output.status.code(), Some(0));
}
