use crate::common::{INSTA_FILTERS, fixture, ripfile_command, ripfile_help};
use crate::ripfile_snapshot;

#[test]
fn help_shows_all_commands() {
    ripfile_snapshot!(&INSTA_FILTERS, ripfile_help(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    Inspect Pipfile manifests.

    Usage: ripfile [OPTIONS] <COMMAND>

    Commands:
      parse  Print the normalized Pipfile mapping as JSON
      show   Summarize sources, requirements, and packages
      hash   Print the Pipfile content hash
      lock   Print the Pipfile.lock header as JSON
      find   Print the path of the Pipfile that would be used
      help   Print this message or the help of the given subcommand(s)

    Options:
      -p, --pipfile <PIPFILE>  Path to the Pipfile to read
      -v, --verbose...         Increase logging verbosity
      -q, --quiet              Suppress all output
      -h, --help               Print help
      -V, --version            Print version

    Use `ripfile help <command>` for more information on a specific command.
    ----- stderr -----
    "#);
}

#[test]
fn help_show() {
    let mut cmd = ripfile_command();
    cmd.args(["help", "show"]);

    let output = cmd.output().expect("Failed to execute ripfile");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Summarize sources"));
    assert!(stdout.contains("--no-dev"));
    assert!(stdout.contains("--dev-only"));
}

#[test]
fn show_flags_conflict() {
    let mut cmd = ripfile_command();
    cmd.arg("--pipfile")
        .arg(fixture("minimal"))
        .args(["show", "--dev-only", "--no-dev"]);

    let output = cmd.output().expect("Failed to execute ripfile");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn unknown_command_errors() {
    let mut cmd = ripfile_command();
    cmd.arg("nonexistent");

    let output = cmd.output().expect("Failed to execute ripfile");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn no_args_shows_help() {
    let mut cmd = ripfile_command();

    let output = cmd.output().expect("Failed to execute ripfile");
    let stderr = String::from_utf8_lossy(&output.stderr);

    // clap errors with "requires a subcommand" when no subcommand given
    assert!(!output.status.success());
    assert!(
        stderr.contains("Usage") || stderr.contains("subcommand"),
        "Expected usage info in stderr, got: {stderr}"
    );
}
