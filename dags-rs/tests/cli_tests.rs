/// Batch-mode tests: run the `dags` binary with flags, a config file and
/// stdin, and check what it prints.
///
/// Every run passes `-f` (or `-f<file>`) so a `.dagsrc` in the working or
/// home directory never leaks into a test.

use std::io::Write;
use std::process::{Command, Output, Stdio};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Path to the `dags` binary built by this Cargo workspace.
fn binary() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_BIN_EXE_dags"))
}

/// Run the binary with `args`, feeding `stdin`, and collect its output.
fn run_dags(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(binary())
        .args(args)
        .env_remove("DAGS_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn dags binary");
    {
        let input = child.stdin.as_mut().expect("stdin not open");
        input.write_all(stdin.as_bytes()).expect("write stdin");
    }
    child.wait_with_output().expect("wait for dags")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Write `contents` to a temporary config file.
fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn command_flag_runs_script() {
    let out = run_dags(&["-f", "-c", "@write(@add(2,3))"], "");
    assert!(out.status.success());
    assert_eq!(stdout(&out), "5\n");
}

#[test]
fn newline_marker_is_converted() {
    let out = run_dags(&["-f", "-c", "@writeline(a) @write(b)"], "");
    assert_eq!(stdout(&out), "a\nb\n");
}

#[test]
fn stdin_lines_share_one_dictionary() {
    let out = run_dags(&["-f"], "@set(x,4)\n@addto(x,1)\n@write(@get(x))\n");
    assert!(out.status.success());
    assert_eq!(stdout(&out), "5\n");
}

#[test]
fn defines_and_positional_keys() {
    let out = run_dags(
        &["-f", "-Dname=World", "-Dgreet=@write(\"Hello \",@get(name))", "greet"],
        "",
    );
    assert_eq!(stdout(&out), "Hello World\n");
}

#[test]
fn config_file_defines_and_options() {
    let cfg = config_file(
        ";; test data\n\
         /set seed=5\n\
         /define \"@double(n)\" \"@mul($n,2)\"\n\
         /define start \"@write(@double(21))\"\n",
    );
    let path = cfg.path().to_str().unwrap().to_owned();
    let out = run_dags(&["-f", &path, "start"], "");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(stdout(&out), "42\n");
}

#[test]
fn config_errors_are_reported_but_not_fatal() {
    let cfg = config_file("/set bogus=1\n/define ok yes\n");
    let arg = format!("-f{}", cfg.path().display());
    let out = run_dags(&[&arg, "-c", "@get(ok)"], "");
    assert!(out.status.success());
    assert_eq!(stdout(&out), "yes\n");
    assert!(String::from_utf8_lossy(&out.stderr).contains("line 1"));
}

#[test]
fn out_channel_is_echoed_unless_quiet() {
    let out = run_dags(&["-f", "-c", "@setoutchannel(#SAVE)"], "");
    assert_eq!(stdout(&out), "OUT: #SAVE\n");
    let out = run_dags(&["-f", "-q", "-c", "@setoutchannel(#SAVE)"], "");
    assert_eq!(stdout(&out), "");
}

#[test]
fn script_errors_are_rendered_to_stdout() {
    let out = run_dags(&["-f", "-c", "@div(1,0)"], "");
    assert!(out.status.success());
    assert_eq!(stdout(&out), "ERROR: @div(1,0): Division by zero!\n@div(1,0)\n");
}

#[test]
fn validate_reports_bad_scripts() {
    let out = run_dags(&["-f", "-V", "-Dok=@write(x)", "-Dbad=@nothere(1)"], "");
    assert!(!out.status.success());
    assert_eq!(stdout(&out), "bad: Function not found: @nothere(\n");

    let out = run_dags(&["-f", "-V", "-Dok=@write(x)"], "");
    assert!(out.status.success());
}

#[test]
fn overlay_flag_keeps_defines_in_base() {
    let out = run_dags(&["-f", "-o", "-Dx=1"], "@set(x,2)\n@write(@get(x))\n");
    assert_eq!(stdout(&out), "2\n");
}

#[test]
fn bad_flag_exits_with_usage() {
    let out = run_dags(&["-z"], "");
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage: dags"));
}
