//! Command-line surface tests against the built binary

use std::process::Command;

#[test]
fn zero_arguments_prints_usage_and_exits_nonzero() {
    let output = Command::new(env!("CARGO_BIN_EXE_vslaunch"))
        .output()
        .expect("binary runs");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Usage"),
        "expected a usage message, got: {stderr}"
    );
}

#[test]
fn help_flag_succeeds() {
    let output = Command::new(env!("CARGO_BIN_EXE_vslaunch"))
        .arg("--help")
        .output()
        .expect("binary runs");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--instance"));
    assert!(stdout.contains("--no-continue"));
}

#[test]
fn malformed_instance_flag_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_vslaunch"))
        .args(["--instance", "not-a-number", "target.exe"])
        .output()
        .expect("binary runs");

    assert!(!output.status.success());
}
