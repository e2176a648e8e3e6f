#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.env_remove("EVENT_TIMELINE_CONFIG")
        .write_stdin(script.to_string())
        .assert()
}

#[test]
fn cli_prints_refresh_summary_after_edits() {
    run_cli("ceremony 17:00\nquit\n")
        .success()
        .stdout(str_contains("Refreshed (included="))
        .stdout(str_contains("prep_start=13:20"));
}

#[test]
fn cli_rejects_unknown_activity() {
    run_cli("include balloon_release\nquit\n")
        .success()
        .stdout(str_contains("unknown activity 'balloon_release'"));
}

#[test]
fn cli_reports_non_concurrent_activity() {
    run_cli("concurrent getting_dressed on\nquit\n")
        .success()
        .stdout(str_contains("cannot run concurrently"));
}

#[test]
fn cli_sunset_reports_zone() {
    run_cli("include golden_hour_photos\ndate 2026-12-19\nsunset\nquit\n")
        .success()
        .stdout(str_contains("Sunset 16:35"))
        .stdout(str_contains("Golden hour portraits are scheduled."));
}

#[test]
fn cli_summary_lists_custom_entries() {
    run_cli("custom 21:00 30 Late-night tacos\nsummary\nquit\n")
        .success()
        .stdout(str_contains("Added custom entry id="))
        .stdout(str_contains("Late-night tacos"));
}

#[test]
fn cli_save_and_load_json_round_trip() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    let script = format!(
        "time toasts 19:45\nsave json {path}\nauto toasts\nload json {path}\nshow\nquit\n"
    );
    let assert = run_cli(&script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(
        output.contains("Plan loaded from"),
        "expected output to mention load completion"
    );
    let after_reload = output.split("Plan loaded from").last().unwrap_or_default();
    assert!(
        after_reload.contains("manual=1"),
        "manual override should survive the reload:\n{}",
        after_reload
    );
}
