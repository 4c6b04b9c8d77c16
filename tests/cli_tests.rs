//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn desk_notify_bin(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("desk-notify").expect("binary is built");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_output() {
    let home = TempDir::new().unwrap();
    desk_notify_bin(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("notifications"))
        .stdout(predicate::str::contains("--main-button"))
        .stdout(predicate::str::contains("--actions"))
        .stdout(predicate::str::contains("--response"))
        .stdout(predicate::str::contains("--sender"))
        .stdout(predicate::str::contains("--async"))
        .stdout(predicate::str::contains("bundle-id"));
}

#[test]
fn version_output() {
    let home = TempDir::new().unwrap();
    desk_notify_bin(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("desk-notify"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn title_is_required() {
    let home = TempDir::new().unwrap();
    desk_notify_bin(&home).assert().code(2);
}

#[test]
fn delay_and_delivery_date_conflict() {
    let home = TempDir::new().unwrap();
    desk_notify_bin(&home)
        .args(["Hi", "--delay", "5s", "--delivery-date", "1700000000"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn bundle_id_requires_application() {
    let home = TempDir::new().unwrap();
    desk_notify_bin(&home).arg("bundle-id").assert().code(2);
}

#[test]
fn config_path_command() {
    let home = TempDir::new().unwrap();
    desk_notify_bin(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("desk-notify"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_help() {
    let home = TempDir::new().unwrap();
    desk_notify_bin(&home)
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn config_round_trip() {
    let home = TempDir::new().unwrap();

    desk_notify_bin(&home)
        .args(["config", "init"])
        .assert()
        .success();

    desk_notify_bin(&home)
        .args(["config", "get", "completion_timeout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5s"));

    desk_notify_bin(&home)
        .args(["config", "set", "sender", "com.apple.Safari"])
        .assert()
        .success();

    desk_notify_bin(&home)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("com.apple.Safari"))
        .stdout(predicate::str::contains("assume-success"));
}
