use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rudoro(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rudoro").unwrap();
    cmd.arg("--config")
        .arg(dir.path().join("config.yaml"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    Command::cargo_bin("rudoro")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn config_path_uses_override() {
    let dir = TempDir::new().unwrap();
    rudoro(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
}

#[test]
fn config_show_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    rudoro(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("work_minutes: 60"))
        .stdout(predicate::str::contains("bell.wav"));
}

#[test]
fn config_init_writes_once() {
    let dir = TempDir::new().unwrap();
    rudoro(&dir).args(["config", "init"]).assert().success();
    assert!(dir.path().join("config.yaml").exists());

    rudoro(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    rudoro(&dir)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn broken_config_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.yaml"), "timer: [not, a, map]\n").unwrap();

    rudoro(&dir)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn completions_for_bash() {
    Command::cargo_bin("rudoro")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rudoro"));
}

#[test]
fn quit_prints_summary() {
    let dir = TempDir::new().unwrap();
    rudoro(&dir)
        .write_stdin("5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Start a Pomodoro set"))
        .stdout(predicate::str::contains("Session summary"))
        .stdout(predicate::str::contains("Pomodoros completed:    0"));
}

#[test]
fn invalid_menu_choice_reprompts() {
    let dir = TempDir::new().unwrap();
    rudoro(&dir)
        .arg("run")
        .write_stdin("9\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid option"));
}

#[test]
fn tracked_activity_shows_in_json_summary() {
    let dir = TempDir::new().unwrap();
    let output = rudoro(&dir)
        .args(["run", "-o", "json"])
        .write_stdin("3\nEmail\n\n5\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Your choice"))
        .get_output()
        .stdout
        .clone();

    // The menu goes to stderr, so stdout is exactly the summary
    let stdout = String::from_utf8(output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["timeline"][0]["activity"], "Email");
    assert_eq!(value["work_cycles"], 0);
}

#[test]
fn pretty_run_keeps_menu_on_stdout() {
    let dir = TempDir::new().unwrap();
    rudoro(&dir)
        .arg("run")
        .write_stdin("5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Your choice"))
        .stderr(predicate::str::contains("Your choice").not());
}

#[test]
fn oversized_duration_flag_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    rudoro(&dir)
        .args(["run", "--work", "9999999999999999h"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid duration"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn invalid_duration_flag_fails() {
    let dir = TempDir::new().unwrap();
    rudoro(&dir)
        .args(["run", "--work", "later"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid duration"));
}
