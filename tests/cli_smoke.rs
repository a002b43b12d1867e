mod support;

use predicates::prelude::*;
use support::TestDir;

#[test]
fn create_list_status_round_trip() {
    let dir = TestDir::new();

    dir.pacer()
        .args(["create", "launch", "--tasks", "Start something:2\ntitle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project launch"));

    let list = dir.run_json(&["list"]);
    assert_eq!(list["schema_version"], "pacer.v1");
    assert_eq!(list["data"]["total"], 1);
    assert_eq!(list["data"]["projects"][0]["name"], "launch");
    assert_eq!(list["data"]["projects"][0]["task_count"], 2);

    let status = dir.run_json(&["status", "launch"]);
    let report = &status["data"]["report"];
    assert_eq!(report["total_size"], 3);
    assert_eq!(report["remaining_size"], 3);
    assert_eq!(report["completed_velocity"], 0);
    assert_eq!(report["window_days"], 21);
    // No due date: on schedule even though the projection is non-finite.
    assert_eq!(report["on_schedule"], true);
    assert!(report["projected_days_remaining"].is_null());

    let tasks = status["data"]["project"]["tasks"].as_array().unwrap();
    assert_eq!(tasks[0]["title"], "Start something");
    assert_eq!(tasks[0]["size"], 2);
    assert_eq!(tasks[1]["title"], "title");
    assert_eq!(tasks[1]["size"], 1);
}

#[test]
fn create_reads_task_text_from_stdin() {
    let dir = TestDir::new();

    dir.pacer()
        .args(["create", "piped", "--stdin"])
        .write_stdin("one:1\ntwo:2\nthree:3\n")
        .assert()
        .success();

    let list = dir.run_json(&["list"]);
    assert_eq!(list["data"]["projects"][0]["task_count"], 3);
}

#[test]
fn status_handles_maximum_task_sizes() {
    let dir = TestDir::new();
    dir.run_json(&["create", "huge", "--tasks", "a:4294967295\nb:4294967295"]);

    let status = dir.run_json(&["status", "huge"]);
    let report = &status["data"]["report"];
    assert_eq!(report["total_size"].as_u64(), Some(8_589_934_590));
    assert_eq!(report["remaining_size"].as_u64(), Some(8_589_934_590));
}

#[test]
fn edit_changes_the_due_date_after_creation() {
    let dir = TestDir::new();
    dir.run_json(&["create", "web", "--tasks", "a:1"]);

    let edited = dir.run_json(&["edit", "web", "--due", "2027-01-01"]);
    assert_eq!(edited["data"]["due_date"], "2027-01-01");

    let status = dir.run_json(&["status", "web"]);
    assert_eq!(status["data"]["project"]["due_date"], "2027-01-01");
    // A due date with no velocity: the verdict is no longer vacuously true.
    assert_eq!(status["data"]["report"]["on_schedule"], false);

    let cleared = dir.run_json(&["edit", "web", "--clear-due"]);
    assert!(cleared["data"]["due_date"].is_null());
    assert_eq!(
        dir.run_json(&["status", "web"])["data"]["report"]["on_schedule"],
        true
    );
}

#[test]
fn edit_without_changes_fails_with_user_error() {
    let dir = TestDir::new();
    dir.run_json(&["create", "web", "--tasks", "a:1"]);

    dir.pacer().args(["edit", "web"]).assert().failure().code(2);
}

#[test]
fn error_envelope_names_the_subcommand_not_the_dir_value() {
    let dir = TestDir::new();

    let output = dir
        .pacer()
        .args(["status", "ghost", "--json"])
        .output()
        .expect("run pacer");
    assert!(!output.status.success());

    let envelope: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON envelope");
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["command"], "status");
}

#[test]
fn blank_project_name_fails_with_user_error() {
    let dir = TestDir::new();

    dir.pacer()
        .args(["create", "   ", "--tasks", "a:1"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("project name cannot be empty"));
}

#[test]
fn duplicate_project_name_fails_with_user_error() {
    let dir = TestDir::new();

    dir.pacer()
        .args(["create", "twice", "--tasks", "a:1"])
        .assert()
        .success();
    dir.pacer()
        .args(["create", "twice", "--tasks", "b:2"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn status_for_unknown_project_fails_with_hint() {
    let dir = TestDir::new();

    dir.pacer()
        .args(["status", "ghost"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Project not found"))
        .stderr(predicate::str::contains("pacer list"));
}

#[test]
fn empty_project_metrics_are_all_zero() {
    let dir = TestDir::new();

    dir.pacer().args(["create", "empty"]).assert().success();

    let status = dir.run_json(&["status", "empty"]);
    let report = &status["data"]["report"];
    assert_eq!(report["total_size"], 0);
    assert_eq!(report["remaining_size"], 0);
    assert_eq!(report["completed_velocity"], 0);
    assert_eq!(report["current_rate"], 0.0);
    assert_eq!(report["done"], true);
    assert_eq!(report["on_schedule"], true);
}
