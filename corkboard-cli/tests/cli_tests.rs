//! End-to-end tests for the corkboard binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn corkboard(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("corkboard").unwrap();
    cmd.arg("--data-dir").arg(dir.path());
    cmd.env_remove("CORKBOARD_LOG").env_remove("RUST_LOG");
    cmd
}

fn add_task(dir: &TempDir, text: &str) -> String {
    let output = corkboard(dir)
        .args(["task", "add", "--text", text])
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn test_first_run_lists_default_board() {
    let dir = TempDir::new().unwrap();

    corkboard(&dir)
        .arg("boards")
        .assert()
        .success()
        .stdout(predicate::str::contains("* Default Board [Default, free]"));
}

#[test]
fn test_add_and_show() {
    let dir = TempDir::new().unwrap();
    let id = add_task(&dir, "Buy milk");

    corkboard(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk"))
        .stdout(predicate::str::contains(id.as_str()))
        .stdout(predicate::str::contains("Todo list [1]"));
}

#[test]
fn test_move_between_categories() {
    let dir = TempDir::new().unwrap();
    corkboard(&dir)
        .args(["board", "template", "Trifold"])
        .assert()
        .success();
    let first = add_task(&dir, "first");
    let second = add_task(&dir, "second");

    corkboard(&dir)
        .args(["task", "move", &first, "Complete"])
        .assert()
        .success();

    let output = corkboard(&dir).args(["show", "--json"]).output().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let tasks = value["tasks"].as_array().unwrap();
    let find = |id: &str| {
        tasks
            .iter()
            .find(|t| t["created"] == id)
            .cloned()
            .unwrap()
    };
    assert_eq!(find(&first)["category"], "Complete");
    assert_eq!(find(&first)["order"], 1);
    assert_eq!(find(&second)["order"], 1);
}

#[test]
fn test_pinned_task_cannot_be_dragged() {
    let dir = TempDir::new().unwrap();
    let id = add_task(&dir, "stay");

    corkboard(&dir)
        .args(["task", "toggle", &id, "pin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pin=true"));

    corkboard(&dir)
        .args(["task", "drag", &id, "100", "100"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("pinned"));
}

#[test]
fn test_drag_clamps_to_board() {
    let dir = TempDir::new().unwrap();
    let id = add_task(&dir, "move me");

    corkboard(&dir)
        .args(["task", "drag", &id, "-20", "900", "--width", "1000", "--height", "600"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 450 z=5"));
}

#[test]
fn test_board_lifecycle() {
    let dir = TempDir::new().unwrap();

    corkboard(&dir)
        .args(["board", "new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New Board"));
    corkboard(&dir)
        .args(["board", "rename", "New Board", "Errands"])
        .assert()
        .success();
    corkboard(&dir)
        .args(["board", "select", "Errands"])
        .assert()
        .success();
    corkboard(&dir)
        .arg("boards")
        .assert()
        .success()
        .stdout(predicate::str::contains("* Errands"));

    corkboard(&dir)
        .args(["board", "rename", "Errands", "Default Board"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    corkboard(&dir)
        .args(["board", "delete", "Errands"])
        .assert()
        .success();
    corkboard(&dir)
        .arg("boards")
        .assert()
        .success()
        .stdout(predicate::str::contains("* Default Board"))
        .stdout(predicate::str::contains("Errands").not());
}

#[test]
fn test_unknown_task_fails() {
    let dir = TempDir::new().unwrap();

    corkboard(&dir)
        .args(["task", "delete", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("task not found: nope"));
}

#[test]
fn test_config_file_is_read() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("corkboard.toml"),
        "default_board_name = \"Inbox\"\n",
    )
    .unwrap();

    corkboard(&dir)
        .arg("boards")
        .assert()
        .success()
        .stdout(predicate::str::contains("* Inbox"));
}
