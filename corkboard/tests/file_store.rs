//! AppState over a directory of JSON files

use corkboard::{
    AppState, BlobStore, CategoryId, CorkboardConfig, FileStore, NewTask, Point, TaskFlag,
    Viewport,
};
use std::fs;
use tempfile::TempDir;

fn open(dir: &TempDir) -> AppState<FileStore> {
    let config = CorkboardConfig::load(Some(dir.path())).unwrap();
    AppState::load(FileStore::new(dir.path()), config).unwrap()
}

#[test]
fn test_board_survives_restart() {
    let temp = TempDir::new().unwrap();

    let (first, second, third) = {
        let mut state = open(&temp);
        state.change_template("Trifold").unwrap();
        let (a, _) = state.request_new_task(NewTask::new("a")).unwrap();
        let (b, _) = state.request_new_task(NewTask::new("b")).unwrap();
        let (c, _) = state.request_new_task(NewTask::new("c")).unwrap();
        state
            .request_move_to_category(&b, Some(&CategoryId::from("Complete")), None)
            .unwrap();
        state.request_toggle(&c, TaskFlag::Flagged).unwrap();
        state.request_bring_to_front(&a).unwrap();
        (a, b, c)
    };

    let state = open(&temp);
    let board = state.board().unwrap();

    assert_eq!(board.template().name, "Trifold");
    let todo: Vec<_> = board
        .tasks_in_category(&CategoryId::from("Todo"))
        .into_iter()
        .map(|t| (t.id.clone(), t.order))
        .collect();
    assert_eq!(todo, vec![(first.clone(), Some(1)), (third.clone(), Some(2))]);
    assert_eq!(
        board.task(&second).unwrap().category,
        Some(CategoryId::from("Complete"))
    );
    assert!(board.task(&third).unwrap().flagged);

    let z: Vec<_> = board.tasks_by_z().iter().map(|t| t.id.clone()).collect();
    assert_eq!(z, vec![second, third, first]);
}

#[test]
fn test_files_use_storage_keys() {
    let temp = TempDir::new().unwrap();
    let mut state = open(&temp);
    state.request_new_task(NewTask::new("hello")).unwrap();

    for file in ["boards.json", "current.json", "settings.json", "tasks-Default Board.json"] {
        assert!(temp.path().join(file).exists(), "missing {file}");
    }
    let raw = fs::read_to_string(temp.path().join("tasks-Default Board.json")).unwrap();
    assert!(raw.contains("\"created\""));
    assert!(raw.contains("\"pin\":false"));
}

#[test]
fn test_config_file_shapes_boards() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("corkboard.toml"),
        r#"
default_board_name = "Inbox"
base_z_index = 100

[card]
width = 200.0
height = 100.0
"#,
    )
    .unwrap();

    let mut state = open(&temp);
    state.set_viewport(Viewport::new(1000.0, 800.0));
    let (id, _) = state.request_new_task(NewTask::new("first")).unwrap();
    state.request_drag_to(&id, Point::new(950.0, 750.0)).unwrap();

    assert_eq!(state.current_name(), Some("Inbox"));
    let task = state.board().unwrap().task(&id).unwrap();
    assert_eq!(task.z, Some(100));
    assert_eq!(task.position(), Point::new(800.0, 700.0));
}

#[test]
fn test_rename_and_delete_touch_files() {
    let temp = TempDir::new().unwrap();
    let mut state = open(&temp);
    let name = state.new_board().unwrap();

    state.rename_board(&name, "Errands").unwrap();
    assert!(temp.path().join("tasks-Errands.json").exists());
    assert!(!temp.path().join("tasks-New Board.json").exists());

    state.delete_board("Errands").unwrap();
    assert!(!temp.path().join("tasks-Errands.json").exists());
    assert_eq!(state.store().get("tasks-Errands").unwrap(), None);
}
