//! Command handlers

use crate::cli::{BoardCommand, Cli, Commands, TaskCommand};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use corkboard::{
    AppState, BlobStore, Board, CategoryId, CorkboardConfig, FileStore, NewTask, Point, Result,
    Task, TaskFlag, TaskId, Viewport,
};
use serde_json::json;
use std::path::PathBuf;
use tracing::debug;

/// Default data directory: `<user data dir>/corkboard`
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("corkboard"))
        .unwrap_or_else(|| PathBuf::from(".corkboard"))
}

/// Run a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    debug!("Using data directory {}", data_dir.display());

    let config = CorkboardConfig::load(Some(&data_dir))?;
    let mut state = AppState::load(FileStore::new(&data_dir), config)?;

    match cli.command {
        Commands::Boards { json } => list_boards(&state, json),
        Commands::Templates => {
            for name in state.templates().names() {
                println!("{name}");
            }
            Ok(())
        }
        Commands::Board { action } => run_board(&mut state, action),
        Commands::Task { action } => run_task(&mut state, action),
        Commands::Show { json } => show(state.board()?, json),
    }
}

fn list_boards<S: BlobStore>(state: &AppState<S>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(state.boards())?);
        return Ok(());
    }

    let current = state.current_name();
    for meta in state.boards() {
        let marker = if Some(meta.name.as_str()) == current { "*" } else { " " };
        let view = if meta.list { "list" } else { "free" };
        println!("{marker} {} [{}, {view}]", meta.name, meta.template);
    }
    Ok(())
}

fn run_board<S: BlobStore>(state: &mut AppState<S>, action: BoardCommand) -> Result<()> {
    match action {
        BoardCommand::New => {
            let name = state.new_board()?;
            println!("{name}");
        }
        BoardCommand::Select { name } => {
            state.select_board(&name)?;
        }
        BoardCommand::Rename { old, new } => state.rename_board(&old, &new)?,
        BoardCommand::Delete { name } => state.delete_board(&name)?,
        BoardCommand::Template { name } => {
            let changes = state.change_template(&name)?;
            println!("{} task(s) moved", changes.len());
        }
        BoardCommand::View => {
            let list = state.toggle_list_view()?;
            println!("{}", if list { "list" } else { "free" });
        }
        BoardCommand::Describe { description } => state.set_description(&description)?,
        BoardCommand::Resize { width, height } => {
            let viewport = Viewport { width, height };
            let changes = state.resize(viewport)?;
            if state.board()?.is_list_view() {
                println!("list");
            } else {
                println!("{} task(s) moved into view", changes.len());
            }
        }
    }
    Ok(())
}

fn run_task<S: BlobStore>(state: &mut AppState<S>, action: TaskCommand) -> Result<()> {
    match action {
        TaskCommand::Add {
            text,
            category,
            slot,
            due,
            at,
        } => {
            let mut new = NewTask::new(text);
            new.category = category.map(CategoryId::from);
            new.slot = slot;
            new.due = due;
            if let Some([x, y]) = at.as_deref() {
                new.position = Some(Point::new(*x, *y));
            }
            let (id, _) = state.request_new_task(new)?;
            println!("{id}");
        }
        TaskCommand::Move {
            id,
            category,
            position,
        } => {
            let category = CategoryId::from(category);
            state.request_move_to_category(&TaskId::from(id), Some(&category), position)?;
        }
        TaskCommand::Drag {
            id,
            x,
            y,
            width,
            height,
        } => {
            let width = width.unwrap_or(state.viewport().width);
            state.set_viewport(Viewport { width, height });
            let id = TaskId::from(id);
            state.request_drag_to(&id, Point::new(x, y))?;
            let task = state.board()?.task(&id)?;
            println!("{} {} z={}", task.x, task.y, display_opt(task.z));
        }
        TaskCommand::Raise { id } => {
            state.request_bring_to_front(&TaskId::from(id))?;
        }
        TaskCommand::Toggle { id, flag } => {
            let value = state.request_toggle(&TaskId::from(id), flag)?;
            println!("{flag}={value}");
        }
        TaskCommand::Edit { id, text } => state.request_edit_text(&TaskId::from(id), &text)?,
        TaskCommand::Due { id, date } => state.request_set_due(&TaskId::from(id), date)?,
        TaskCommand::Delete { id } => {
            state.request_delete(&TaskId::from(id))?;
        }
    }
    Ok(())
}

fn show(board: &Board, json: bool) -> Result<()> {
    if json {
        let value = json!({
            "board": board.meta(),
            "tasks": board.snapshot(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let meta = board.meta();
    println!("{} ({})", meta.name, meta.template);
    if !meta.description.is_empty() {
        println!("{}", meta.description);
    }

    for category in &board.template().categories {
        let tasks = board.tasks_in_category(&category.id);
        println!();
        println!("{} [{}]", category.title, tasks.len());
        if tasks.is_empty() {
            continue;
        }
        let mut table = new_table();
        table.set_header(vec!["#", "Id", "Text", "Due", "Flags", "z", "Position"]);
        for task in tasks {
            table.add_row(vec![
                display_opt(task.order),
                task.id.to_string(),
                task.text.clone(),
                display_opt(task.due),
                flags(task),
                display_opt(task.z),
                format!("{:.0}, {:.0}", task.x, task.y),
            ]);
        }
        println!("{table}");
    }
    Ok(())
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(120);
    table
}

fn flags(task: &Task) -> String {
    TaskFlag::ALL
        .iter()
        .filter(|flag| task.flag(**flag))
        .map(TaskFlag::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

fn display_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let mut task = Task::new(TaskId::from("t"), "");
        assert_eq!(flags(&task), "");
        task.done = true;
        task.pinned = true;
        assert_eq!(flags(&task), "done pin");
    }

    #[test]
    fn test_display_opt() {
        assert_eq!(display_opt(Some(5)), "5");
        assert_eq!(display_opt(None::<u32>), "");
    }
}
