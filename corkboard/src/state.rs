//! Application state: the board list, the open board and settings.
//!
//! [`AppState`] is constructed once and handed to whatever drives the
//! boards. Every mutating call writes the affected blobs before returning.

use crate::board::{Board, ChangeSet};
use crate::config::CorkboardConfig;
use crate::error::{BoardError, Result};
use crate::logging::Pretty;
use crate::store::{keys, read_json, write_json, BlobStore};
use crate::template::TemplateRegistry;
use crate::types::{
    validate_board_name, BoardMeta, CategoryId, NewTask, Point, Task, TaskFlag, TaskId, Viewport,
    DEFAULT_BOARD_WIDTH,
};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Free-form application settings, stored as one JSON object
pub type Settings = Map<String, Value>;

/// Boards, the open board, and where they are stored
#[derive(Debug)]
pub struct AppState<S: BlobStore> {
    store: S,
    config: CorkboardConfig,
    templates: TemplateRegistry,
    boards: Vec<BoardMeta>,
    current: Option<Board>,
    settings: Settings,
    /// Visible height, known only while a caller keeps reporting it
    height: Option<f64>,
}

impl<S: BlobStore> AppState<S> {
    /// State with no boards; call [`AppState::load`] instead to read the store.
    pub fn new(store: S, config: CorkboardConfig) -> Self {
        let templates = config.template_registry();
        Self {
            store,
            config,
            templates,
            boards: Vec::new(),
            current: None,
            settings: Settings::new(),
            height: None,
        }
    }

    /// Read boards, the current board name and settings from `store`.
    ///
    /// A store without a board list is treated as a first run and gets a
    /// single empty board.
    pub fn load(store: S, config: CorkboardConfig) -> Result<Self> {
        let mut state = Self::new(store, config);

        state.settings = match read_json(&state.store, keys::SETTINGS) {
            Ok(settings) => settings.unwrap_or_default(),
            Err(e) => {
                warn!("Ignoring unreadable settings: {}", e);
                Settings::new()
            }
        };

        match read_json::<_, Vec<BoardMeta>>(&state.store, keys::BOARDS)? {
            Some(stored) => {
                let mut seen = HashSet::new();
                for meta in stored {
                    if seen.insert(meta.name.clone()) {
                        state.boards.push(meta);
                    } else {
                        warn!("Ignoring duplicate board '{}'", meta.name);
                    }
                }
                let current = state.read_current()?.unwrap_or_default();
                state.load_board(&current)?;
            }
            None => state.setup_new()?,
        }
        Ok(state)
    }

    /// The stored current board name. Older stores keep it as bare text.
    fn read_current(&self) -> Result<Option<String>> {
        Ok(self.store.get(keys::CURRENT)?.map(|raw| {
            serde_json::from_str::<String>(&raw).unwrap_or_else(|_| raw.trim().to_string())
        }))
    }

    /// Replace the board list with one empty default board and open it
    fn setup_new(&mut self) -> Result<()> {
        let meta = BoardMeta::new(
            self.config.default_board_name.clone(),
            self.config.default_template.clone(),
        );
        info!("Creating board '{}'", meta.name);
        write_json(&mut self.store, &keys::tasks(&meta.name), &Vec::<Task>::new())?;

        let template = self.templates.for_board(&meta.template);
        self.boards = vec![meta.clone()];
        self.current = Some(Board::new(meta, template, self.config.board_settings()));
        self.save()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &CorkboardConfig {
        &self.config
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    /// Every board, in creation order
    pub fn boards(&self) -> &[BoardMeta] {
        &self.boards
    }

    pub fn has_board(&self, name: &str) -> bool {
        self.boards.iter().any(|b| b.name == name)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_ref().map(Board::name)
    }

    /// The open board
    pub fn board(&self) -> Result<&Board> {
        self.current.as_ref().ok_or(BoardError::NoCurrentBoard)
    }

    pub fn board_mut(&mut self) -> Result<&mut Board> {
        self.current.as_mut().ok_or(BoardError::NoCurrentBoard)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Set one settings entry and save
    pub fn set_setting(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        self.settings.insert(key.into(), value);
        self.save()
    }

    /// The open board's stored width with the last reported height
    pub fn viewport(&self) -> Viewport {
        let width = self
            .current
            .as_ref()
            .map_or(DEFAULT_BOARD_WIDTH, Board::width);
        Viewport {
            width,
            height: self.height,
        }
    }

    /// Record the board's visible extent in memory only; [`AppState::resize`] also saves it
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.height = viewport.height;
        if let Some(board) = self.current.as_mut() {
            board.set_width(viewport.width);
        }
    }

    /// Write the current board name, the board list and settings
    pub fn save(&mut self) -> Result<()> {
        self.sync_current_meta();
        if let Some(current) = self.current_name() {
            let current = current.to_string();
            write_json(&mut self.store, keys::CURRENT, &current)?;
        }
        write_json(&mut self.store, keys::BOARDS, &self.boards)?;
        write_json(&mut self.store, keys::SETTINGS, &self.settings)?;
        debug!("Saved {} board(s)", self.boards.len());
        Ok(())
    }

    /// Write the open board's tasks
    pub fn save_tasks(&mut self) -> Result<()> {
        let board = self.current.as_ref().ok_or(BoardError::NoCurrentBoard)?;
        let key = keys::tasks(board.name());
        write_json(&mut self.store, &key, &board.snapshot())
    }

    fn sync_current_meta(&mut self) {
        let Some(board) = &self.current else {
            return;
        };
        if let Some(meta) = self.boards.iter_mut().find(|m| m.name == board.name()) {
            *meta = board.meta().clone();
        }
    }

    fn read_tasks(&self, name: &str) -> Result<Vec<Task>> {
        Ok(read_json(&self.store, &keys::tasks(name))?.unwrap_or_default())
    }

    /// Open a board by name.
    ///
    /// An unknown name opens the most recently created board instead, and a
    /// store with no boards at all gets a fresh default board.
    pub fn load_board(&mut self, name: &str) -> Result<&mut Board> {
        let Some(meta) = self.boards.iter().find(|b| b.name == name).cloned() else {
            info!("No board named '{}', opening the last board", name);
            return self.load_last_board();
        };

        self.sync_current_meta();
        let stored = self.read_tasks(&meta.name)?;
        let template = self.templates.for_board(&meta.template);
        let board = Board::hydrate(meta, template, self.config.board_settings(), stored);
        self.current = Some(board);
        self.save()?;
        self.board_mut()
    }

    fn load_last_board(&mut self) -> Result<&mut Board> {
        match self.boards.last().map(|b| b.name.clone()) {
            Some(last) => self.load_board(&last),
            None => {
                self.setup_new()?;
                self.board_mut()
            }
        }
    }

    /// Open a board by name, failing if there is no such board
    pub fn select_board(&mut self, name: &str) -> Result<&mut Board> {
        if !self.has_board(name) {
            return Err(BoardError::board_not_found(name));
        }
        self.load_board(name)
    }

    /// Add an empty board named after `new_board_name`, numbered to stay unique.
    ///
    /// The open board does not change. Returns the new board's name.
    pub fn new_board(&mut self) -> Result<String> {
        let base = self.config.new_board_name.clone();
        let mut name = base.clone();
        let mut i = 1;
        while self.has_board(&name) {
            name = format!("{base} ({i})");
            i += 1;
        }

        write_json(&mut self.store, &keys::tasks(&name), &Vec::<Task>::new())?;
        self.boards
            .push(BoardMeta::new(name.clone(), self.config.default_template.clone()));
        info!("Created board '{}'", name);
        self.save()?;
        Ok(name)
    }

    /// Rename a board, moving its tasks to the new storage key.
    ///
    /// Renaming a board to its own name succeeds without doing anything.
    pub fn rename_board(&mut self, old: &str, new: &str) -> Result<()> {
        if old == new {
            return Ok(());
        }
        validate_board_name(new)?;
        if self.has_board(new) {
            return Err(BoardError::BoardExists {
                name: new.to_string(),
            });
        }
        let Some(position) = self.boards.iter().position(|b| b.name == old) else {
            return Err(BoardError::board_not_found(old));
        };

        let is_current = self.current_name() == Some(old);
        let tasks = match &self.current {
            Some(board) if is_current => board.snapshot(),
            _ => self.read_tasks(old)?,
        };
        write_json(&mut self.store, &keys::tasks(new), &tasks)?;
        self.store.remove(&keys::tasks(old))?;

        self.boards[position].name = new.to_string();
        if is_current {
            if let Some(board) = self.current.as_mut() {
                board.set_name(new);
            }
        }
        info!("Renamed board '{}' to '{}'", old, new);
        self.save()
    }

    /// Delete a board and its tasks.
    ///
    /// Deleting the open board opens the last remaining one, or a fresh
    /// default board if none remain.
    pub fn delete_board(&mut self, name: &str) -> Result<()> {
        let Some(position) = self.boards.iter().position(|b| b.name == name) else {
            return Err(BoardError::board_not_found(name));
        };

        self.store.remove(&keys::tasks(name))?;
        self.boards.remove(position);
        info!("Deleted board '{}'", name);

        if self.current_name() == Some(name) {
            self.current = None;
            self.load_last_board()?;
            Ok(())
        } else {
            self.save()
        }
    }

    /// Switch the open board to another template
    pub fn change_template(&mut self, name: &str) -> Result<ChangeSet> {
        let template = self.templates.require(name)?.clone();
        let changes = self.board_mut()?.change_template(template)?;
        self.save_tasks()?;
        self.save()?;
        Ok(changes)
    }

    /// Toggle list view on the open board, returning whether it is now on
    pub fn toggle_list_view(&mut self) -> Result<bool> {
        let list = self.board_mut()?.toggle_list_view();
        self.save()?;
        Ok(list)
    }

    /// React to the board being resized.
    ///
    /// The new width is saved with the board. A free-form board at or below
    /// `min_board_width` switches to list view; otherwise every task is
    /// clamped back into view.
    pub fn resize(&mut self, viewport: Viewport) -> Result<ChangeSet> {
        self.height = viewport.height;
        let min_width = self.config.min_board_width;
        let board = self.board_mut()?;
        board.set_width(viewport.width);

        let changes = if board.is_list_view() {
            ChangeSet::new()
        } else if viewport.width <= min_width {
            board.set_list_view(true);
            ChangeSet::new()
        } else {
            board.move_tasks_into_view(viewport)
        };

        if !changes.is_empty() {
            self.save_tasks()?;
        }
        self.save()?;
        Ok(changes)
    }

    /// Set the open board's description
    pub fn set_description(&mut self, description: &str) -> Result<()> {
        self.board_mut()?.set_description(description);
        self.save()
    }

    /// Create a task on the open board
    pub fn request_new_task(&mut self, new: NewTask) -> Result<(TaskId, ChangeSet)> {
        let width = self.viewport().width;
        let (id, changes) = self.board_mut()?.create_task(new, width)?;
        self.save_tasks()?;
        Ok((id, changes))
    }

    /// Drag a task on the open board. Pinned tasks refuse on a free-form board.
    pub fn request_drag_to(&mut self, id: &TaskId, point: Point) -> Result<ChangeSet> {
        let viewport = self.viewport();
        let board = self.board_mut()?;
        if !board.can_drag(id)? {
            return Err(BoardError::TaskPinned { id: id.to_string() });
        }
        let changes = board.drag_to(id, point, viewport)?;
        self.save_tasks()?;
        Ok(changes)
    }

    /// Raise a task without moving it
    pub fn request_bring_to_front(&mut self, id: &TaskId) -> Result<ChangeSet> {
        let changes = self.board_mut()?.bring_to_front(id)?;
        self.save_tasks()?;
        Ok(changes)
    }

    /// Move a task into a category, at `position` or the lowest free slot
    pub fn request_move_to_category(
        &mut self,
        id: &TaskId,
        category: Option<&CategoryId>,
        position: Option<u32>,
    ) -> Result<ChangeSet> {
        let changes = self
            .board_mut()?
            .move_to_category(id, category, position)?;
        debug!("Moved {} {}", id, Pretty(&changes));
        self.save_tasks()?;
        Ok(changes)
    }

    pub fn request_delete(&mut self, id: &TaskId) -> Result<ChangeSet> {
        let changes = self.board_mut()?.delete_task(id)?;
        self.save_tasks()?;
        Ok(changes)
    }

    /// Flip a flag, returning its new value
    pub fn request_toggle(&mut self, id: &TaskId, flag: TaskFlag) -> Result<bool> {
        let value = self.board_mut()?.toggle(id, flag)?;
        self.save_tasks()?;
        Ok(value)
    }

    pub fn request_edit_text(&mut self, id: &TaskId, text: &str) -> Result<()> {
        self.board_mut()?.set_text(id, text)?;
        self.save_tasks()
    }

    pub fn request_set_due(&mut self, id: &TaskId, due: Option<NaiveDate>) -> Result<()> {
        self.board_mut()?.set_due(id, due)?;
        self.save_tasks()
    }
}
