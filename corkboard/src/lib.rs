//! Sticky-note task board engine
//!
//! Boards hold task cards that live both in a free-form layout and in the
//! categories of a template. This crate keeps their placement consistent:
//!
//! - **Category order** - every task in a category holds a distinct slot
//!   `order`, starting at 1, with no gaps introduced by moves or deletes
//! - **Stacking** - every task on a board holds a distinct `z`; dragging or
//!   raising a task puts it on top and closes the gap it left
//! - **Spawning** - new cards land on a staggered diagonal, away from
//!   existing cards
//!
//! ## Basic Usage
//!
//! ```rust
//! use corkboard::{AppState, CorkboardConfig, MemoryStore, NewTask, CategoryId};
//!
//! # fn main() -> corkboard::Result<()> {
//! let mut state = AppState::load(MemoryStore::new(), CorkboardConfig::default())?;
//! state.change_template("Trifold")?;
//!
//! let (first, _) = state.request_new_task(NewTask::new("Write report"))?;
//! let (second, _) = state.request_new_task(NewTask::new("Review PR"))?;
//!
//! let changes = state.request_move_to_category(&first, Some(&CategoryId::from("Inprogress")), None)?;
//! assert_eq!(changes.get(&second).and_then(|t| t.order), Some(1));
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage
//!
//! All state is kept as JSON blobs in a [`BlobStore`]:
//!
//! ```text
//! boards              # [{name, description, template, list}, ...]
//! current             # name of the open board
//! settings            # free-form settings object
//! tasks-{board name}  # [{created, text, due, done, pin, flag, expand, x, y, z, category, order}, ...]
//! ```
//!
//! [`FileStore`] writes each blob to `{key}.json` in a directory.

pub mod board;
pub mod config;
pub mod engine;
mod error;
mod logging;
pub mod state;
pub mod store;
pub mod template;
pub mod types;

pub use board::{Board, BoardEvent, BoardSettings, ChangeSet, SpawnConfig, TaskView};
pub use config::CorkboardConfig;
pub use engine::{OrderingEngine, StackEngine, BASE_Z_INDEX};
pub use error::{BoardError, Result};
pub use logging::Pretty;
pub use state::{AppState, Settings};
pub use store::{BlobStore, FileStore, MemoryStore};
pub use template::{CategorySpec, Template, TemplateRegistry, DEFAULT_TEMPLATE};
pub use types::{
    BoardMeta, CardSize, CategoryId, NewTask, Point, Task, TaskFlag, TaskId, Viewport,
};
