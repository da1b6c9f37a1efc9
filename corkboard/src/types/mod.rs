//! Core types for the board engine

mod board;
mod geometry;
mod ids;
mod task;

pub use board::{validate_board_name, BoardMeta, DEFAULT_BOARD_WIDTH};
pub use geometry::{clamp, CardSize, Point, Viewport};
pub use ids::{CategoryId, TaskId};
pub use task::{NewTask, Task, TaskFlag};
