//! Task types: Task, TaskFlag, NewTask

use super::geometry::Point;
use super::ids::{CategoryId, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A sticky-note card on the board.
///
/// `z`, `category` and `order` stay `None` until the board places the task;
/// after that the board keeps `z` unique across the board and `order` unique
/// within the category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "created")]
    pub id: TaskId,
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub due: Option<NaiveDate>,

    #[serde(default)]
    pub done: bool,
    #[serde(default, rename = "pin")]
    pub pinned: bool,
    #[serde(default, rename = "flag")]
    pub flagged: bool,
    #[serde(default, rename = "expand")]
    pub expanded: bool,

    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: Option<u32>,

    #[serde(default)]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub order: Option<u32>,
}

impl Task {
    /// Create an unplaced task
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            due: None,
            done: false,
            pinned: false,
            flagged: false,
            expanded: false,
            x: 0.0,
            y: 0.0,
            z: None,
            category: None,
            order: None,
        }
    }

    /// Set the due date
    pub fn with_due(mut self, due: NaiveDate) -> Self {
        self.due = Some(due);
        self
    }

    /// Set the free-form position
    pub fn at(mut self, position: Point) -> Self {
        self.x = position.x;
        self.y = position.y;
        self
    }

    /// Current free-form position
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether the task has a category, a slot and a stack position
    pub fn is_placed(&self) -> bool {
        self.category.is_some() && self.order.is_some() && self.z.is_some()
    }

    /// Read one of the boolean flags
    pub fn flag(&self, flag: TaskFlag) -> bool {
        match flag {
            TaskFlag::Done => self.done,
            TaskFlag::Pinned => self.pinned,
            TaskFlag::Flagged => self.flagged,
            TaskFlag::Expanded => self.expanded,
        }
    }

    /// Flip one of the boolean flags, returning its new value
    pub fn toggle(&mut self, flag: TaskFlag) -> bool {
        let value = match flag {
            TaskFlag::Done => &mut self.done,
            TaskFlag::Pinned => &mut self.pinned,
            TaskFlag::Flagged => &mut self.flagged,
            TaskFlag::Expanded => &mut self.expanded,
        };
        *value = !*value;
        *value
    }
}

/// Older boards store an unset due date as an empty string.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// The independent boolean flags of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFlag {
    Done,
    #[serde(rename = "pin")]
    Pinned,
    #[serde(rename = "flag")]
    Flagged,
    #[serde(rename = "expand")]
    Expanded,
}

impl TaskFlag {
    /// All flags, in display order
    pub const ALL: [TaskFlag; 4] = [
        TaskFlag::Done,
        TaskFlag::Pinned,
        TaskFlag::Flagged,
        TaskFlag::Expanded,
    ];

    /// Short name used in storage and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskFlag::Done => "done",
            TaskFlag::Pinned => "pin",
            TaskFlag::Flagged => "flag",
            TaskFlag::Expanded => "expand",
        }
    }
}

impl fmt::Display for TaskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "done" => Ok(TaskFlag::Done),
            "pin" | "pinned" => Ok(TaskFlag::Pinned),
            "flag" | "flagged" => Ok(TaskFlag::Flagged),
            "expand" | "expanded" => Ok(TaskFlag::Expanded),
            other => Err(format!(
                "unknown flag '{other}' (expected done, pin, flag or expand)"
            )),
        }
    }
}

/// Request to create a task on a board
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub text: String,
    pub due: Option<NaiveDate>,
    /// Explicit position; the board searches for a free spot when unset.
    pub position: Option<Point>,
    /// Target category; unknown or unset falls back to the template default.
    pub category: Option<CategoryId>,
    /// Target slot within the category; unset appends at the lowest free slot.
    pub slot: Option<u32>,
}

impl NewTask {
    /// Create a request with the given text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the due date
    pub fn with_due(mut self, due: NaiveDate) -> Self {
        self.due = Some(due);
        self
    }

    /// Place the task at an explicit position
    pub fn at(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Put the task in a category
    pub fn in_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Insert the task at a slot within its category
    pub fn at_slot(mut self, slot: u32) -> Self {
        self.slot = Some(slot);
        self
    }
}
