//! Command-line definition

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use corkboard::TaskFlag;
use std::path::PathBuf;

/// Corkboard - sticky-note task boards in the terminal.
///
/// Boards are stored as JSON files in the data directory, which also holds
/// an optional corkboard.toml / corkboard.yaml / corkboard.json config.
/// CORKBOARD_* environment variables override the config file.
#[derive(Parser, Debug)]
#[command(name = "corkboard")]
#[command(version)]
#[command(about = "Sticky-note task boards with ordered categories")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Directory holding board data (defaults to the user data directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List boards
    Boards {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List templates
    Templates,

    /// Manage boards
    Board {
        #[command(subcommand)]
        action: BoardCommand,
    },

    /// Manage tasks on the open board
    Task {
        #[command(subcommand)]
        action: TaskCommand,
    },

    /// Show the open board
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum BoardCommand {
    /// Create a new empty board
    New,
    /// Open a board
    Select { name: String },
    /// Rename a board
    Rename { old: String, new: String },
    /// Delete a board and its tasks
    Delete { name: String },
    /// Switch the open board to another template
    Template { name: String },
    /// Toggle list view on the open board
    View,
    /// Set the open board's description
    Describe { description: String },
    /// Resize the open board; narrow boards switch to list view
    Resize {
        width: f64,
        #[arg(long)]
        height: Option<f64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Create a task and print its id
    #[command(allow_negative_numbers = true)]
    Add {
        /// Task text
        #[arg(long, default_value = "")]
        text: String,
        /// Category; unknown categories use the template default
        #[arg(long)]
        category: Option<String>,
        /// Slot within the category
        #[arg(long)]
        slot: Option<u32>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Free-form position instead of the next free spawn position
        #[arg(long, num_args = 2, value_names = ["X", "Y"])]
        at: Option<Vec<f64>>,
    },
    /// Move a task to a category
    Move {
        id: String,
        category: String,
        /// Slot within the category; defaults to the end
        #[arg(long)]
        position: Option<u32>,
    },
    /// Drag a task to a position and raise it
    #[command(allow_negative_numbers = true)]
    Drag {
        id: String,
        x: f64,
        y: f64,
        /// Board width
        #[arg(long)]
        width: Option<f64>,
        /// Board height; unbounded if omitted
        #[arg(long)]
        height: Option<f64>,
    },
    /// Raise a task above all others
    Raise { id: String },
    /// Toggle a flag: done, pin, flag or expand
    Toggle { id: String, flag: TaskFlag },
    /// Replace a task's text
    Edit { id: String, text: String },
    /// Set a due date, or clear it when omitted
    Due { id: String, date: Option<NaiveDate> },
    /// Delete a task
    Delete { id: String },
}
