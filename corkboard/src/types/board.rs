//! Board metadata as kept in the board list

use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};

/// Board width assumed until the first resize
pub const DEFAULT_BOARD_WIDTH: f64 = 1280.0;

/// Everything about a board except its tasks.
///
/// The board list is stored as one blob; each board's tasks live in their own blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardMeta {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Name of the template that defines the board's categories
    #[serde(default = "default_template_name")]
    pub template: String,
    /// List view (categories as columns) instead of free-form placement
    #[serde(default)]
    pub list: bool,
    /// Last known width of the board area, used to clamp drags and place new tasks
    #[serde(default = "default_width")]
    pub width: f64,
}

fn default_template_name() -> String {
    crate::template::DEFAULT_TEMPLATE.to_string()
}

fn default_width() -> f64 {
    DEFAULT_BOARD_WIDTH
}

impl BoardMeta {
    /// Create metadata for a free-form board using the given template
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            template: template.into(),
            list: false,
            width: DEFAULT_BOARD_WIDTH,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Validate a board name; names double as storage keys.
pub fn validate_board_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(BoardError::invalid_board_name(
            name,
            "board name cannot be empty",
        ));
    }

    let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|', '\0'];
    for ch in invalid_chars {
        if name.contains(ch) {
            return Err(BoardError::invalid_board_name(
                name,
                format!("contains invalid character '{ch}'"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Default Board")]
    #[case("New Board (1)")]
    #[case("groceries")]
    fn test_valid_names(#[case] name: &str) {
        assert!(validate_board_name(name).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("work/home")]
    #[case("a:b")]
    #[case("what?")]
    fn test_invalid_names(#[case] name: &str) {
        assert!(matches!(
            validate_board_name(name),
            Err(BoardError::InvalidBoardName { .. })
        ));
    }

    #[test]
    fn test_meta_defaults_when_reading() {
        let meta: BoardMeta = serde_json::from_str(r#"{"name": "Old"}"#).unwrap();
        assert_eq!(meta.template, "Default");
        assert!(!meta.list);
        assert_eq!(meta.description, "");
        assert_eq!(meta.width, DEFAULT_BOARD_WIDTH);
    }

    #[test]
    fn test_meta_width_round_trips() {
        let meta: BoardMeta =
            serde_json::from_str(r#"{"name": "Wall", "width": 900.0, "list": false}"#).unwrap();
        assert_eq!(meta.width, 900.0);
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["width"], 900.0);
    }
}
