//! Layered configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Built-in defaults
//! 2. `corkboard.toml`, `corkboard.yaml`, `corkboard.json` in the data directory
//! 3. `CORKBOARD_*` environment variables; `__` separates nested keys, so
//!    `CORKBOARD_CARD__WIDTH=250` sets `card.width`

use crate::board::{BoardSettings, SpawnConfig};
use crate::engine::BASE_Z_INDEX;
use crate::error::Result;
use crate::template::{Template, TemplateRegistry, DEFAULT_TEMPLATE};
use crate::types::CardSize;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, trace};

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "CORKBOARD_";

/// Base name of configuration files
pub const CONFIG_FILE_STEM: &str = "corkboard";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorkboardConfig {
    /// Lowest z a task can hold
    pub base_z_index: u32,
    /// Boards narrower than this switch to list view
    pub min_board_width: f64,
    /// Name of the board created on first run
    pub default_board_name: String,
    /// Base name for boards created later
    pub new_board_name: String,
    /// Template given to new boards
    pub default_template: String,
    pub card: CardSize,
    pub spawn: SpawnConfig,
    /// Templates added to the built-ins; same-named built-ins are replaced
    pub templates: Vec<Template>,
}

impl Default for CorkboardConfig {
    fn default() -> Self {
        Self {
            base_z_index: BASE_Z_INDEX,
            min_board_width: 720.0,
            default_board_name: "Default Board".to_string(),
            new_board_name: "New Board".to_string(),
            default_template: DEFAULT_TEMPLATE.to_string(),
            card: CardSize::default(),
            spawn: SpawnConfig::default(),
            templates: Vec::new(),
        }
    }
}

impl CorkboardConfig {
    /// Load configuration, looking for files in `dir` when given
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(dir).extract()?;
        debug!(
            "Loaded configuration with {} extra template(s)",
            config.templates.len()
        );
        Ok(config)
    }

    /// All configuration sources in precedence order
    pub fn figment(dir: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(dir) = dir {
            let toml = dir.join(format!("{CONFIG_FILE_STEM}.toml"));
            let yaml = dir.join(format!("{CONFIG_FILE_STEM}.yaml"));
            let json = dir.join(format!("{CONFIG_FILE_STEM}.json"));
            trace!("Looking for configuration in {}", dir.display());
            figment = figment
                .merge(Toml::file(toml))
                .merge(Yaml::file(yaml))
                .merge(Json::file(json));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Placement parameters for boards
    pub fn board_settings(&self) -> BoardSettings {
        BoardSettings {
            base_z: self.base_z_index,
            card: self.card,
            spawn: self.spawn,
        }
    }

    /// Built-in templates plus the configured ones
    pub fn template_registry(&self) -> TemplateRegistry {
        TemplateRegistry::with_templates(self.templates.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_defaults() {
        let config = CorkboardConfig::load(None).unwrap();
        assert_eq!(config.base_z_index, 5);
        assert_eq!(config.min_board_width, 720.0);
        assert_eq!(config.default_board_name, "Default Board");
        assert_eq!(config.card, CardSize::new(300.0, 150.0));
        assert_eq!(config.spawn.origin, Point::new(10.0, 25.0));
    }

    #[test]
    #[serial]
    fn test_toml_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("corkboard.toml"),
            r#"
base_z_index = 10
new_board_name = "Scratch"

[card]
width = 250.0

[[templates]]
name = "Weekly"
default = "Mon"
categories = [{ id = "Mon", title = "Monday" }, { id = "Tue", title = "Tuesday" }]
"#,
        )
        .unwrap();

        let config = CorkboardConfig::load(Some(temp.path())).unwrap();

        assert_eq!(config.base_z_index, 10);
        assert_eq!(config.new_board_name, "Scratch");
        assert_eq!(config.card, CardSize::new(250.0, 150.0));
        assert_eq!(config.board_settings().base_z, 10);
        let registry = config.template_registry();
        assert!(registry.get("Weekly").is_some());
        assert!(registry.get("Trifold").is_some());
    }

    #[test]
    #[serial]
    fn test_yaml_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("corkboard.yaml"),
            "min_board_width: 600\nspawn:\n  row_height: 100\n",
        )
        .unwrap();

        let config = CorkboardConfig::load(Some(temp.path())).unwrap();

        assert_eq!(config.min_board_width, 600.0);
        assert_eq!(config.spawn.row_height, 100.0);
        assert_eq!(config.spawn.step, Point::new(60.0, 10.0));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("corkboard.toml"), "base_z_index = 10\n").unwrap();
        std::env::set_var("CORKBOARD_BASE_Z_INDEX", "20");
        std::env::set_var("CORKBOARD_CARD__HEIGHT", "90");

        let config = CorkboardConfig::load(Some(temp.path()));

        std::env::remove_var("CORKBOARD_BASE_Z_INDEX");
        std::env::remove_var("CORKBOARD_CARD__HEIGHT");

        let config = config.unwrap();
        assert_eq!(config.base_z_index, 20);
        assert_eq!(config.card.height, 90.0);
    }

    #[test]
    #[serial]
    fn test_bad_value_is_config_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("corkboard.toml"), "base_z_index = \"high\"\n").unwrap();

        let result = CorkboardConfig::load(Some(temp.path()));
        assert!(matches!(result, Err(crate::error::BoardError::Config(_))));
    }
}
