pub(crate) use common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
};
use common::game::GameSettings;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "snake_client_config.yaml";

pub type ClientConfigManager = ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

pub fn get_config_manager(file_path: &str) -> ClientConfigManager {
    ConfigManager::from_yaml_file(file_path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub game: GameSettings,
    pub high_score_file: String,
    pub seed: Option<u64>,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        if self.high_score_file.is_empty() {
            return Err("high_score_file must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameSettings::default(),
            high_score_file: "snake_high_score.yaml".to_string(),
            seed: None,
        }
    }
}
