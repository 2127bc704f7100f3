use std::path::Path;

use serde::{Deserialize, Serialize};
use tictactoe_common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
};
use tictactoe_common::games::tictactoe::GameSettings;

pub const CONFIG_FILE: &str = "tictactoe_console_config.yaml";

pub fn get_config_manager(
    path: &Path,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub game: GameSettings,
    /// Fixed seed for Easy's random moves; a fresh one is drawn when absent.
    pub seed: Option<u64>,
    pub log_prefix: Option<String>,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        if matches!(self.log_prefix.as_deref(), Some(prefix) if prefix.trim().is_empty()) {
            return Err("log_prefix must not be blank".to_string());
        }
        Ok(())
    }
}
