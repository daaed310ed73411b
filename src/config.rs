use serde::{Deserialize, Serialize};
use std::env;

use crate::catalog::DEFAULT_SPIN_COST;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub game: GameConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 存档文件路径
    #[serde(default = "default_storage_path")]
    pub path: String,
    /// 存档键名前缀，四个槽位为 {prefix}_prizes / _inventory / _coins / _language
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// 每次抽奖消耗的金币
    #[serde(default = "default_spin_cost")]
    pub spin_cost: u64,
}

fn default_storage_path() -> String {
    "data/lion_lottery.json".to_string()
}

fn default_key_prefix() -> String {
    "lion_lottery".to_string()
}

fn default_spin_cost() -> u64 {
    DEFAULT_SPIN_COST
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spin_cost: default_spin_cost(),
        }
    }
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 没有配置文件时完全依赖环境变量与默认值
        let mut config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("Config file {config_path} not found, using defaults");
                Config::default()
            }
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "Failed to read {config_path}: {e}"
                )));
            }
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn parse(config_str: &str) -> AppResult<Self> {
        toml::from_str(config_str)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config file: {e}")))
    }

    fn apply_env_overrides(&mut self) -> AppResult<()> {
        if let Ok(v) = env::var("LOTTERY_STORAGE_PATH") {
            self.storage.path = v;
        }
        if let Ok(v) = env::var("LOTTERY_KEY_PREFIX") {
            self.storage.key_prefix = v;
        }
        if let Ok(v) = env::var("LOTTERY_SPIN_COST") {
            self.game.spin_cost = v.trim().parse().map_err(|_| {
                AppError::ConfigError(format!("LOTTERY_SPIN_COST is not an integer: {v}"))
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> AppResult<()> {
        if self.storage.key_prefix.trim().is_empty() {
            return Err(AppError::ConfigError("storage.key_prefix is empty".into()));
        }
        if self.game.spin_cost == 0 {
            return Err(AppError::ConfigError("game.spin_cost must be positive".into()));
        }
        Ok(())
    }
}
