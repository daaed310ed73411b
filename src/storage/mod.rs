pub mod file_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use crate::config::StorageConfig;
use crate::error::AppResult;

/// 本地键值存储（对应浏览器 localStorage 的 get / set / remove）
pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;

    fn remove(&mut self, key: &str) -> AppResult<()>;
}

/// 四个存档槽位的键名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub prizes: String,
    pub inventory: String,
    pub coins: String,
    pub language: String,
}

impl StorageKeys {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prizes: format!("{prefix}_prizes"),
            inventory: format!("{prefix}_inventory"),
            coins: format!("{prefix}_coins"),
            language: format!("{prefix}_language"),
        }
    }

    pub fn all(&self) -> [&str; 4] {
        [
            self.prizes.as_str(),
            self.inventory.as_str(),
            self.coins.as_str(),
            self.language.as_str(),
        ]
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix("lion_lottery")
    }
}

/// 按配置打开文件存储
pub fn open_store(config: &StorageConfig) -> AppResult<Box<dyn KeyValueStore>> {
    let store = FileStore::open(&config.path)?;
    log::info!("Opened file store at {}", config.path);
    Ok(Box::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys() {
        let keys = StorageKeys::default();
        assert_eq!(keys.prizes, "lion_lottery_prizes");
        assert_eq!(keys.inventory, "lion_lottery_inventory");
        assert_eq!(keys.coins, "lion_lottery_coins");
        assert_eq!(keys.language, "lion_lottery_language");
        assert_eq!(StorageKeys::with_prefix("kids").all()[2], "kids_coins");
    }

    #[test]
    fn test_open_store_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            path: dir.path().join("state.json").to_string_lossy().into_owned(),
            key_prefix: "kids".into(),
        };
        let mut store = open_store(&config).unwrap();
        store.set("kids_coins", "\"3\"").unwrap();
        assert_eq!(store.get("kids_coins").unwrap().as_deref(), Some("\"3\""));
    }
}
