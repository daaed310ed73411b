//! 存档读写与迁移
//!
//! 四个槽位（奖池、中奖记录、金币、语言）各自独立加载：
//! 任何一个槽位损坏只会让该槽位回到默认值，不影响其它槽位。

use migration::{MigrationContext, MigrationError, Migrator, Slot, Value};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::catalog;
use crate::error::{AppError, AppResult};
use crate::models::{Language, Prize, WonPrize};
use crate::services::SessionState;
use crate::storage::{KeyValueStore, StorageKeys};

/// 单个存档槽位读取失败的原因，只记日志，不向上抛出
#[derive(Error, Debug)]
enum SlotError {
    #[error("read failed: {0}")]
    Read(#[from] AppError),

    #[error("invalid JSON: {0}")]
    Parse(serde_json::Error),

    #[error(transparent)]
    Migration(#[from] MigrationError),

    #[error("entries do not match current schema after migration: {0}")]
    Decode(serde_json::Error),

    #[error("invalid value: {0:?}")]
    Invalid(String),
}

pub struct PersistenceService {
    store: Box<dyn KeyValueStore>,
    keys: StorageKeys,
    migration_ctx: MigrationContext,
}

impl PersistenceService {
    pub fn new(store: Box<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self {
            store,
            keys,
            migration_ctx: catalog::migration_context(),
        }
    }

    /// 读取全部槽位。缺失或损坏的槽位使用默认值，本方法不会失败。
    pub fn load(&self) -> SessionState {
        let mut state = SessionState::default();

        match self.load_collection::<Prize>(&self.keys.prizes, Slot::Prizes) {
            Ok(Some(prizes)) => state.prizes = prizes,
            Ok(None) => {}
            Err(e) => log::error!("Error loading prizes, using built-in catalog: {e}"),
        }

        match self.load_collection::<WonPrize>(&self.keys.inventory, Slot::Inventory) {
            Ok(Some(inventory)) => state.inventory = inventory,
            Ok(None) => {}
            Err(e) => log::error!("Error loading inventory, starting empty: {e}"),
        }

        match self.load_balance() {
            Ok(Some(balance)) => state.balance = balance,
            Ok(None) => {}
            Err(e) => log::error!("Error loading coins, using 0: {e}"),
        }

        match self.load_language() {
            Ok(Some(language)) => state.language = language,
            Ok(None) => {}
            Err(e) => log::error!("Error loading language, using {}: {e}", state.language),
        }

        log::info!(
            "Loaded session: {} prizes, {} records, {} coins, language {}",
            state.prizes.len(),
            state.inventory.len(),
            state.balance,
            state.language
        );
        state
    }

    /// 无条件写入全部四个槽位
    pub fn save(&mut self, state: &SessionState) -> AppResult<()> {
        let prizes = serde_json::to_string(&state.prizes)?;
        let inventory = serde_json::to_string(&state.inventory)?;
        // 金币以 JSON 字符串形式保存，如 "\"5\""
        let coins = serde_json::to_string(&state.balance.to_string())?;

        self.store.set(&self.keys.prizes, &prizes)?;
        self.store.set(&self.keys.inventory, &inventory)?;
        self.store.set(&self.keys.coins, &coins)?;
        self.store.set(&self.keys.language, state.language.code())?;
        Ok(())
    }

    /// 删除全部四个槽位（只删本应用的键，不清空整个存储）
    pub fn clear(&mut self) -> AppResult<()> {
        for key in self.keys.all() {
            self.store.remove(key)?;
        }
        Ok(())
    }

    /// 先按当前结构严格解码；失败后逐条迁移再解码，仍失败则整槽丢弃。
    fn load_collection<T: DeserializeOwned>(
        &self,
        key: &str,
        slot: Slot,
    ) -> Result<Option<Vec<T>>, SlotError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        decode_collection(&raw, slot, &self.migration_ctx).map(Some)
    }

    fn load_balance(&self) -> Result<Option<u64>, SlotError> {
        let Some(raw) = self.store.get(&self.keys.coins)? else {
            return Ok(None);
        };
        parse_balance(&raw)
            .map(Some)
            .ok_or(SlotError::Invalid(raw))
    }

    fn load_language(&self) -> Result<Option<Language>, SlotError> {
        let Some(raw) = self.store.get(&self.keys.language)? else {
            return Ok(None);
        };
        raw.parse::<Language>()
            .map(Some)
            .map_err(|_| SlotError::Invalid(raw))
    }
}

fn decode_collection<T: DeserializeOwned>(
    raw: &str,
    slot: Slot,
    ctx: &MigrationContext,
) -> Result<Vec<T>, SlotError> {
    let document: Value = serde_json::from_str(raw).map_err(SlotError::Parse)?;

    match serde_json::from_value::<Vec<T>>(document.clone()) {
        Ok(entries) => Ok(entries),
        Err(strict_err) => {
            log::debug!("{slot} does not match current schema, migrating: {strict_err}");
            let (entries, report) = Migrator::up(slot, document, ctx)?;
            let decoded =
                serde_json::from_value(Value::Array(entries)).map_err(SlotError::Decode)?;
            log::info!(
                "Migrated {slot}: {} of {} entries updated",
                report.touched,
                report.entries
            );
            Ok(decoded)
        }
    }
}

/// 金币槽位：正常写入的是 JSON 字符串 "\"5\""，也兼容裸数字与纯文本整数
fn parse_balance(raw: &str) -> Option<u64> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::String(s)) => s.trim().parse().ok(),
        Ok(Value::Number(n)) => n.as_u64(),
        Ok(_) => None,
        Err(_) => raw.trim().parse().ok(),
    }
}
