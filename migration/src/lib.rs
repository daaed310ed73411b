//! 本地存档迁移
//!
//! 存档中的奖池 / 中奖记录由历代版本写入，字段并不统一。这里的迁移步骤
//! 只在无类型的 JSON 文档上工作：逐条补齐缺失字段，交给上层做严格解码。

use std::collections::HashMap;
use std::fmt;

pub use serde_json::{Map, Value};
use thiserror::Error;

mod helpers;
mod m20250601_000001_add_prize_price;
mod m20250601_000002_add_prize_initial_stock;
mod m20250712_000001_sanitize_prize_counts;
mod m20250712_000002_add_inventory_price;

pub use helpers::as_count;

/// 需要迁移的存档槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// 奖池
    Prizes,
    /// 中奖记录
    Inventory,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Prizes => write!(f, "prizes"),
            Slot::Inventory => write!(f, "inventory"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MigrationError {
    #[error("{slot} record is not an array")]
    NotAnArray { slot: Slot },

    #[error("{slot} entry #{index} is not an object")]
    NotAnObject { slot: Slot, index: usize },
}

/// 迁移时可参考的内置数据
#[derive(Debug, Clone, Default)]
pub struct MigrationContext {
    /// 内置奖品 id -> 价格
    pub known_prices: HashMap<String, u64>,
    /// 等级 (如 "LEGENDARY") -> 默认权重
    pub tier_weights: HashMap<String, u64>,
    /// 等级未知时使用的权重
    pub fallback_weight: u64,
}

pub trait MigrationTrait {
    fn name(&self) -> &'static str;

    fn slot(&self) -> Slot;

    /// 迁移单条记录，返回是否修改过该记录
    fn up(&self, entry: &mut Map<String, Value>, ctx: &MigrationContext) -> bool;
}

/// 一次迁移的统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub entries: usize,
    pub touched: usize,
}

pub struct Migrator;

impl Migrator {
    pub fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_add_prize_price::Migration),
            Box::new(m20250601_000002_add_prize_initial_stock::Migration),
            Box::new(m20250712_000001_sanitize_prize_counts::Migration),
            Box::new(m20250712_000002_add_inventory_price::Migration),
        ]
    }

    /// 对某个槽位的整份文档依次执行全部迁移。
    ///
    /// 文档不是数组，或任意一条不是对象时整体失败，不做部分迁移。
    pub fn up(
        slot: Slot,
        document: Value,
        ctx: &MigrationContext,
    ) -> Result<(Vec<Value>, MigrationReport), MigrationError> {
        let Value::Array(entries) = document else {
            return Err(MigrationError::NotAnArray { slot });
        };

        let migrations: Vec<_> = Self::migrations()
            .into_iter()
            .filter(|m| m.slot() == slot)
            .collect();

        let mut report = MigrationReport {
            entries: entries.len(),
            touched: 0,
        };
        let mut migrated = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let Value::Object(mut record) = entry else {
                return Err(MigrationError::NotAnObject { slot, index });
            };

            let mut changed = false;
            for migration in &migrations {
                if migration.up(&mut record, ctx) {
                    log::debug!("{} applied to {slot} entry #{index}", migration.name());
                    changed = true;
                }
            }
            if changed {
                report.touched += 1;
            }
            migrated.push(Value::Object(record));
        }

        Ok((migrated, report))
    }
}
