use serde::Serialize;

use super::{Prize, WonPrize};

/// 单个奖品当前的中奖概率（百分比）
#[derive(Debug, Clone, Serialize)]
pub struct PrizeProbability<'a> {
    pub prize: &'a Prize,
    pub percent: f64,
}

/// 奖池估值
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolSummary {
    /// Σ price * stock
    pub total_value: u64,
    /// Σ stock
    pub total_items: u64,
}

/// 收藏（中奖记录）估值
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub total_items: usize,
    /// Σ price
    pub total_value: u64,
}

/// 抽奖结果
#[derive(Debug, Clone, Serialize)]
pub struct SpinResult {
    /// 中奖瞬间的奖品（扣减库存前）
    pub prize: Prize,
    /// 新增的中奖记录
    pub record: WonPrize,
    /// 扣费后余额
    pub balance: u64,
}
