//! 抽奖引擎
//!
//! 模拟实体扭蛋机：机器里某种奖品越多、权重越高，越容易被抽中。
//! 每个奖品的有效权重 = weight * stock。所有函数都是纯函数，不修改奖池。
//!
//! 单个有效权重最大约 2^64，多个相加会超出 u64，因此总和一律用 u128 累加。

use crate::models::{CollectionSummary, PoolSummary, Prize, PrizeProbability, WonPrize};
use crate::utils::RandomSource;

/// 计算每个奖品当前的中奖概率（百分比）。
///
/// 无库存的奖品也会列出（概率 0），方便管理端展示；
/// 全部无库存时所有奖品都是 0%。
pub fn compute_probabilities(prizes: &[Prize]) -> Vec<PrizeProbability<'_>> {
    let total = total_weight(prizes.iter());

    prizes
        .iter()
        .map(|prize| {
            let percent = if total == 0 {
                0.0
            } else {
                prize.effective_weight() as f64 / total as f64 * 100.0
            };
            PrizeProbability { prize, percent }
        })
        .collect()
}

/// 按 weight * stock 加权随机抽取一个有库存的奖品，没有可抽奖品时返回 None。
pub fn draw_prize<'a, R>(prizes: &'a [Prize], rng: &mut R) -> Option<&'a Prize>
where
    R: RandomSource + ?Sized,
{
    draw_index(prizes, rng).map(|index| &prizes[index])
}

/// 同 [`draw_prize`]，返回中奖奖品在奖池中的下标
pub(crate) fn draw_index<R>(prizes: &[Prize], rng: &mut R) -> Option<usize>
where
    R: RandomSource + ?Sized,
{
    // 保持奖池原有顺序，不重新排序
    let available: Vec<usize> = prizes
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_available())
        .map(|(i, _)| i)
        .collect();
    let fallback = *available.last()?;

    let total = total_weight(available.iter().map(|&i| &prizes[i]));

    let unit = rng.next_unit();
    debug_assert!((0.0..1.0).contains(&unit), "random source out of range: {unit}");
    let pick = unit * total as f64;

    let mut acc = 0u128;
    for &i in &available {
        acc += u128::from(prizes[i].effective_weight());
        if pick < acc as f64 {
            return Some(i);
        }
    }

    // 浮点边界上走完一轮都没命中时，取最后一个有库存的奖品
    Some(fallback)
}

fn total_weight<'a>(prizes: impl Iterator<Item = &'a Prize>) -> u128 {
    prizes.map(|p| u128::from(p.effective_weight())).sum()
}

/// 奖池估值：总价值 Σ price * stock，总件数 Σ stock。超出 u64 时封顶为 u64::MAX。
pub fn pool_summary(prizes: &[Prize]) -> PoolSummary {
    prizes.iter().fold(PoolSummary::default(), |acc, p| PoolSummary {
        total_value: acc
            .total_value
            .saturating_add(u64::from(p.price) * u64::from(p.stock)),
        total_items: acc.total_items.saturating_add(u64::from(p.stock)),
    })
}

/// 收藏估值：记录数与 Σ price（快照价格）
pub fn collection_summary(inventory: &[WonPrize]) -> CollectionSummary {
    CollectionSummary {
        total_items: inventory.len(),
        total_value: inventory.iter().map(|w| u64::from(w.price)).sum(),
    }
}
