//! 内置奖池
//!
//! 首次启动、存档损坏或恢复出厂设置时使用。迁移旧存档时也按 id 从这里找回价格。

use std::collections::HashMap;

use migration::MigrationContext;

use crate::models::{Prize, PrizeTier, PrizeType};

/// 默认每次抽奖消耗 1 金币
pub const DEFAULT_SPIN_COST: u64 = 1;

#[allow(clippy::too_many_arguments)]
fn prize(
    id: &str,
    name: &str,
    image: &str,
    model_url: Option<&str>,
    tier: PrizeTier,
    prize_type: PrizeType,
    stock: u32,
    weight: u32,
    price: u32,
) -> Prize {
    Prize {
        id: id.to_string(),
        name: name.to_string(),
        image: image.to_string(),
        model_url: model_url.map(str::to_string),
        tier,
        prize_type,
        stock,
        initial_stock: stock,
        weight,
        price,
    }
}

pub fn default_prizes() -> Vec<Prize> {
    use PrizeTier::*;
    use PrizeType::*;

    vec![
        prize(
            "1",
            "超级泰迪熊",
            "🧸",
            Some("https://modelviewer.dev/shared-assets/models/Astronaut.glb"),
            Legendary,
            Toy,
            1,
            10,
            100,
        ),
        prize(
            "2",
            "遥控赛车",
            "🏎️",
            Some("https://raw.githubusercontent.com/KhronosGroup/glTF-Sample-Models/master/2.0/Duck/glTF-Binary/Duck.glb"),
            Epic,
            Toy,
            2,
            40,
            50,
        ),
        prize(
            "3",
            "魔法棒",
            "🪄",
            Some("https://raw.githubusercontent.com/KhronosGroup/glTF-Sample-Models/master/2.0/Box/glTF-Binary/Box.glb"),
            Epic,
            Toy,
            2,
            40,
            45,
        ),
        prize("4", "美味巧克力", "🍫", None, Rare, Snack, 8, 100, 15),
        prize("5", "免做家务券", "🎟️", None, Fun, Coupon, 5, 150, 0),
        prize("6", "1元零花钱", "💰", None, Fun, Money, 5, 150, 1),
        prize("7", "奖励星星", "⭐", None, Fun, Coupon, 10, 150, 0),
        prize("8", "酷炫贴纸", "🏷️", None, Common, Stationery, 20, 300, 2),
        prize("9", "泡泡糖", "🍬", None, Common, Snack, 30, 300, 1),
    ]
}

/// 迁移旧存档时参考的内置价格与等级权重
pub fn migration_context() -> MigrationContext {
    MigrationContext {
        known_prices: default_prizes()
            .into_iter()
            .map(|p| (p.id, u64::from(p.price)))
            .collect(),
        tier_weights: PrizeTier::ALL
            .into_iter()
            .map(|tier| (tier.as_str().to_string(), u64::from(tier.default_weight())))
            .collect::<HashMap<_, _>>(),
        fallback_weight: u64::from(PrizeTier::Common.default_weight()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_catalog_is_consistent() {
        let prizes = default_prizes();
        assert_eq!(prizes.len(), 9);

        let ids: HashSet<_> = prizes.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), prizes.len());

        for p in &prizes {
            assert!(p.weight > 0, "{} has zero weight", p.id);
            assert_eq!(p.stock, p.initial_stock);
            assert_eq!(p.weight, p.tier.default_weight());
        }
    }

    #[test]
    fn test_migration_context() {
        let ctx = migration_context();
        assert_eq!(ctx.known_prices.get("1"), Some(&100));
        assert_eq!(ctx.known_prices.get("4"), Some(&15));
        assert_eq!(ctx.tier_weights.get("EPIC"), Some(&40));
        assert_eq!(ctx.fallback_weight, 300);
    }
}
