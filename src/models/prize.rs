use serde::{Deserialize, Serialize};

/// 奖品等级，从低到高排序：Common < Fun < Rare < Epic < Legendary
///
/// 等级只用于展示，抽奖只看 weight。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrizeTier {
    Common,
    Fun,
    Rare,
    Epic,
    Legendary,
}

impl PrizeTier {
    /// 管理端展示顺序（稀有在前）
    pub const ALL: [PrizeTier; 5] = [
        PrizeTier::Legendary,
        PrizeTier::Epic,
        PrizeTier::Rare,
        PrizeTier::Fun,
        PrizeTier::Common,
    ];

    /// 管理端切换等级时预填的权重
    pub fn default_weight(self) -> u32 {
        match self {
            PrizeTier::Legendary => 10,
            PrizeTier::Epic => 40,
            PrizeTier::Rare => 100,
            PrizeTier::Fun => 150,
            PrizeTier::Common => 300,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrizeTier::Legendary => "LEGENDARY",
            PrizeTier::Epic => "EPIC",
            PrizeTier::Rare => "RARE",
            PrizeTier::Fun => "FUN",
            PrizeTier::Common => "COMMON",
        }
    }
}

/// 奖品类别，纯描述字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrizeType {
    Toy,
    Snack,
    Coupon,
    Stationery,
    Money,
}

/// 奖池中的奖品
///
/// - stock: 剩余库存，扣减到 0 为止
/// - initial_stock: 库存历史最高值，只升不降
/// - weight: 相对权重，实际抽中概率按 weight * stock 计算
/// - price: 估值（积分），仅用于统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prize {
    pub id: String,
    pub name: String,
    /// emoji，或 URL / data: 图片，引擎不解析
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,
    pub tier: PrizeTier,
    #[serde(rename = "type")]
    pub prize_type: PrizeType,
    pub stock: u32,
    pub initial_stock: u32,
    pub weight: u32,
    pub price: u32,
}

impl Prize {
    pub fn from_new(id: String, new: NewPrize) -> Self {
        Prize {
            id,
            name: new.name,
            image: new.image,
            model_url: new.model_url,
            tier: new.tier,
            prize_type: new.prize_type,
            stock: new.stock,
            initial_stock: new.stock,
            weight: new.weight,
            price: new.price,
        }
    }

    /// 是否还有库存
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// 有效权重 = weight * stock
    pub fn effective_weight(&self) -> u64 {
        u64::from(self.weight) * u64::from(self.stock)
    }

    /// 调整库存：最低扣到 0，initial_stock 随之抬高
    pub fn adjust_stock(&mut self, delta: i64) {
        let next = i64::from(self.stock)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        self.stock = next as u32;
        self.initial_stock = self.initial_stock.max(self.stock);
    }

    /// 中奖扣减一件
    pub fn take_one(&mut self) {
        self.stock = self.stock.saturating_sub(1);
    }
}

/// 新增奖品表单（id 与 initial_stock 由会话分配）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPrize {
    pub name: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,
    pub tier: PrizeTier,
    #[serde(rename = "type")]
    pub prize_type: PrizeType,
    pub stock: u32,
    pub weight: u32,
    pub price: u32,
}

impl Default for NewPrize {
    fn default() -> Self {
        NewPrize {
            name: String::new(),
            image: "🎁".to_string(),
            model_url: None,
            tier: PrizeTier::Common,
            prize_type: PrizeType::Toy,
            stock: 1,
            weight: PrizeTier::Common.default_weight(),
            price: 0,
        }
    }
}

impl NewPrize {
    /// 切换等级并套用该等级的预设权重
    pub fn with_tier(mut self, tier: PrizeTier) -> Self {
        self.tier = tier;
        self.weight = tier.default_weight();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Prize {
        Prize::from_new(
            "p1".into(),
            NewPrize {
                name: "Sticker".into(),
                stock: 3,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_tier_order() {
        assert!(PrizeTier::Legendary > PrizeTier::Epic);
        assert!(PrizeTier::Epic > PrizeTier::Rare);
        assert!(PrizeTier::Rare > PrizeTier::Fun);
        assert!(PrizeTier::Fun > PrizeTier::Common);
    }

    #[test]
    fn test_from_new_sets_initial_stock() {
        let prize = sample();
        assert_eq!(prize.stock, 3);
        assert_eq!(prize.initial_stock, 3);
        assert_eq!(prize.weight, 300);
    }

    #[test]
    fn test_adjust_stock_clamps_and_raises_high_water_mark() {
        let mut prize = sample();
        prize.adjust_stock(-100);
        assert_eq!(prize.stock, 0);
        assert_eq!(prize.initial_stock, 3);

        prize.adjust_stock(5);
        assert_eq!(prize.stock, 5);
        assert_eq!(prize.initial_stock, 5);

        prize.adjust_stock(i64::MIN);
        assert_eq!(prize.stock, 0);
        assert_eq!(prize.initial_stock, 5);
    }

    #[test]
    fn test_take_one_floors_at_zero() {
        let mut prize = sample();
        prize.stock = 0;
        prize.take_one();
        assert_eq!(prize.stock, 0);
    }

    #[test]
    fn test_with_tier_applies_preset_weight() {
        let form = NewPrize::default().with_tier(PrizeTier::Legendary);
        assert_eq!(form.weight, 10);
        assert_eq!(form.tier, PrizeTier::Legendary);
    }

    #[test]
    fn test_persisted_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["initialStock"], json!(3));
        assert_eq!(value["tier"], json!("COMMON"));
        assert_eq!(value["type"], json!("TOY"));
        assert!(value.get("modelUrl").is_none());
    }
}
