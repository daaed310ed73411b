use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Prize, PrizeTier};

/// 中奖记录
///
/// name / image / tier / price 是中奖当时的快照，奖池后续修改或删除奖品都不影响记录。
/// prize_id 只是回指，不保证对应奖品仍然存在。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WonPrize {
    pub id: String,
    pub prize_id: String,
    pub name: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,
    pub tier: PrizeTier,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub won_at: DateTime<Utc>,
    pub price: u32,
}

impl WonPrize {
    pub fn snapshot(id: String, prize: &Prize, won_at: DateTime<Utc>) -> Self {
        WonPrize {
            id,
            prize_id: prize.id.clone(),
            name: prize.name.clone(),
            image: prize.image.clone(),
            model_url: prize.model_url.clone(),
            tier: prize.tier,
            won_at,
            price: prize.price,
        }
    }
}
