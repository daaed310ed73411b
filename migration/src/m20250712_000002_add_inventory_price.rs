use serde_json::{Map, Value};

use crate::{MigrationContext, MigrationTrait, Slot, as_count};

/// 早期中奖记录没有记录价格快照，无法还原，统一记 0
pub struct Migration;

impl MigrationTrait for Migration {
    fn name(&self) -> &'static str {
        "m20250712_000002_add_inventory_price"
    }

    fn slot(&self) -> Slot {
        Slot::Inventory
    }

    fn up(&self, entry: &mut Map<String, Value>, _ctx: &MigrationContext) -> bool {
        if as_count(entry.get("price")).is_some() {
            return false;
        }
        entry.insert("price".to_string(), Value::from(0u64));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_missing_price_is_zero_even_for_known_prize() {
        // 记录里的 prizeId 能对上内置奖品也不回填，价格必须是中奖当时的快照
        let ctx = MigrationContext {
            known_prices: HashMap::from([("1".to_string(), 100)]),
            ..Default::default()
        };
        let Value::Object(mut map) = json!({"id": "r1", "prizeId": "1"}) else {
            panic!("test entry must be an object");
        };
        assert!(Migration.up(&mut map, &ctx));
        assert_eq!(map["price"], json!(0));
    }

    #[test]
    fn test_keeps_snapshot_price() {
        let Value::Object(mut map) = json!({"id": "r1", "price": 45}) else {
            panic!("test entry must be an object");
        };
        assert!(!Migration.up(&mut map, &MigrationContext::default()));
        assert_eq!(map["price"], json!(45));
    }
}
