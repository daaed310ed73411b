use serde_json::{Map, Value};

use crate::{MigrationContext, MigrationTrait, Slot, as_count};

/// 早期奖池没有 price 字段：按 id 从内置奖池找回价格，找不到记 0
pub struct Migration;

impl MigrationTrait for Migration {
    fn name(&self) -> &'static str {
        "m20250601_000001_add_prize_price"
    }

    fn slot(&self) -> Slot {
        Slot::Prizes
    }

    fn up(&self, entry: &mut Map<String, Value>, ctx: &MigrationContext) -> bool {
        if as_count(entry.get("price")).is_some() {
            return false;
        }

        let price = entry
            .get("id")
            .and_then(Value::as_str)
            .and_then(|id| ctx.known_prices.get(id))
            .copied()
            .unwrap_or(0);
        entry.insert("price".to_string(), Value::from(price));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn ctx() -> MigrationContext {
        MigrationContext {
            known_prices: HashMap::from([("4".to_string(), 15)]),
            ..Default::default()
        }
    }

    fn run(entry: Value) -> (bool, Value) {
        let Value::Object(mut map) = entry else {
            panic!("test entry must be an object");
        };
        let changed = Migration.up(&mut map, &ctx());
        (changed, Value::Object(map))
    }

    #[test]
    fn test_recovers_known_price() {
        let (changed, entry) = run(json!({"id": "4", "stock": 8}));
        assert!(changed);
        assert_eq!(entry["price"], json!(15));
    }

    #[test]
    fn test_unknown_id_defaults_to_zero() {
        let (changed, entry) = run(json!({"id": "custom-1", "price": null}));
        assert!(changed);
        assert_eq!(entry["price"], json!(0));
    }

    #[test]
    fn test_keeps_existing_price() {
        let (changed, entry) = run(json!({"id": "4", "price": 99}));
        assert!(!changed);
        assert_eq!(entry["price"], json!(99));
    }

    #[test]
    fn test_negative_or_fractional_price_is_replaced() {
        let (changed, entry) = run(json!({"id": "4", "price": 2.5}));
        assert!(changed);
        assert_eq!(entry["price"], json!(15));

        let (changed, entry) = run(json!({"id": "custom-1", "price": -3}));
        assert!(changed);
        assert_eq!(entry["price"], json!(0));
    }
}
