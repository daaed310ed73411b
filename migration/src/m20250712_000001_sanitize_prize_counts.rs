use serde_json::{Map, Value};

use crate::{MigrationContext, MigrationTrait, Slot, as_count};

/// 表单输入为空时旧版本会把 NaN 写成 null。
/// stock 不可用记 0；weight 不可用或为 0 时按等级取默认权重。
pub struct Migration;

impl MigrationTrait for Migration {
    fn name(&self) -> &'static str {
        "m20250712_000001_sanitize_prize_counts"
    }

    fn slot(&self) -> Slot {
        Slot::Prizes
    }

    fn up(&self, entry: &mut Map<String, Value>, ctx: &MigrationContext) -> bool {
        let mut changed = false;

        if as_count(entry.get("stock")).is_none() {
            entry.insert("stock".to_string(), Value::from(0u64));
            changed = true;
        }

        if !matches!(as_count(entry.get("weight")), Some(w) if w > 0) {
            let weight = entry
                .get("tier")
                .and_then(Value::as_str)
                .and_then(|tier| ctx.tier_weights.get(tier))
                .copied()
                .unwrap_or(ctx.fallback_weight);
            entry.insert("weight".to_string(), Value::from(weight));
            changed = true;
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn ctx() -> MigrationContext {
        MigrationContext {
            tier_weights: HashMap::from([("EPIC".to_string(), 40)]),
            fallback_weight: 300,
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
    fn test_null_stock_becomes_zero() {
        let (changed, entry) = run(json!({"stock": null, "weight": 10}));
        assert!(changed);
        assert_eq!(entry["stock"], json!(0));
        assert_eq!(entry["weight"], json!(10));
    }

    #[test]
    fn test_weight_from_tier() {
        let (_, entry) = run(json!({"tier": "EPIC", "stock": 1, "weight": 0}));
        assert_eq!(entry["weight"], json!(40));
    }

    #[test]
    fn test_weight_fallback_for_unknown_tier() {
        let (_, entry) = run(json!({"tier": "MYTHIC", "stock": 1}));
        assert_eq!(entry["weight"], json!(300));
    }

    #[test]
    fn test_valid_counts_untouched() {
        let (changed, _) = run(json!({"tier": "EPIC", "stock": 3, "weight": 40}));
        assert!(!changed);
    }
}
