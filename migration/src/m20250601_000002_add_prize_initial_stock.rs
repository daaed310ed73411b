use serde_json::{Map, Value};

use crate::{MigrationContext, MigrationTrait, Slot, as_count};

/// 补齐 initialStock：缺失时取当前 stock，stock 也不可用时记 0
pub struct Migration;

impl MigrationTrait for Migration {
    fn name(&self) -> &'static str {
        "m20250601_000002_add_prize_initial_stock"
    }

    fn slot(&self) -> Slot {
        Slot::Prizes
    }

    fn up(&self, entry: &mut Map<String, Value>, _ctx: &MigrationContext) -> bool {
        if as_count(entry.get("initialStock")).is_some() {
            return false;
        }

        let stock = as_count(entry.get("stock")).unwrap_or(0);
        entry.insert("initialStock".to_string(), Value::from(stock));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(entry: Value) -> (bool, Value) {
        let Value::Object(mut map) = entry else {
            panic!("test entry must be an object");
        };
        let changed = Migration.up(&mut map, &MigrationContext::default());
        (changed, Value::Object(map))
    }

    #[test]
    fn test_defaults_to_stock() {
        let (changed, entry) = run(json!({"id": "1", "stock": 7}));
        assert!(changed);
        assert_eq!(entry["initialStock"], json!(7));
    }

    #[test]
    fn test_defaults_to_zero_without_stock() {
        let (_, entry) = run(json!({"id": "1"}));
        assert_eq!(entry["initialStock"], json!(0));
    }

    #[test]
    fn test_keeps_existing_value() {
        let (changed, entry) = run(json!({"id": "1", "stock": 2, "initialStock": 10}));
        assert!(!changed);
        assert_eq!(entry["initialStock"], json!(10));
    }
}
