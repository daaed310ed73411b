use uuid::Uuid;

/// 生成新的奖品 id
pub fn generate_prize_id() -> String {
    Uuid::new_v4().to_string()
}

/// 生成新的中奖记录 id（与奖品 id 不同命名空间，但同样全局唯一）
pub fn generate_record_id() -> String {
    Uuid::new_v4().to_string()
}
