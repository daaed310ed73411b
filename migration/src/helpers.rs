use serde_json::Value;

/// 把 JSON 值读取为非负整数计数。
///
/// 接受整数和小数部分为 0 的浮点数；null、字符串、负数、NaN 写成的 null 以及
/// 超出 u32 的值都视为不可用。
pub fn as_count(value: Option<&Value>) -> Option<u64> {
    let Value::Number(number) = value? else {
        return None;
    };
    if let Some(n) = number.as_u64() {
        return (n <= u32::MAX as u64).then_some(n);
    }
    let f = number.as_f64()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_as_count() {
        assert_eq!(as_count(Some(&json!(5))), Some(5));
        assert_eq!(as_count(Some(&json!(0))), Some(0));
        assert_eq!(as_count(Some(&json!(15.0))), Some(15));
        assert_eq!(as_count(Some(&json!(2.5))), None);
        assert_eq!(as_count(Some(&json!(-1))), None);
        assert_eq!(as_count(Some(&json!("5"))), None);
        assert_eq!(as_count(Some(&Value::Null)), None);
        assert_eq!(as_count(Some(&json!(u64::MAX))), None);
        assert_eq!(as_count(None), None);
    }
}
