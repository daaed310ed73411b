use crate::error::{AppError, AppResult};

/// 解析家长充值输入的金币数。
///
/// 与网页输入框一致：忽略首尾空白，只取开头的整数部分（"12abc" 记为 12）；
/// 非数字或非正数直接拒绝。
pub fn parse_refill_amount(input: &str) -> AppResult<u64> {
    let s = input.trim();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return Err(AppError::ValidationError(format!(
            "Refill amount is not a number: {input:?}"
        )));
    }

    let amount: u64 = digits
        .parse()
        .map_err(|_| AppError::ValidationError(format!("Refill amount too large: {input:?}")))?;
    if negative || amount == 0 {
        return Err(AppError::ValidationError(
            "Refill amount must be positive".into(),
        ));
    }
    Ok(amount)
}
