use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Insufficient funds: balance {balance}, cost {cost}")]
    InsufficientFunds { balance: u64, cost: u64 },

    #[error("Machine is empty: no prize has stock left")]
    EmptyMachine,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    /// 展示层用于查找多语言文案的错误码
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            AppError::EmptyMachine => "EMPTY_MACHINE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::StorageError(_) | AppError::Io(_) => "STORAGE_ERROR",
            AppError::ConfigError(_) => "CONFIG_ERROR",
            AppError::SerdeJsonError(_) => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::InsufficientFunds { balance: 0, cost: 1 };
        assert_eq!(err.code(), "INSUFFICIENT_FUNDS");
        assert_eq!(err.to_string(), "Insufficient funds: balance 0, cost 1");

        assert_eq!(AppError::EmptyMachine.code(), "EMPTY_MACHINE");
        assert_eq!(AppError::StorageError("disk full".into()).code(), "STORAGE_ERROR");
    }
}
