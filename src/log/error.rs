use thiserror::Error;

/// 日志模块统一错误类型
#[derive(Error, Debug)]
pub enum LogError {
    /// 参数不合法，调用被拒绝且没有任何副作用
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// sink 已关闭
    #[error("logger is closed")]
    Closed,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        LogError::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, LogError>;
