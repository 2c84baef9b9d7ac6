//! Error types for data retrieval operations

use thiserror::Error;

/// Errors raised while setting up or running the retrieval plugin
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Invalid or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading a config file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Network or HTTP client error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Endpoint URL could not be parsed
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Malformed command arguments
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Malformed user input. The `Display` text is the reply sent back to the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsageError {
    /// `股票` without a code
    #[error("⚠️ 请输入正确格式：股票 代码 [数量]\n例：股票 300033 5")]
    MissingStockCode,

    /// `股票 <code> <count>` where count is not an integer
    #[error("⚠️ 数量参数需为整数")]
    InvalidCount,

    /// `美股` without a ticker
    #[error("⚠️ 请输入正确格式：美股 股票代码\n例：美股 AAPL")]
    MissingTicker,
}

/// Result type alias for retrieval operations
pub type Result<T> = std::result::Result<T, RetrievalError>;

impl From<anyhow::Error> for RetrievalError {
    fn from(err: anyhow::Error) -> Self {
        RetrievalError::Other(err.to_string())
    }
}
