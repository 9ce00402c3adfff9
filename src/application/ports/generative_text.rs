//! Generative Text Port - 生成式文本服务抽象
//!
//! 用于翻译、经文兜底、段落结构兜底。调用方总是在 fallback 边界之后使用它，
//! 失败不会直接暴露给用户。

use async_trait::async_trait;
use thiserror::Error;

/// 生成式服务错误
#[derive(Debug, Error)]
pub enum GenerativeError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty response")]
    Empty,
}

/// Generative Text Port
#[async_trait]
pub trait GenerativeTextPort: Send + Sync {
    /// 根据 prompt 生成文本
    async fn generate(&self, prompt: &str) -> Result<String, GenerativeError>;
}
