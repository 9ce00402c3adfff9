//! Scripture Source Port - 结构化经文检索抽象

use async_trait::async_trait;
use thiserror::Error;

/// 经文检索错误
#[derive(Debug, Error)]
pub enum ScriptureError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Reference not found: {0}")]
    NotFound(String),

    #[error("Unsupported version: {0}")]
    UnsupportedVersion(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Scripture Source Port
#[async_trait]
pub trait ScriptureSourcePort: Send + Sync {
    /// 按引用和译本取回经文，每节一个元素
    async fn fetch(&self, reference: &str, version: &str) -> Result<Vec<String>, ScriptureError>;
}
