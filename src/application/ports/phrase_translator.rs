//! Phrase Translator Port - 确定性机器翻译抽象

use async_trait::async_trait;
use thiserror::Error;

/// 翻译服务错误
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Phrase Translator Port
///
/// `language_code` 已经过语言名查找表转换（如 `zh-CN`）
#[async_trait]
pub trait PhraseTranslatorPort: Send + Sync {
    async fn translate(&self, text: &str, language_code: &str) -> Result<String, TranslateError>;
}
