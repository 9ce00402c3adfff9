//! Deck Renderer Port - 幻灯片渲染抽象
//!
//! 组装层只产出 `SlideDescriptor` 序列，文件格式完全由渲染器决定。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::SlideDescriptor;

/// 渲染错误（致命，整次生成失败）
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// 渲染元数据
#[derive(Debug, Clone)]
pub struct DeckMetadata {
    pub title: String,
    pub date: String,
    pub template_name: Option<String>,
}

/// 渲染结果
#[derive(Debug, Clone)]
pub struct RenderedDeck {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub file_extension: &'static str,
}

/// Deck Renderer Port
#[async_trait]
pub trait DeckRendererPort: Send + Sync {
    async fn render(
        &self,
        metadata: &DeckMetadata,
        slides: &[SlideDescriptor],
    ) -> Result<RenderedDeck, RenderError>;
}
