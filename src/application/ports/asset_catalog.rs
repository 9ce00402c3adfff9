//! Asset Catalog Port - 图片素材抽象

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// 素材错误
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    IoError(String),
}

/// Asset Catalog Port
#[async_trait]
pub trait AssetCatalogPort: Send + Sync {
    /// 在分类（如 `Bible`、`Communion`）中挑一张图片；分类不存在或为空时返回 `None`
    async fn pick_image(&self, category: &str) -> Result<Option<PathBuf>, AssetError>;
}
