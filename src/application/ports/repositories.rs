//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{Section, Song};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Song Repository
// ============================================================================

/// 歌曲实体（用于持久化）
#[derive(Debug, Clone)]
pub struct SongRecord {
    pub id: String,
    pub title: String,
    pub artist: Option<String>,
    pub ccli_number: Option<String>,
    pub sections: Vec<Section>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SongRecord> for Song {
    fn from(record: SongRecord) -> Self {
        Song {
            id: record.id,
            title: record.title,
            artist: record.artist,
            ccli_number: record.ccli_number,
            sections: record.sections,
        }
    }
}

/// Song Repository Port
#[async_trait]
pub trait SongRepositoryPort: Send + Sync {
    /// 插入或整体替换歌曲
    async fn save(&self, song: &SongRecord) -> Result<(), RepositoryError>;

    /// 只插入新歌曲；ID 已存在时返回 `RepositoryError::Duplicate`，不覆盖
    async fn insert(&self, song: &SongRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找歌曲
    async fn find_by_id(&self, id: &str) -> Result<Option<SongRecord>, RepositoryError>;

    /// 获取所有歌曲（按标题排序）
    async fn find_all(&self) -> Result<Vec<SongRecord>, RepositoryError>;

    /// 删除歌曲，返回是否真的删除了记录
    async fn delete(&self, id: &str) -> Result<bool, RepositoryError>;

    /// 检查歌曲是否存在
    async fn exists(&self, id: &str) -> Result<bool, RepositoryError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
