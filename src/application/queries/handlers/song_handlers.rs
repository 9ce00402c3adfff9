//! Song Query Handlers

use serde::Serialize;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{SongRecord, SongRepositoryPort};
use crate::application::queries::{GetSong, ListSongs};

// ============================================================================
// Response DTOs
// ============================================================================

/// 段落视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub label: String,
    pub content: String,
}

/// 歌曲详情响应
#[derive(Debug, Clone, Serialize)]
pub struct SongResponse {
    pub id: String,
    pub title: String,
    pub artist: Option<String>,
    pub ccli_number: Option<String>,
    pub sections: Vec<SectionView>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SongRecord> for SongResponse {
    fn from(record: SongRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            artist: record.artist,
            ccli_number: record.ccli_number,
            sections: record
                .sections
                .iter()
                .map(|s| SectionView {
                    label: s.label().to_string(),
                    content: s.content(),
                })
                .collect(),
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GetSong Handler
pub struct GetSongHandler {
    song_repo: Arc<dyn SongRepositoryPort>,
}

impl GetSongHandler {
    pub fn new(song_repo: Arc<dyn SongRepositoryPort>) -> Self {
        Self { song_repo }
    }

    pub async fn handle(&self, query: GetSong) -> Result<SongResponse, ApplicationError> {
        let song = self
            .song_repo
            .find_by_id(&query.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Song", query.id))?;

        Ok(SongResponse::from(song))
    }
}

/// ListSongs Handler
pub struct ListSongsHandler {
    song_repo: Arc<dyn SongRepositoryPort>,
}

impl ListSongsHandler {
    pub fn new(song_repo: Arc<dyn SongRepositoryPort>) -> Self {
        Self { song_repo }
    }

    pub async fn handle(&self, _query: ListSongs) -> Result<Vec<SongResponse>, ApplicationError> {
        let songs = self.song_repo.find_all().await?;
        Ok(songs.into_iter().map(SongResponse::from).collect())
    }
}
