//! Song Command Handlers

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{CreateSong, DeleteSong, UpdateSong};
use crate::application::error::ApplicationError;
use crate::application::pipeline::SectionSegmenter;
use crate::application::ports::{RepositoryError, SongRecord, SongRepositoryPort};
use crate::application::queries::handlers::SongResponse;
use crate::domain::service::{sections_from_inputs, SectionInput};
use crate::domain::{Section, TextKind};

/// 先用显式段落；没有时把原始歌词分段
async fn build_sections(
    segmenter: &SectionSegmenter,
    sections: &[SectionInput],
    lyrics: Option<&str>,
) -> Result<Vec<Section>, ApplicationError> {
    let explicit = sections_from_inputs(sections);
    if !explicit.is_empty() {
        return Ok(explicit);
    }

    let segmented = match lyrics {
        Some(lyrics) => segmenter.segment(lyrics, TextKind::Lyrics).await,
        None => Vec::new(),
    };
    if segmented.is_empty() {
        return Err(ApplicationError::validation("Song needs sections or lyrics"));
    }
    Ok(segmented)
}

fn require_title(title: &str) -> Result<String, ApplicationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ApplicationError::validation("Song title is required"));
    }
    Ok(title.to_string())
}

// ============================================================================
// CreateSong
// ============================================================================

/// CreateSong Handler
pub struct CreateSongHandler {
    song_repo: Arc<dyn SongRepositoryPort>,
    segmenter: Arc<SectionSegmenter>,
}

impl CreateSongHandler {
    pub fn new(song_repo: Arc<dyn SongRepositoryPort>, segmenter: Arc<SectionSegmenter>) -> Self {
        Self { song_repo, segmenter }
    }

    pub async fn handle(&self, command: CreateSong) -> Result<SongResponse, ApplicationError> {
        let title = require_title(&command.title)?;
        let song_id = command
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        if self.song_repo.exists(&song_id).await? {
            return Err(ApplicationError::validation(format!("Song already exists: {}", song_id)));
        }

        let sections = build_sections(&self.segmenter, &command.sections, command.lyrics.as_deref()).await?;
        let now = Utc::now();

        let song = SongRecord {
            id: song_id.clone(),
            title,
            artist: command.artist,
            ccli_number: command.ccli_number,
            sections,
            created_at: now,
            updated_at: now,
        };

        // 检查与写入之间可能有并发创建，以插入结果为准
        self.song_repo.insert(&song).await.map_err(|e| match e {
            RepositoryError::Duplicate(id) => {
                ApplicationError::validation(format!("Song already exists: {}", id))
            }
            other => other.into(),
        })?;

        tracing::info!(
            song_id = %song_id,
            title = %song.title,
            sections = song.sections.len(),
            "Song created"
        );

        Ok(SongResponse::from(song))
    }
}

// ============================================================================
// UpdateSong
// ============================================================================

/// UpdateSong Handler
pub struct UpdateSongHandler {
    song_repo: Arc<dyn SongRepositoryPort>,
    segmenter: Arc<SectionSegmenter>,
}

impl UpdateSongHandler {
    pub fn new(song_repo: Arc<dyn SongRepositoryPort>, segmenter: Arc<SectionSegmenter>) -> Self {
        Self { song_repo, segmenter }
    }

    pub async fn handle(&self, command: UpdateSong) -> Result<SongResponse, ApplicationError> {
        let existing = self
            .song_repo
            .find_by_id(&command.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Song", command.id.as_str()))?;

        let title = require_title(&command.title)?;
        let sections = build_sections(&self.segmenter, &command.sections, command.lyrics.as_deref()).await?;

        let song = SongRecord {
            id: existing.id,
            title,
            artist: command.artist,
            ccli_number: command.ccli_number,
            sections,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        self.song_repo.save(&song).await?;

        tracing::info!(song_id = %song.id, title = %song.title, "Song updated");

        Ok(SongResponse::from(song))
    }
}

// ============================================================================
// DeleteSong
// ============================================================================

/// DeleteSong Handler
pub struct DeleteSongHandler {
    song_repo: Arc<dyn SongRepositoryPort>,
}

impl DeleteSongHandler {
    pub fn new(song_repo: Arc<dyn SongRepositoryPort>) -> Self {
        Self { song_repo }
    }

    pub async fn handle(&self, command: DeleteSong) -> Result<(), ApplicationError> {
        if !self.song_repo.delete(&command.id).await? {
            return Err(ApplicationError::not_found("Song", command.id));
        }

        tracing::info!(song_id = %command.id, "Song deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::InMemorySongRepo;

    fn handlers() -> (CreateSongHandler, UpdateSongHandler, DeleteSongHandler) {
        let repo: Arc<dyn SongRepositoryPort> = Arc::new(InMemorySongRepo::default());
        let segmenter = Arc::new(SectionSegmenter::new(None));
        (
            CreateSongHandler::new(repo.clone(), segmenter.clone()),
            UpdateSongHandler::new(repo.clone(), segmenter),
            DeleteSongHandler::new(repo),
        )
    }

    fn create(title: &str, lyrics: &str) -> CreateSong {
        CreateSong {
            id: None,
            title: title.to_string(),
            artist: None,
            ccli_number: None,
            sections: vec![],
            lyrics: Some(lyrics.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_from_lyrics() {
        let (create_handler, _, _) = handlers();

        let song = create_handler
            .handle(create("Way Maker", "[Verse 1]\nYou are here\n[Chorus]\nWay maker"))
            .await
            .unwrap();

        assert!(!song.id.is_empty());
        assert_eq!(song.sections.len(), 2);
        assert_eq!(song.sections[1].label, "Chorus");
    }

    #[tokio::test]
    async fn test_create_requires_content_and_title() {
        let (create_handler, _, _) = handlers();

        let err = create_handler.handle(create("Empty", "  ")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));

        let err = create_handler.handle(create(" ", "line")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_create_duplicate_id() {
        let (create_handler, _, _) = handlers();
        let mut command = create("Song", "line");
        command.id = Some("fixed".to_string());

        create_handler.handle(command.clone()).await.unwrap();
        let err = create_handler.handle(command).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    /// `exists` 总是返回 false，模拟检查之后才被并发写入的情况
    struct StaleExistsRepo(InMemorySongRepo);

    #[async_trait::async_trait]
    impl SongRepositoryPort for StaleExistsRepo {
        async fn save(&self, song: &SongRecord) -> Result<(), RepositoryError> {
            self.0.save(song).await
        }

        async fn insert(&self, song: &SongRecord) -> Result<(), RepositoryError> {
            self.0.insert(song).await
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<SongRecord>, RepositoryError> {
            self.0.find_by_id(id).await
        }

        async fn find_all(&self) -> Result<Vec<SongRecord>, RepositoryError> {
            self.0.find_all().await
        }

        async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
            self.0.delete(id).await
        }

        async fn exists(&self, _id: &str) -> Result<bool, RepositoryError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_create_never_overwrites_concurrent_song() {
        let repo: Arc<dyn SongRepositoryPort> = Arc::new(StaleExistsRepo(InMemorySongRepo::default()));
        let create_handler = CreateSongHandler::new(repo.clone(), Arc::new(SectionSegmenter::new(None)));

        let mut first = create("First", "line");
        first.id = Some("fixed".to_string());
        create_handler.handle(first).await.unwrap();

        let mut second = create("Second", "other line");
        second.id = Some("fixed".to_string());
        let err = create_handler.handle(second).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));

        let stored = repo.find_by_id("fixed").await.unwrap().unwrap();
        assert_eq!(stored.title, "First");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (create_handler, update_handler, delete_handler) = handlers();
        let created = create_handler.handle(create("Old", "line")).await.unwrap();

        let updated = update_handler
            .handle(UpdateSong {
                id: created.id.clone(),
                title: "New".to_string(),
                artist: Some("Artist".to_string()),
                ccli_number: None,
                sections: vec![SectionInput {
                    label: "Verse".to_string(),
                    content: "new line".to_string(),
                }],
                lyrics: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.title, "New");
        assert_eq!(updated.created_at, created.created_at);

        delete_handler
            .handle(DeleteSong { id: created.id.clone() })
            .await
            .unwrap();
        let err = delete_handler
            .handle(DeleteSong { id: created.id })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_song() {
        let (_, update_handler, _) = handlers();
        let err = update_handler
            .handle(UpdateSong {
                id: "missing".to_string(),
                title: "x".to_string(),
                artist: None,
                ccli_number: None,
                sections: vec![],
                lyrics: Some("a".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
