//! Seed Import - 启动时导入歌曲 JSON
//!
//! 文件格式: `[{"id": "...", "title": "...", "artist": "...", "ccli_number": "...",
//! "sections": [{"label": "...", "content": "..."}]}]`
//!
//! 只插入库中还不存在的 id；没有 id 的条目生成新的 UUID。

use chrono::Utc;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

use crate::application::ports::{RepositoryError, SongRecord, SongRepositoryPort};
use crate::domain::service::{sections_from_inputs, SectionInput};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Deserialize)]
struct SeedSong {
    #[serde(default)]
    id: Option<String>,
    title: String,
    #[serde(default)]
    artist: Option<String>,
    #[serde(default)]
    ccli_number: Option<String>,
    #[serde(default)]
    sections: Vec<SectionInput>,
}

/// 导入种子文件，返回新插入的歌曲数
pub async fn import_seed_file(
    path: impl AsRef<Path>,
    repo: &dyn SongRepositoryPort,
) -> Result<usize, SeedError> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path).await?;
    let songs: Vec<SeedSong> = serde_json::from_str(&raw)?;

    let mut inserted = 0;
    for song in songs {
        if song.title.trim().is_empty() {
            tracing::warn!(id = ?song.id, "Skipping seed song without title");
            continue;
        }

        let id = match song.id.filter(|id| !id.trim().is_empty()) {
            Some(id) => {
                if repo.exists(&id).await? {
                    continue;
                }
                id
            }
            None => Uuid::new_v4().to_string(),
        };

        let now = Utc::now();
        repo.save(&SongRecord {
            id,
            title: song.title.trim().to_string(),
            artist: song.artist,
            ccli_number: song.ccli_number,
            sections: sections_from_inputs(&song.sections),
            created_at: now,
            updated_at: now,
        })
        .await?;
        inserted += 1;
    }

    tracing::info!(path = %path.display(), inserted, "Seed import completed");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteSongRepository,
    };
    use tempfile::TempDir;

    async fn repo() -> SqliteSongRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteSongRepository::new(pool)
    }

    #[tokio::test]
    async fn test_import_skips_existing_ids() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("songs.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "grace", "title": "Amazing Grace", "ccli_number": "22025",
                 "sections": [{"label": "Verse 1", "content": "Amazing grace\nhow sweet"}]},
                {"title": "No Id Song", "sections": [{"label": "", "content": "line"}]},
                {"id": "blank", "title": "  ", "sections": []}
            ]"#,
        )
        .unwrap();

        let repo = repo().await;
        assert_eq!(import_seed_file(&path, &repo).await.unwrap(), 2);

        let grace = repo.find_by_id("grace").await.unwrap().unwrap();
        assert_eq!(grace.sections[0].lines().len(), 2);

        let all = repo.find_all().await.unwrap();
        let generated = all.iter().find(|s| s.title == "No Id Song").unwrap();
        assert_eq!(generated.sections[0].label(), "Verse 1");

        // 第二次导入：有 id 的已存在，无 id 的再插入一次
        assert_eq!(import_seed_file(&path, &repo).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_import_errors() {
        let temp = TempDir::new().unwrap();
        let repo = repo().await;

        let missing = import_seed_file(temp.path().join("missing.json"), &repo).await;
        assert!(matches!(missing, Err(SeedError::Io(_))));

        let bad = temp.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        assert!(matches!(import_seed_file(&bad, &repo).await, Err(SeedError::Parse(_))));
    }
}
