//! SQLite Song Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{RepositoryError, SongRecord, SongRepositoryPort};
use crate::domain::Section;

/// SQLite Song Repository
pub struct SqliteSongRepository {
    pool: DbPool,
}

impl SqliteSongRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// `sections` 列中的 JSON 元素
#[derive(Debug, Serialize, Deserialize)]
struct StoredSection {
    label: String,
    content: String,
}

fn encode_sections(sections: &[Section]) -> Result<String, RepositoryError> {
    let stored: Vec<StoredSection> = sections
        .iter()
        .map(|s| StoredSection {
            label: s.label().to_string(),
            content: s.content(),
        })
        .collect();
    serde_json::to_string(&stored).map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

fn decode_sections(raw: &str) -> Result<Vec<Section>, RepositoryError> {
    let stored: Vec<StoredSection> =
        serde_json::from_str(raw).map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
    Ok(stored
        .into_iter()
        .map(|s| Section::new(s.label, &s.content))
        .filter(|s| !s.is_empty())
        .collect())
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

#[derive(FromRow)]
struct SongRow {
    id: String,
    title: String,
    artist: Option<String>,
    ccli_number: Option<String>,
    sections: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<SongRow> for SongRecord {
    type Error = RepositoryError;

    fn try_from(row: SongRow) -> Result<Self, Self::Error> {
        Ok(SongRecord {
            sections: decode_sections(&row.sections)?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
            id: row.id,
            title: row.title,
            artist: row.artist,
            ccli_number: row.ccli_number,
        })
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, title, artist, ccli_number, sections, created_at, updated_at FROM songs";

#[async_trait]
impl SongRepositoryPort for SqliteSongRepository {
    async fn save(&self, song: &SongRecord) -> Result<(), RepositoryError> {
        let sections = encode_sections(&song.sections)?;

        sqlx::query(
            r#"
            INSERT INTO songs (id, title, artist, ccli_number, sections, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                artist = excluded.artist,
                ccli_number = excluded.ccli_number,
                sections = excluded.sections,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&song.id)
        .bind(&song.title)
        .bind(&song.artist)
        .bind(&song.ccli_number)
        .bind(sections)
        .bind(song.created_at.to_rfc3339())
        .bind(song.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn insert(&self, song: &SongRecord) -> Result<(), RepositoryError> {
        let sections = encode_sections(&song.sections)?;

        sqlx::query(
            r#"
            INSERT INTO songs (id, title, artist, ccli_number, sections, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&song.id)
        .bind(&song.title)
        .bind(&song.artist)
        .bind(&song.ccli_number)
        .bind(sections)
        .bind(song.created_at.to_rfc3339())
        .bind(song.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Duplicate(song.id.clone())
            }
            other => RepositoryError::DatabaseError(other.to_string()),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<SongRecord>, RepositoryError> {
        let row: Option<SongRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(SongRecord::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<SongRecord>, RepositoryError> {
        let rows: Vec<SongRow> =
            sqlx::query_as(&format!("{} ORDER BY title COLLATE NOCASE, id", SELECT_COLUMNS))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(SongRecord::try_from).collect()
    }

    async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
