//! Song HTTP Handlers

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::{
    CreateSong, DeleteSong, GetSong, ListSongs, SongResponse, UpdateSong,
};
use crate::domain::service::SectionInput;
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SongIdRequest {
    pub id: String,
}

/// 创建 / 更新请求；`sections` 为空时用 `lyrics` 自动分段
#[derive(Debug, Deserialize)]
pub struct SaveSongRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub ccli_number: Option<String>,
    #[serde(default)]
    pub sections: Vec<SectionInput>,
    #[serde(default)]
    pub lyrics: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 歌曲列表（按标题排序）
pub async fn list_songs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<SongResponse>>>, ApiError> {
    let songs = state.list_songs_handler.handle(ListSongs).await?;
    Ok(Json(ApiResponse::success(songs)))
}

/// 歌曲详情
pub async fn get_song(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SongIdRequest>,
) -> Result<Json<ApiResponse<SongResponse>>, ApiError> {
    let song = state.get_song_handler.handle(GetSong { id: req.id }).await?;
    Ok(Json(ApiResponse::success(song)))
}

/// 创建歌曲
pub async fn create_song(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveSongRequest>,
) -> Result<Json<ApiResponse<SongResponse>>, ApiError> {
    let command = CreateSong {
        id: req.id,
        title: req.title,
        artist: req.artist,
        ccli_number: req.ccli_number,
        sections: req.sections,
        lyrics: req.lyrics,
    };

    let song = state.create_song_handler.handle(command).await?;
    Ok(Json(ApiResponse::success(song)))
}

/// 整体替换歌曲
pub async fn update_song(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveSongRequest>,
) -> Result<Json<ApiResponse<SongResponse>>, ApiError> {
    let id = req
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Song id is required".to_string()))?;

    let command = UpdateSong {
        id,
        title: req.title,
        artist: req.artist,
        ccli_number: req.ccli_number,
        sections: req.sections,
        lyrics: req.lyrics,
    };

    let song = state.update_song_handler.handle(command).await?;
    Ok(Json(ApiResponse::success(song)))
}

/// 删除歌曲
pub async fn delete_song(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SongIdRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state.delete_song_handler.handle(DeleteSong { id: req.id }).await?;
    Ok(Json(ApiResponse::ok()))
}
