//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping              GET   健康检查
//! - /api/songs/list        GET   歌曲列表
//! - /api/songs/get         POST  歌曲详情
//! - /api/songs/create      POST  创建歌曲（段落或原始歌词）
//! - /api/songs/update      POST  整体替换歌曲
//! - /api/songs/delete      POST  删除歌曲
//! - /api/bible/passage     POST  经文（已分页）
//! - /api/deck/generate     POST  生成整套幻灯片文件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/songs", song_routes())
        .route("/bible/passage", post(handlers::get_passage))
        .route("/deck/generate", post(handlers::generate_deck))
}

/// Song 路由
fn song_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_songs))
        .route("/get", post(handlers::get_song))
        .route("/create", post(handlers::create_song))
        .route("/update", post(handlers::update_song))
        .route("/delete", post(handlers::delete_song))
}
