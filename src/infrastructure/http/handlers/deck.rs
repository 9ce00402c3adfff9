//! Deck HTTP Handlers

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::application::GenerateDeck;
use crate::domain::service::ServiceRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成整套崇拜幻灯片，直接返回文件
pub async fn generate_deck(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ServiceRequest>,
) -> Result<Response, ApiError> {
    let deck = state
        .generate_deck_handler
        .handle(GenerateDeck { request })
        .await?;

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", deck.file_name))
        .map_err(|e| ApiError::Internal(format!("Invalid file name: {}", e)))?;

    Response::builder()
        .header(header::CONTENT_TYPE, deck.content_type)
        .header(header::CONTENT_DISPOSITION, disposition)
        .header("x-slide-count", deck.slide_count)
        .body(Body::from(deck.bytes))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
