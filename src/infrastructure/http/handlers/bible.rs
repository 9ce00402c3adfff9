//! Bible HTTP Handlers

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::{GetPassage, PassageResponse};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PassageRequest {
    pub reference: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// 经文（已分页），查不到返回 404
pub async fn get_passage(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PassageRequest>,
) -> Result<Json<ApiResponse<PassageResponse>>, ApiError> {
    let query = GetPassage::new(req.reference, req.version);
    let passage = state.get_passage_handler.handle(query).await?;
    Ok(Json(ApiResponse::success(passage)))
}
