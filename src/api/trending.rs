use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiResponse, AppState, TrendingDto};

/// `GET /api/trending`
///
/// Analytics failures produce an empty list.
pub async fn get_trending(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<TrendingDto>>> {
    let entries = state.discovery().trending().await;
    Json(ApiResponse::success(TrendingDto::ranked(entries)))
}
