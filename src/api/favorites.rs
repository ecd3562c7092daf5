use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;

use super::validation::validate_movie_id;
use super::{ApiError, ApiResponse, AppState, FavoriteStatusDto, MovieCardDto};
use crate::models::MovieRecord;

/// `GET /api/favorites`
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<MovieCardDto>>> {
    let favorites = state.favorites().lock().await;
    let cards = favorites
        .favorites()
        .iter()
        .map(|f| MovieCardDto::from_favorite(f, state.image_base_url()))
        .collect();

    Json(ApiResponse::success(cards))
}

/// `GET /api/favorites/{id}`
pub async fn get_favorite_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FavoriteStatusDto>>, ApiError> {
    let id = validate_movie_id(&id)?;
    let is_favorite = state.favorites().lock().await.is_favorite(&id);

    Ok(Json(ApiResponse::success(FavoriteStatusDto {
        id,
        is_favorite,
        changed: false,
    })))
}

/// `POST /api/favorites`
///
/// Accepts a movie record carrying `id` or `$id`. Adding a movie that is
/// already a favorite is a no-op.
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Json(record): Json<MovieRecord>,
) -> Result<(StatusCode, Json<ApiResponse<FavoriteStatusDto>>), ApiError> {
    let id = record
        .canonical_id()
        .cloned()
        .ok_or_else(|| ApiError::validation("Movie record has no id"))?;

    let added = state.favorites().lock().await.add(record)?;
    if added {
        info!(movie_id = %id, "Favorite added");
    }

    let status = if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(ApiResponse::success(FavoriteStatusDto {
            id,
            is_favorite: true,
            changed: added,
        })),
    ))
}

/// `DELETE /api/favorites/{id}`
///
/// Removing an id that is not a favorite succeeds without changes.
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FavoriteStatusDto>>, ApiError> {
    let id = validate_movie_id(&id)?;
    let removed = state.favorites().lock().await.remove(&id)?;
    if removed {
        info!(movie_id = %id, "Favorite removed");
    }

    Ok(Json(ApiResponse::success(FavoriteStatusDto {
        id,
        is_favorite: false,
        changed: removed,
    })))
}
