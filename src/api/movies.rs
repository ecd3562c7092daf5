use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_movie_id, validate_search_query};
use super::{ApiError, ApiResponse, AppState, MovieDetailDto, MovieListDto};

#[derive(Deserialize)]
pub struct MoviesQuery {
    #[serde(default)]
    pub query: Option<String>,
}

/// `GET /api/movies?query=`
///
/// Searches when `query` is non-blank, otherwise lists popular titles.
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MoviesQuery>,
) -> Result<Json<ApiResponse<MovieListDto>>, ApiError> {
    let query = validate_search_query(params.query.as_deref())?;
    let listing = state.discovery().load_movies(query).await?;

    let favorites = state.favorites().lock().await;
    let dto = MovieListDto::new(listing, state.image_base_url(), |id| {
        favorites.is_favorite(id)
    });

    Ok(Json(ApiResponse::success(dto)))
}

/// `GET /api/movies/{id}`
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MovieDetailDto>>, ApiError> {
    let id = validate_movie_id(&id)?;
    let page = state.discovery().movie_page(&id).await?;

    let is_favorite = state.favorites().lock().await.is_favorite(&id);
    let dto = MovieDetailDto::new(page, state.image_base_url(), is_favorite);

    Ok(Json(ApiResponse::success(dto)))
}
