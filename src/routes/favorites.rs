use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{FavoritesList, MovieId, MovieSummary},
    routes::AppState,
};

/// Get all favorites in insertion order
pub async fn list(State(state): State<Arc<AppState>>) -> Json<FavoritesList> {
    Json(state.favorites.list().await)
}

/// Append a favorite
pub async fn add(
    State(state): State<Arc<AppState>>,
    Json(movie): Json<MovieSummary>,
) -> AppResult<(StatusCode, Json<FavoritesList>)> {
    if movie.id.as_str().is_empty() {
        return Err(AppError::InvalidInput(
            "Favorite must carry an imdbID".to_string(),
        ));
    }

    let favorites = state.favorites.add(movie).await?;
    Ok((StatusCode::CREATED, Json(favorites)))
}

/// Remove every favorite with the given identifier
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<FavoritesList>> {
    let favorites = state.favorites.remove_id(&MovieId::from(id)).await?;
    Ok(Json(favorites))
}
