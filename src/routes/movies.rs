use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{MovieDetail, MovieId, MovieSummary},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

/// Handler for movie search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    if params.q.is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    tracing::info!(request_id = %request_id, query = %params.q, "Processing search request");

    let movies = state.provider.search_movies(&params.q).await?;
    Ok(Json(movies))
}

/// Handler for movie detail endpoint
pub async fn movie(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> AppResult<Json<MovieDetail>> {
    tracing::info!(request_id = %request_id, movie_id = %id, "Processing detail request");

    let detail = state.provider.fetch_movie(&MovieId::from(id)).await?;
    Ok(Json(detail))
}
