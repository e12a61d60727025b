use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Extension, Form,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{MovieId, MovieSummary},
    routes::AppState,
    views,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Search page with the session's current query and results
pub async fn search_page(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let search = state.search.lock().await;
    Ok(Html(search.render(&state.templates)?))
}

/// Keystroke handler: stores the query, runs the lookup, returns the result list
///
/// Lookup failures are logged by the view and the previous results are
/// returned unchanged.
pub async fn search_results(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Html<String>> {
    // Record the query; an empty one issues no lookup
    let ticket = state.search.lock().await.on_query_change(params.q);

    if let Some(ticket) = ticket {
        tracing::info!(
            request_id = %request_id,
            query = %ticket.query(),
            provider = state.provider.name(),
            "Searching movies"
        );
        // Fetch without holding the view lock
        let outcome = state.provider.search_movies(ticket.query()).await;

        // Dropped if a newer keystroke arrived meanwhile
        state.search.lock().await.apply(&ticket, outcome);
    }

    // Render whatever results the view now holds
    let search = state.search.lock().await;
    Ok(Html(search.render_results(&state.templates)?))
}

/// Detail page for one title
///
/// A failed fetch renders the loading placeholder.
pub async fn movie_page(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    // Start a new load; this supersedes any load still in flight
    let ticket = state.detail.lock().await.begin_load(MovieId::from(id));

    tracing::info!(
        request_id = %request_id,
        movie_id = %ticket.id(),
        "Loading movie details"
    );

    let result = state.provider.fetch_movie(ticket.id()).await;

    // Apply the outcome, then render this request's view of it
    let mut detail = state.detail.lock().await;
    detail.complete(&ticket, result);
    Ok(Html(detail.render_for(&ticket, &state.templates)?))
}

/// Favorites page
pub async fn favorites_page(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let favorites = state.favorites.list().await;
    Ok(Html(views::favorites::render(&favorites, &state.templates)?))
}

/// Favorite button on a search result
///
/// A storage failure is logged by the store and the user lands back on the
/// search page with the list unchanged.
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Form(movie): Form<MovieSummary>,
) -> Redirect {
    // The hidden form always carries an identifier; anything else is ignored
    if movie.id.as_str().is_empty() {
        tracing::warn!("Favorite submitted without an identifier, ignoring");
    } else if let Err(e) = state.favorites.add(movie).await {
        tracing::error!(error = %e, "Failed to add favorite");
    }
    // Back to the search page either way
    Redirect::to("/")
}

/// Remove button on the favorites page
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Redirect {
    if let Err(e) = state.favorites.remove_id(&MovieId::from(id)).await {
        tracing::error!(error = %e, "Failed to remove favorite");
    }
    Redirect::to("/favorites")
}
