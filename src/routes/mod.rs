use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::AppResult,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{FavoritesStore, MovieProvider},
    views::{DetailView, SearchView, Templates},
};

pub mod favorites;
pub mod movies;
pub mod pages;

/// Shared state for the single user session
pub struct AppState {
    pub provider: Arc<dyn MovieProvider>,
    pub favorites: FavoritesStore,
    pub search: Mutex<SearchView>,
    pub detail: Mutex<DetailView>,
    pub templates: Templates,
}

impl AppState {
    pub fn new(provider: Arc<dyn MovieProvider>, favorites: FavoritesStore) -> AppResult<Self> {
        Ok(Self {
            provider,
            favorites,
            search: Mutex::new(SearchView::new()),
            detail: Mutex::new(DetailView::new()),
            templates: Templates::new()?,
        })
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(page_routes())
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// HTML pages and the form posts they make
fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(pages::search_page))
        .route("/search", get(pages::search_results))
        .route("/movie/:id", get(pages::movie_page))
        .route("/favorites", get(pages::favorites_page).post(pages::add_favorite))
        .route("/favorites/:id/remove", post(pages::remove_favorite))
}

/// JSON API under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", get(movies::search))
        .route("/movies/:id", get(movies::movie))
        .route("/favorites", get(favorites::list).post(favorites::add))
        .route("/favorites/:id", delete(favorites::remove))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
