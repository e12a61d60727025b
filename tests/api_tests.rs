use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

use moviebox::{
    db::{FileStore, KeyValueStore, MemoryStore},
    error::{AppError, AppResult},
    models::{FavoritesList, MovieDetail, MovieId, MovieSummary},
    routes::{create_router, AppState},
    services::{FavoritesStore, MovieProvider},
};

/// Provider answering from canned data; unknown titles fail like a dead network
#[derive(Default)]
struct StubProvider {
    searches: HashMap<String, Vec<MovieSummary>>,
    details: HashMap<String, MovieDetail>,
    search_calls: AtomicUsize,
}

#[async_trait::async_trait]
impl MovieProvider for StubProvider {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.searches.get(query).cloned().unwrap_or_default())
    }

    async fn fetch_movie(&self, id: &MovieId) -> AppResult<MovieDetail> {
        self.details
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| AppError::ExternalApi("connection refused".to_string()))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn movie(id: &str, title: &str, year: &str) -> MovieSummary {
    MovieSummary {
        id: MovieId::from(id),
        title: title.to_string(),
        year: year.to_string(),
        poster: "N/A".to_string(),
        kind: "movie".to_string(),
    }
}

fn stub_provider() -> Arc<StubProvider> {
    let mut provider = StubProvider::default();
    provider.searches.insert(
        "batman".to_string(),
        vec![
            movie("tt0372784", "Batman Begins", "2005"),
            movie("tt1877830", "The Batman", "2022"),
            movie("tt0096895", "Batman", "1989"),
        ],
    );
    provider.details.insert(
        "tt0372784".to_string(),
        MovieDetail {
            summary: movie("tt0372784", "Batman Begins", "2005"),
            plot: "After witnessing his parents' death, Bruce learns the art of fighting.".to_string(),
            genre: "Action, Crime, Drama".to_string(),
            ..Default::default()
        },
    );
    Arc::new(provider)
}

async fn create_test_server_with(
    provider: Arc<StubProvider>,
    storage: Arc<dyn KeyValueStore>,
) -> TestServer {
    let favorites = FavoritesStore::load(storage).await;
    let state = AppState::new(provider, favorites).unwrap();
    TestServer::new(create_router(Arc::new(state))).unwrap()
}

async fn create_test_server() -> TestServer {
    create_test_server_with(stub_provider(), Arc::new(MemoryStore::new())).await
}

fn card_count(html: &str) -> usize {
    html.matches(r#"class="movie""#).count()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let server = create_test_server().await;
    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_search_batman_renders_three_cards() {
    let server = create_test_server().await;

    let response = server.get("/search").add_query_param("q", "batman").await;
    response.assert_status_ok();
    let html = response.text();
    assert_eq!(card_count(&html), 3);
    for id in ["tt0372784", "tt1877830", "tt0096895"] {
        assert!(html.contains(&format!(r#"href="/movie/{}""#, id)));
    }

    // The search page keeps the session's query and results
    let page = server.get("/").await.text();
    assert_eq!(card_count(&page), 3);
    assert!(page.contains(r#"value="batman""#));
}

#[tokio::test]
async fn test_empty_query_keeps_previous_results() {
    let provider = stub_provider();
    let server = create_test_server_with(provider.clone(), Arc::new(MemoryStore::new())).await;

    server.get("/search").add_query_param("q", "batman").await;
    let html = server.get("/search").add_query_param("q", "").await.text();

    assert_eq!(card_count(&html), 3);
    assert_eq!(provider.search_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_search_without_matches_shows_placeholder() {
    let server = create_test_server().await;
    let html = server
        .get("/search")
        .add_query_param("q", "nothing-matches-this")
        .await
        .text();
    assert_eq!(card_count(&html), 0);
    assert!(html.contains("No movies found. Try another search."));
}

#[tokio::test]
async fn test_movie_page_renders_detail() {
    let server = create_test_server().await;
    let response = server.get("/movie/tt0372784").await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("<h2>Batman Begins</h2>"));
    assert!(html.contains("Action, Crime, Drama"));
}

#[tokio::test]
async fn test_movie_page_failure_stays_loading() {
    let server = create_test_server().await;
    let response = server.get("/movie/tt0000000").await;
    response.assert_status_ok();
    assert!(response.text().contains("Loading..."));
}

#[tokio::test]
async fn test_favorites_initially_empty() {
    let server = create_test_server().await;

    let html = server.get("/favorites").await.text();
    assert!(html.contains("No favorites yet."));

    let favorites: FavoritesList = server.get("/api/v1/favorites").await.json();
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn test_add_and_remove_favorite_through_forms() {
    let server = create_test_server().await;

    let response = server
        .post("/favorites")
        .form(&json!({
            "imdbID": "tt0372784",
            "Title": "Batman Begins",
            "Year": "2005",
            "Poster": "N/A",
            "Type": "movie"
        }))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);

    let html = server.get("/favorites").await.text();
    assert_eq!(card_count(&html), 1);
    assert!(html.contains("Batman Begins"));
    assert!(!html.contains("No favorites yet."));

    let response = server.post("/favorites/tt0372784/remove").await;
    response.assert_status(StatusCode::SEE_OTHER);

    let html = server.get("/favorites").await.text();
    assert!(html.contains("No favorites yet."));
}

#[tokio::test]
async fn test_adding_twice_stores_two_entries() {
    let server = create_test_server().await;
    let body = json!({ "imdbID": "tt1877830", "Title": "The Batman", "Year": "2022", "Poster": "N/A" });

    server.post("/api/v1/favorites").json(&body).await;
    let response = server.post("/api/v1/favorites").json(&body).await;
    response.assert_status(StatusCode::CREATED);

    let favorites: FavoritesList = response.json();
    assert_eq!(favorites.len(), 2);

    let response = server.delete("/api/v1/favorites/tt1877830").await;
    response.assert_status_ok();
    let favorites: FavoritesList = response.json();
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn test_add_favorite_without_id_is_rejected() {
    let server = create_test_server().await;
    let response = server
        .post("/api/v1/favorites")
        .json(&json!({ "Title": "Nameless" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_favorites_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let server = create_test_server_with(stub_provider(), Arc::new(FileStore::new(&path))).await;
    for (id, title) in [("tt0096895", "Batman"), ("tt0372784", "Batman Begins")] {
        server
            .post("/api/v1/favorites")
            .json(&json!({ "imdbID": id, "Title": title, "Year": "", "Poster": "N/A" }))
            .await
            .assert_status(StatusCode::CREATED);
    }
    let before: FavoritesList = server.get("/api/v1/favorites").await.json();

    let restarted =
        create_test_server_with(stub_provider(), Arc::new(FileStore::new(&path))).await;
    let after: FavoritesList = restarted.get("/api/v1/favorites").await.json();

    assert_eq!(after, before);
    let ids: Vec<&str> = after.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["tt0096895", "tt0372784"]);
}

#[tokio::test]
async fn test_api_search() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/search").add_query_param("q", "batman").await;
    response.assert_status_ok();
    let movies: Vec<MovieSummary> = response.json();
    assert_eq!(movies.len(), 3);
    assert_eq!(movies[0].title, "Batman Begins");

    let response = server.get("/api/v1/search").add_query_param("q", "").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_api_movie_failure_is_bad_gateway() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/movies/tt0372784").await;
    response.assert_status_ok();
    let detail: MovieDetail = response.json();
    assert_eq!(detail.genre, "Action, Crime, Drama");

    let response = server.get("/api/v1/movies/tt0000000").await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert!(body["error"].is_string());
}
