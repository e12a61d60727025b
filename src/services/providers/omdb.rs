/// OMDb API provider
///
/// Both lookups hit the same endpoint and differ only in the query parameter:
/// 1. Title Search: `?s={query}` → `Search` array of summaries
/// 2. Detail: `?i={imdb_id}` → one full record
///
/// OMDb answers HTTP 200 even for misses and signals them with an `Error`
/// field, so a miss is "no results" for search and a blank record for detail.
use crate::{
    error::{AppError, AppResult},
    models::{MovieDetail, MovieId, MovieSummary, OmdbSearchResponse},
    services::providers::MovieProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self::with_client(HttpClient::new(), api_key, api_url)
    }

    pub fn with_client(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/", self.api_url.trim_end_matches('/'))
    }

    /// Issues one GET against the endpoint and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(&self, param: &str, value: &str) -> AppResult<T> {
        let response = self
            .http_client
            .get(self.endpoint())
            .query(&[("apikey", self.api_key.as_str()), (param, value)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize OMDb response"
            );
            AppError::Parse(e)
        })
    }
}

#[async_trait::async_trait]
impl MovieProvider for OmdbProvider {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        if query.is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let response: OmdbSearchResponse = self.get_json("s", query).await?;

        if let Some(error) = &response.error {
            tracing::debug!(query = %query, error = %error, "OMDb search returned no matches");
        }

        let movies = response.into_matches();

        tracing::info!(
            query = %query,
            results = movies.len(),
            provider = "omdb",
            "Movie search completed"
        );

        Ok(movies)
    }

    async fn fetch_movie(&self, id: &MovieId) -> AppResult<MovieDetail> {
        let detail: MovieDetail = self.get_json("i", id.as_str()).await?;

        if let Some(error) = &detail.error {
            tracing::warn!(movie_id = %id, error = %error, "OMDb returned an error-shaped record");
        }

        tracing::info!(
            movie_id = %id,
            title = %detail.summary.title,
            provider = "omdb",
            "Movie details fetched"
        );

        Ok(detail)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
