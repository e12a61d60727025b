/// Movie data provider abstraction
///
/// A provider answers the two lookups the client needs: a title search and a
/// single-title detail fetch. The OMDb API is the only production source;
/// tests substitute mocks.
use crate::{
    error::AppResult,
    models::{MovieDetail, MovieId, MovieSummary},
};

pub mod omdb;

pub use omdb::OmdbProvider;

/// Trait for movie data providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Search for titles by name
    ///
    /// Returns matches in the order the remote API produced them. A response
    /// without matches yields an empty list, not an error.
    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>>;

    /// Fetch the full record for one title
    async fn fetch_movie(&self, id: &MovieId) -> AppResult<MovieDetail>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
