use serde::{Deserialize, Serialize};

use super::{MovieId, MovieSummary};

/// Ordered list of the user's favorite titles
///
/// Insertion order is preserved. Adding does not deduplicate, so the same
/// identifier can appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesList(Vec<MovieSummary>);

impl FavoritesList {
    /// Creates an empty list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns a new list with `movie` appended at the end
    pub fn with_added(&self, movie: MovieSummary) -> Self {
        let mut movies = self.0.clone();
        movies.push(movie);
        Self(movies)
    }

    /// Returns a new list without any entry carrying `id`
    pub fn without(&self, id: &MovieId) -> Self {
        Self(self.0.iter().filter(|m| &m.id != id).cloned().collect())
    }

    pub fn contains(&self, id: &MovieId) -> bool {
        self.0.iter().any(|m| &m.id == id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MovieSummary> {
        self.0.iter()
    }
}

impl From<Vec<MovieSummary>> for FavoritesList {
    fn from(movies: Vec<MovieSummary>) -> Self {
        Self(movies)
    }
}

impl<'a> IntoIterator for &'a FavoritesList {
    type Item = &'a MovieSummary;
    type IntoIter = std::slice::Iter<'a, MovieSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
