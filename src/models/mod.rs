use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::Display;

pub mod favorites;

pub use favorites::FavoritesList;

/// Poster value OMDb uses when it has no image for a title
pub const NO_POSTER: &str = "N/A";

/// Identifier for a title (an IMDb ID such as "tt0372784")
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub String);

impl MovieId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MovieId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A record returned by search
///
/// Field names follow the OMDb wire format, which is also the shape stored
/// for favorites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    #[serde(rename = "imdbID", default, deserialize_with = "lenient_id")]
    pub id: MovieId,
    #[serde(rename = "Title", default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(rename = "Year", default, deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(rename = "Poster", default, deserialize_with = "lenient_string")]
    pub poster: String,
    /// "movie", "series" or "episode"
    #[serde(rename = "Type", default, deserialize_with = "lenient_string")]
    pub kind: String,
}

impl MovieSummary {
    /// Poster URL, or `None` when missing or the "no image" sentinel
    pub fn poster_url(&self) -> Option<&str> {
        match self.poster.as_str() {
            "" | NO_POSTER => None,
            url => Some(url),
        }
    }
}

/// Full record for one title
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    #[serde(rename = "Plot", default, deserialize_with = "lenient_string")]
    pub plot: String,
    #[serde(rename = "Genre", default, deserialize_with = "lenient_string")]
    pub genre: String,
    #[serde(rename = "Rated", default, deserialize_with = "lenient_string")]
    pub rated: String,
    #[serde(rename = "Released", default, deserialize_with = "lenient_string")]
    pub released: String,
    #[serde(rename = "Runtime", default, deserialize_with = "lenient_string")]
    pub runtime: String,
    #[serde(rename = "Director", default, deserialize_with = "lenient_string")]
    pub director: String,
    #[serde(rename = "Writer", default, deserialize_with = "lenient_string")]
    pub writer: String,
    #[serde(rename = "Actors", default, deserialize_with = "lenient_string")]
    pub actors: String,
    #[serde(rename = "Language", default, deserialize_with = "lenient_string")]
    pub language: String,
    #[serde(rename = "Country", default, deserialize_with = "lenient_string")]
    pub country: String,
    #[serde(rename = "Awards", default, deserialize_with = "lenient_string")]
    pub awards: String,
    #[serde(rename = "imdbRating", default, deserialize_with = "lenient_string")]
    pub imdb_rating: String,
    #[serde(rename = "imdbVotes", default, deserialize_with = "lenient_string")]
    pub imdb_votes: String,
    #[serde(rename = "BoxOffice", default, deserialize_with = "lenient_string")]
    pub box_office: String,
    /// Error message OMDb puts in error-shaped bodies
    #[serde(
        rename = "Error",
        default,
        deserialize_with = "lenient_message",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
}

// OMDb sends every field as a string, but a scalar of another type must not
// fail the whole record.

/// Any JSON scalar as text; `null` reads as an empty string
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MovieId, D::Error> {
    lenient_string(deserializer).map(MovieId)
}

fn lenient_message<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

/// Keeps the entries of a `Search` array that read as summaries
///
/// Anything other than an array means no matches.
fn lenient_matches<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<MovieSummary>, D::Error> {
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        other => {
            tracing::debug!(search = %other, "OMDb search field is not an array");
            return Ok(Vec::new());
        }
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(movie) => Some(movie),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable OMDb search entry");
                None
            }
        })
        .collect())
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// Raw response from the OMDb search endpoint (`?s=`)
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Search", default, deserialize_with = "lenient_matches")]
    pub search: Vec<MovieSummary>,
    #[serde(rename = "Error", default, deserialize_with = "lenient_message")]
    pub error: Option<String>,
}

impl OmdbSearchResponse {
    /// Matches carried by the response; anything without a match array is "no results"
    pub fn into_matches(self) -> Vec<MovieSummary> {
        self.search
    }
}
