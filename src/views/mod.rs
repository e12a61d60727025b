//! Server-rendered views
//!
//! Each view owns its state (if any) and renders it to HTML through the
//! shared [`Templates`] environment.

use minijinja::Environment;
use serde::Serialize;

use crate::error::AppResult;
use crate::models::MovieSummary;

pub mod detail;
pub mod favorites;
pub mod search;

pub use detail::{DetailState, DetailView, LoadTicket};
pub use search::{SearchTicket, SearchView};

/// Placeholder shown when a search produced nothing
pub const NO_RESULTS: &str = "No movies found. Try another search.";
/// Placeholder shown until a detail record is available
pub const LOADING: &str = "Loading...";
/// Placeholder shown for an empty favorites list
pub const NO_FAVORITES: &str = "No favorites yet.";

const BASE_TEMPLATE: &str = include_str!("templates/base.html");
const SEARCH_TEMPLATE: &str = include_str!("templates/search.html");
const RESULTS_TEMPLATE: &str = include_str!("templates/results.html");
const DETAIL_TEMPLATE: &str = include_str!("templates/detail.html");
const FAVORITES_TEMPLATE: &str = include_str!("templates/favorites.html");

/// Compiled HTML templates
///
/// Template names end in `.html`, which turns on HTML auto-escaping.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> AppResult<Self> {
        let mut env = Environment::new();
        env.add_template("base.html", BASE_TEMPLATE)?;
        env.add_template("search.html", SEARCH_TEMPLATE)?;
        env.add_template("results.html", RESULTS_TEMPLATE)?;
        env.add_template("detail.html", DETAIL_TEMPLATE)?;
        env.add_template("favorites.html", FAVORITES_TEMPLATE)?;
        env.add_global("no_results", NO_RESULTS);
        env.add_global("loading", LOADING);
        env.add_global("no_favorites", NO_FAVORITES);
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> AppResult<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }
}

/// What a template needs to draw one movie card
#[derive(Debug, Serialize)]
pub(crate) struct MovieCard<'a> {
    id: &'a str,
    title: &'a str,
    year: &'a str,
    kind: &'a str,
    /// Raw poster value, echoed back when the card is favorited
    poster: &'a str,
    /// Image to display, absent for the "no image" sentinel
    image: Option<&'a str>,
}

impl<'a> From<&'a MovieSummary> for MovieCard<'a> {
    fn from(movie: &'a MovieSummary) -> Self {
        Self {
            id: movie.id.as_str(),
            title: &movie.title,
            year: &movie.year,
            kind: &movie.kind,
            poster: &movie.poster,
            image: movie.poster_url(),
        }
    }
}

pub(crate) fn cards<'a, I>(movies: I) -> Vec<MovieCard<'a>>
where
    I: IntoIterator<Item = &'a MovieSummary>,
{
    movies.into_iter().map(MovieCard::from).collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{MovieId, MovieSummary};

    pub fn movie(id: &str, title: &str) -> MovieSummary {
        MovieSummary {
            id: MovieId::from(id),
            title: title.to_string(),
            year: "2005".to_string(),
            poster: "N/A".to_string(),
            kind: "movie".to_string(),
        }
    }

    /// Number of rendered movie cards in an HTML document
    pub fn card_count(html: &str) -> usize {
        html.matches(r#"class="movie""#).count()
    }
}
