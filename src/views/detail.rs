use minijinja::context;
use serde::Serialize;

use crate::{
    error::AppResult,
    models::{MovieDetail, MovieId},
    services::MovieProvider,
    views::Templates,
};

/// What the detail page currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Box<MovieDetail>),
}

/// Handle for one detail fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    id: MovieId,
}

impl LoadTicket {
    pub fn id(&self) -> &MovieId {
        &self.id
    }
}

/// State behind the detail page
///
/// Every `begin_load` supersedes the previous fetch: its response, whenever
/// it arrives, is discarded. A failed fetch leaves the page loading; visiting
/// the page again is the retry.
#[derive(Debug)]
pub struct DetailView {
    generation: u64,
    active_id: Option<MovieId>,
    state: DetailState,
}

impl Default for DetailView {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailView {
    pub fn new() -> Self {
        Self {
            generation: 0,
            active_id: None,
            state: DetailState::Loading,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn active_id(&self) -> Option<&MovieId> {
        self.active_id.as_ref()
    }

    /// Makes `id` the active title and resets to loading
    pub fn begin_load(&mut self, id: MovieId) -> LoadTicket {
        self.generation += 1;
        self.active_id = Some(id.clone());
        self.state = DetailState::Loading;
        LoadTicket {
            generation: self.generation,
            id,
        }
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Applies a finished fetch, returning whether it was used
    pub fn complete(&mut self, ticket: &LoadTicket, result: AppResult<MovieDetail>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(movie_id = %ticket.id, "Dropping response for a stale title");
            return false;
        }

        match result {
            Ok(detail) => {
                self.state = DetailState::Loaded(Box::new(detail));
                true
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    kind = ?e.kind(),
                    movie_id = %ticket.id,
                    "Error fetching movie details"
                );
                false
            }
        }
    }

    /// Fetches `id` and applies the result
    pub async fn load(&mut self, provider: &dyn MovieProvider, id: MovieId) {
        let ticket = self.begin_load(id);
        let result = provider.fetch_movie(ticket.id()).await;
        self.complete(&ticket, result);
    }

    /// Detail page for the current state
    pub fn render(&self, templates: &Templates) -> AppResult<String> {
        let movie = match &self.state {
            DetailState::Loaded(detail) => Some(DetailPage::from(detail.as_ref())),
            DetailState::Loading => None,
        };
        templates.render("detail.html", context! { movie })
    }

    /// Detail page as seen by the request holding `ticket`
    ///
    /// A superseded ticket renders the loading page rather than another title.
    pub fn render_for(&self, ticket: &LoadTicket, templates: &Templates) -> AppResult<String> {
        if self.is_current(ticket) {
            self.render(templates)
        } else {
            templates.render("detail.html", context! { movie => None::<DetailPage> })
        }
    }
}

#[derive(Debug, Serialize)]
struct DetailPage<'a> {
    title: &'a str,
    image: Option<&'a str>,
    plot: &'a str,
    year: &'a str,
    genre: &'a str,
    /// Extra labelled fields, only those the record actually carries
    facts: Vec<(&'static str, &'a str)>,
}

impl<'a> From<&'a MovieDetail> for DetailPage<'a> {
    fn from(detail: &'a MovieDetail) -> Self {
        let facts = [
            ("Rated", detail.rated.as_str()),
            ("Released", detail.released.as_str()),
            ("Runtime", detail.runtime.as_str()),
            ("Director", detail.director.as_str()),
            ("Writer", detail.writer.as_str()),
            ("Actors", detail.actors.as_str()),
            ("Language", detail.language.as_str()),
            ("Country", detail.country.as_str()),
            ("Awards", detail.awards.as_str()),
            ("IMDb Rating", detail.imdb_rating.as_str()),
            ("Box Office", detail.box_office.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty() && *value != "N/A")
        .collect();

        Self {
            title: &detail.summary.title,
            image: detail.summary.poster_url(),
            plot: &detail.plot,
            year: &detail.summary.year,
            genre: &detail.genre,
            facts,
        }
    }
}
