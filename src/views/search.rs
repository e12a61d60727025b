use minijinja::context;

use crate::{
    error::AppResult,
    models::MovieSummary,
    services::MovieProvider,
    views::{cards, Templates},
};

/// Handle for one dispatched search
///
/// Only the most recently issued ticket may update the results; a response
/// arriving for an older one is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// State behind the search page: the typed query and the last result list
#[derive(Debug, Default)]
pub struct SearchView {
    query: String,
    results: Vec<MovieSummary>,
    generation: u64,
}

impl SearchView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[MovieSummary] {
        &self.results
    }

    /// Stores the new query and returns a ticket if a lookup should be made
    ///
    /// An empty query issues nothing and keeps the previous results on screen.
    pub fn on_query_change(&mut self, new_query: impl Into<String>) -> Option<SearchTicket> {
        self.query = new_query.into();
        let query = self.query.clone();
        self.dispatch(query)
    }

    /// Issues a ticket for `query` without touching the stored query
    pub fn dispatch(&mut self, query: String) -> Option<SearchTicket> {
        if query.is_empty() {
            return None;
        }
        self.generation += 1;
        Some(SearchTicket {
            generation: self.generation,
            query,
        })
    }

    /// Applies the outcome of a lookup, returning whether the results changed
    ///
    /// Failures are logged and leave the current results as they were.
    pub fn apply(&mut self, ticket: &SearchTicket, outcome: AppResult<Vec<MovieSummary>>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                query = %ticket.query,
                "Dropping response for a superseded search"
            );
            return false;
        }

        match outcome {
            Ok(movies) => {
                self.results = movies;
                true
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    kind = ?e.kind(),
                    query = %ticket.query,
                    "Error fetching search results"
                );
                false
            }
        }
    }

    /// Runs a lookup for `query` and applies it
    pub async fn search(&mut self, provider: &dyn MovieProvider, query: &str) {
        if let Some(ticket) = self.dispatch(query.to_string()) {
            let outcome = provider.search_movies(ticket.query()).await;
            self.apply(&ticket, outcome);
        }
    }

    /// Stores the new query and, when non-empty, runs the lookup
    pub async fn change_query(&mut self, provider: &dyn MovieProvider, new_query: &str) {
        if let Some(ticket) = self.on_query_change(new_query) {
            let outcome = provider.search_movies(ticket.query()).await;
            self.apply(&ticket, outcome);
        }
    }

    /// Full search page
    pub fn render(&self, templates: &Templates) -> AppResult<String> {
        templates.render(
            "search.html",
            context! {
                query => &self.query,
                movies => cards(&self.results),
            },
        )
    }

    /// Result list only, swapped into the page on every keystroke
    pub fn render_results(&self, templates: &Templates) -> AppResult<String> {
        templates.render(
            "results.html",
            context! {
                movies => cards(&self.results),
            },
        )
    }
}
