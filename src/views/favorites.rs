use minijinja::context;

use crate::{
    error::AppResult,
    models::FavoritesList,
    views::{cards, Templates},
};

/// Favorites page for `favorites`
pub fn render(favorites: &FavoritesList, templates: &Templates) -> AppResult<String> {
    templates.render(
        "favorites.html",
        context! {
            movies => cards(favorites),
        },
    )
}
