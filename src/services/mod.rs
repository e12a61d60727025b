pub mod favorites;
pub mod providers;

pub use favorites::FavoritesStore;
pub use providers::{MovieProvider, OmdbProvider};
