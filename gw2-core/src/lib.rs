//! GW2 Catalog Client Core Library
//!
//! Shared types and logic for clients of the Guild Wars 2 game-data API:
//! wire models, the HTTP client, the bulk catalog preload with in-memory
//! search, and session state.

pub mod api;
pub mod catalog;
pub mod models;
pub mod session;

pub use api::{ApiError, Gw2Client, ItemSource, DEFAULT_API_URL, MAX_IDS_PER_REQUEST};
pub use catalog::{preload, Catalog, PreloadOptions, BATCH_SIZE};
pub use models::{
    CraftingIngredient, Favorite, InfixUpgrade, Item, ItemAttribute, ItemDetails, Recipe,
    RecipeIngredient,
};
pub use session::{Session, SessionError, SessionStore};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
