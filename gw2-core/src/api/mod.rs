//! Client for the Guild Wars 2 public game-data API.
//!
//! The API is consumed as-is: GET endpoints for item-id listing, batched
//! item lookup by comma-separated ids, single item lookup, and recipe
//! lookup by id or by output item. The schema is not under this crate's
//! control.

mod client;
mod error;

pub use client::{Gw2Client, DEFAULT_API_URL};
pub use error::ApiError;

use crate::models::Item;
use async_trait::async_trait;

/// The API rejects batched lookups above this many ids per request.
pub const MAX_IDS_PER_REQUEST: usize = 200;

/// Source of item ids and item details.
///
/// Seam between the catalog preloader and the HTTP client so the
/// preload loop can be driven by an in-memory source in tests.
#[async_trait]
pub trait ItemSource {
    /// Lists every item id known to the source.
    async fn item_ids(&self) -> Result<Vec<i32>, ApiError>;

    /// Fetches details for up to [`MAX_IDS_PER_REQUEST`] ids.
    async fn items_by_ids(&self, ids: &[i32]) -> Result<Vec<Item>, ApiError>;
}

#[async_trait]
impl ItemSource for Gw2Client {
    async fn item_ids(&self) -> Result<Vec<i32>, ApiError> {
        Gw2Client::item_ids(self).await
    }

    async fn items_by_ids(&self, ids: &[i32]) -> Result<Vec<Item>, ApiError> {
        Gw2Client::items_by_ids(self, ids).await
    }
}
