//! Bulk catalog preload and in-memory search.
//!
//! The preload is a bounded, single-pass batch job: list every item id,
//! partition into batches of 200, fetch details batch by batch on one
//! sequential task, and accumulate into memory. Progress is reported
//! after each batch. A failing batch abandons the remaining ones and the
//! partial accumulation becomes the catalog; nothing is persisted.

use crate::api::{ApiError, ItemSource, MAX_IDS_PER_REQUEST};
use crate::models::Item;

/// Ids fetched per batch, matching the API's per-request limit.
pub const BATCH_SIZE: usize = MAX_IDS_PER_REQUEST;

/// Options controlling how much of the catalog is preloaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreloadOptions {
    /// Cap on the number of batches fetched; `None` loads everything.
    pub max_batches: Option<usize>,
}

impl PreloadOptions {
    pub fn capped(max_batches: usize) -> Self {
        Self {
            max_batches: Some(max_batches),
        }
    }
}

/// In-memory item collection filled once by [`preload`].
#[derive(Debug, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Linear case-insensitive substring scan over name, category and
    /// subtype. Never performs I/O; a blank query or an unpopulated
    /// catalog yields no results.
    pub fn search(&self, query: &str) -> Vec<&Item> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.items
            .iter()
            .filter(|item| item.matches(&needle))
            .collect()
    }
}

/// Runs the preload against `source`, invoking `progress` with the
/// cumulative item count and the planned total after every batch.
///
/// An id-listing failure yields an empty catalog; a batch failure keeps
/// whatever was fetched before it. Both are logged rather than returned.
pub async fn preload<S, F>(source: &S, options: PreloadOptions, mut progress: F) -> Catalog
where
    S: ItemSource + ?Sized,
    F: FnMut(usize, usize),
{
    let ids = match source.item_ids().await {
        Ok(ids) => ids,
        Err(e) => {
            log_abandoned(&e, "listing item ids failed, catalog left empty");
            return Catalog::default();
        }
    };

    let batches: Vec<&[i32]> = ids
        .chunks(BATCH_SIZE)
        .take(options.max_batches.unwrap_or(usize::MAX))
        .collect();
    let planned: usize = batches.iter().map(|b| b.len()).sum();
    tracing::debug!(
        total_ids = ids.len(),
        batches = batches.len(),
        planned,
        "starting catalog preload"
    );

    let mut items: Vec<Item> = Vec::with_capacity(planned);
    for (index, batch) in batches.iter().enumerate() {
        match source.items_by_ids(batch).await {
            Ok(mut fetched) => {
                items.append(&mut fetched);
                progress(items.len(), planned);
                tracing::debug!(batch = index + 1, loaded = items.len(), planned, "batch done");
            }
            Err(e) => {
                log_abandoned(&e, "batch fetch failed, keeping partial catalog");
                break;
            }
        }
    }

    Catalog::new(items)
}

fn log_abandoned(error: &ApiError, message: &str) {
    tracing::warn!(error = %error, "{}", message);
}
