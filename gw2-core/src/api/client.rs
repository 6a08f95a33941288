use serde::de::DeserializeOwned;

use super::{ApiError, MAX_IDS_PER_REQUEST};
use crate::models::{CraftingIngredient, Item, Recipe};

/// Base URL of the public game-data API.
pub const DEFAULT_API_URL: &str = "https://api.guildwars2.com";

/// HTTP client for the game-data API.
#[derive(Debug, Clone)]
pub struct Gw2Client {
    http: reqwest::Client,
    base_url: String,
}

impl Default for Gw2Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Gw2Client {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Creates a client against a non-default base URL (test servers,
    /// mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: response.status(),
            });
        }
        Ok(response.json().await?)
    }

    /// Lists every item id in the catalog.
    pub async fn item_ids(&self) -> Result<Vec<i32>, ApiError> {
        self.get_json("/v2/items").await
    }

    /// Fetches details for up to 200 items in one request.
    pub async fn items_by_ids(&self, ids: &[i32]) -> Result<Vec<Item>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        if ids.len() > MAX_IDS_PER_REQUEST {
            return Err(ApiError::BatchTooLarge(ids.len()));
        }
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.get_json(&format!("/v2/items?ids={}", joined)).await
    }

    /// Fetches a single item.
    pub async fn item(&self, id: i32) -> Result<Item, ApiError> {
        self.get_json(&format!("/v2/items?id={}", id)).await
    }

    /// Fetches a recipe by its id.
    pub async fn recipe(&self, id: i32) -> Result<Recipe, ApiError> {
        self.get_json(&format!("/v2/recipes/{}", id)).await
    }

    /// Lists ids of recipes whose output is the given item.
    pub async fn recipe_ids_for_output(&self, item_id: i32) -> Result<Vec<i32>, ApiError> {
        self.get_json(&format!("/v2/recipes/search?output={}", item_id))
            .await
    }

    /// Resolves the crafting ingredients for an item, if it has a recipe:
    /// searches recipes by output item, takes the first match, fetches it,
    /// then batch-fetches the ingredient items to pair names and icons
    /// with counts. Any failure along the way degrades to an empty list.
    pub async fn crafting_ingredients(&self, item_id: i32) -> Vec<CraftingIngredient> {
        match self.resolve_crafting_ingredients(item_id).await {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(item_id, error = %e, "failed to resolve crafting ingredients");
                Vec::new()
            }
        }
    }

    async fn resolve_crafting_ingredients(
        &self,
        item_id: i32,
    ) -> Result<Vec<CraftingIngredient>, ApiError> {
        let recipe_ids = self.recipe_ids_for_output(item_id).await?;
        let Some(&recipe_id) = recipe_ids.first() else {
            return Ok(Vec::new());
        };

        let recipe = self.recipe(recipe_id).await?;
        let ingredient_ids: Vec<i32> = recipe.ingredients.iter().map(|i| i.item_id).collect();
        let details = self.items_by_ids(&ingredient_ids).await?;

        // Ingredients without a resolvable item are dropped
        Ok(recipe
            .ingredients
            .iter()
            .filter_map(|ing| {
                details.iter().find(|d| d.id == ing.item_id).map(|d| CraftingIngredient {
                    name: d.name.clone(),
                    icon: d.icon.clone(),
                    count: ing.count,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slashes_from_base_url() {
        let client = Gw2Client::with_base_url("https://api.example.com///");
        assert_eq!(client.base_url(), "https://api.example.com");
    }

    #[tokio::test]
    async fn empty_batch_short_circuits_without_io() {
        // Unroutable base URL: the request would fail if it were sent
        let client = Gw2Client::with_base_url("http://127.0.0.1:1");
        let items = client.items_by_ids(&[]).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn oversized_batch_is_rejected() {
        let client = Gw2Client::with_base_url("http://127.0.0.1:1");
        let ids: Vec<i32> = (0..201).collect();
        let err = client.items_by_ids(&ids).await.unwrap_err();
        assert!(matches!(err, ApiError::BatchTooLarge(201)));
    }
}
