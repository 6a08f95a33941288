use std::collections::HashMap;

use clap::Args;

use gw2_core::{Gw2Client, Item};

use super::OutputFormat;

/// Show a recipe with its ingredients resolved to item names.
#[derive(Args)]
pub struct RecipeCommand {
    /// Recipe id
    pub id: i32,

    /// Output format
    #[arg(long, short, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl RecipeCommand {
    pub async fn run(&self, client: &Gw2Client) -> Result<(), Box<dyn std::error::Error>> {
        let recipe = client.recipe(self.id).await?;

        // One batched lookup covers the output item and every ingredient
        let ids = lookup_ids(&recipe);

        let names: HashMap<i32, Item> = match client.items_by_ids(&ids).await {
            Ok(items) => items.into_iter().map(|i| (i.id, i)).collect(),
            Err(e) => {
                tracing::warn!(recipe = self.id, error = %e, "ingredient lookup failed");
                HashMap::new()
            }
        };

        let name_of = |id: i32| {
            names
                .get(&id)
                .map(|i| i.name.clone())
                .unwrap_or_else(|| format!("item #{}", id))
        };

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&recipe)?);
            }
            OutputFormat::Table => {
                println!("Recipe #{} ({})", recipe.id, recipe.kind);
                println!(
                    "Output: {} x {}",
                    recipe.output_item_count,
                    name_of(recipe.output_item_id)
                );
                println!("Ingredients:");
                for ingredient in &recipe.ingredients {
                    println!("  {} x {}", ingredient.count, name_of(ingredient.item_id));
                }
            }
        }

        Ok(())
    }
}

/// Unique ids to resolve for a recipe: its ingredients plus the output
/// item, which may itself appear among the ingredients.
fn lookup_ids(recipe: &gw2_core::Recipe) -> Vec<i32> {
    let mut ids: Vec<i32> = recipe.ingredients.iter().map(|i| i.item_id).collect();
    ids.push(recipe.output_item_id);
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use gw2_core::{Recipe, RecipeIngredient};

    fn recipe_with(output: i32, ingredients: &[i32]) -> Recipe {
        Recipe {
            id: 1,
            kind: "Refinement".into(),
            output_item_id: output,
            output_item_count: 1,
            ingredients: ingredients
                .iter()
                .map(|&item_id| RecipeIngredient { item_id, count: 1 })
                .collect(),
        }
    }

    #[test]
    fn lookup_ids_includes_output_once() {
        // Output item also listed as an ingredient
        let ids = lookup_ids(&recipe_with(20, &[10, 20, 30]));
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn lookup_ids_drops_repeated_ingredients() {
        let ids = lookup_ids(&recipe_with(5, &[10, 30, 10]));
        assert_eq!(ids, vec![5, 10, 30]);
    }
}
