use clap::Args;

use gw2_core::Gw2Client;

use super::OutputFormat;

/// Show a single item with its crafting information.
#[derive(Args)]
pub struct ItemCommand {
    /// Item id
    pub id: i32,

    /// Output format
    #[arg(long, short, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl ItemCommand {
    pub async fn run(&self, client: &Gw2Client) -> Result<(), Box<dyn std::error::Error>> {
        let item = client.item(self.id).await?;
        let crafting = client.crafting_ingredients(self.id).await;

        // A recipe sheet's own recipe shares the item id; a failed
        // lookup degrades to an empty ingredient list.
        let recipe_ingredients = if item.is_recipe() {
            match client.recipe(self.id).await {
                Ok(recipe) => Some(recipe.ingredients),
                Err(e) => {
                    tracing::debug!(id = self.id, error = %e, "recipe lookup failed");
                    Some(Vec::new())
                }
            }
        } else {
            None
        };

        match self.format {
            OutputFormat::Json => {
                let payload = serde_json::json!({
                    "item": item,
                    "crafting_ingredients": crafting,
                    "recipe_ingredients": recipe_ingredients,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            }
            OutputFormat::Table => {
                print!("{}", item);

                if !crafting.is_empty() {
                    println!("\nCrafted from:");
                    for ingredient in &crafting {
                        println!("  {}", ingredient);
                    }
                }

                if let Some(ingredients) = &recipe_ingredients {
                    println!("\nRecipe unlocks:");
                    if ingredients.is_empty() {
                        println!("  (no ingredient data)");
                    }
                    for ingredient in ingredients {
                        println!("  {} x item #{}", ingredient.count, ingredient.item_id);
                    }
                }
            }
        }

        Ok(())
    }
}
