use serde::{Deserialize, Serialize};
use std::fmt;

/// A crafting formula as returned by `/v2/recipes/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub output_item_id: i32,
    pub output_item_count: i32,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeIngredient {
    pub item_id: i32,
    pub count: i32,
}

/// A recipe ingredient with its item details resolved, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CraftingIngredient {
    pub name: String,
    pub icon: String,
    pub count: i32,
}

impl fmt::Display for CraftingIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.count, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_recipe_payload() {
        let json = r#"{
            "id": 7319,
            "type": "RefinementEctoplasm",
            "output_item_id": 46742,
            "output_item_count": 1,
            "disciplines": ["Armorsmith", "Artificer"],
            "ingredients": [
                {"item_id": 19721, "count": 1},
                {"item_id": 46747, "count": 3}
            ]
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.output_item_id, 46742);
        assert_eq!(recipe.output_item_count, 1);
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[1].item_id, 46747);
        assert_eq!(recipe.ingredients[1].count, 3);
    }

    #[test]
    fn crafting_ingredient_display() {
        let ing = CraftingIngredient {
            name: "Glob of Ectoplasm".into(),
            icon: String::new(),
            count: 3,
        };
        assert_eq!(ing.to_string(), "3 x Glob of Ectoplasm");
    }
}
