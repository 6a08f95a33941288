mod favorite;
mod item;
mod recipe;

pub use favorite::Favorite;
pub use item::{InfixUpgrade, Item, ItemAttribute, ItemDetails};
pub use recipe::{CraftingIngredient, Recipe, RecipeIngredient};
