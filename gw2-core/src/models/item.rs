use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog item as returned by `/v2/items`.
///
/// The wire field `type` is the item's top-level category ("Weapon",
/// "Armor", "Recipe", ...); the nested details carry the subtype and
/// combat stats where applicable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rarity: String,
    pub level: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ItemDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_types: Option<Vec<String>>,
}

impl Item {
    /// Case-insensitive substring match against name, category and
    /// detail subtype. `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.kind.to_lowercase().contains(needle)
            || self
                .details
                .as_ref()
                .and_then(|d| d.subtype.as_ref())
                .map(|s| s.to_lowercase().contains(needle))
                .unwrap_or(false)
    }

    /// Whether this item is itself a recipe sheet, meaning the recipe
    /// with the same id describes its unlocked ingredients.
    pub fn is_recipe(&self) -> bool {
        self.kind == "Recipe"
    }
}

/// Nested detail block; present for weapons, armor and a few other
/// categories, absent for trophies and the like.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemDetails {
    /// Weapon or armor subtype ("Sword", "Helm", ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_power: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_power: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infix_upgrade: Option<InfixUpgrade>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InfixUpgrade {
    #[serde(default)]
    pub attributes: Vec<ItemAttribute>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemAttribute {
    pub attribute: String,
    pub modifier: i32,
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (#{})", self.name, self.id)?;
        writeln!(f, "{}", "=".repeat(self.name.len()))?;

        match self.details.as_ref().and_then(|d| d.subtype.as_ref()) {
            Some(subtype) => writeln!(f, "Type: {} / {}", self.kind, subtype)?,
            None => writeln!(f, "Type: {}", self.kind)?,
        }
        writeln!(f, "Rarity: {}", self.rarity)?;
        writeln!(f, "Level: {}", self.level)?;

        if let Some(details) = &self.details {
            if let (Some(min), Some(max)) = (details.min_power, details.max_power) {
                match &details.damage_type {
                    Some(damage) => writeln!(f, "Power: {} - {} ({})", min, max, damage)?,
                    None => writeln!(f, "Power: {} - {}", min, max)?,
                }
            }
            if let Some(defense) = details.defense {
                writeln!(f, "Defense: {}", defense)?;
            }
            if let Some(infix) = &details.infix_upgrade {
                for attr in &infix.attributes {
                    writeln!(f, "  +{} {}", attr.modifier, attr.attribute)?;
                }
            }
        }

        Ok(())
    }
}
