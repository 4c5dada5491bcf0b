//! # Grocery List Derivation
//!
//! Builds grocery-list entries from matcher output and from the typical-order
//! template. The grocery list store itself is an external collaborator: these
//! functions read its current entries and return the entries it should write.

use crate::ingredient_model::{MatchedIngredient, Unit};
use crate::matcher::select_missing_for_append;
use crate::normalize::normalize;
use crate::pantry::{full_pantry_identity, ItemCategory, PantryItem};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;
use uuid::Uuid;

/// Where a grocery entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrocerySource {
    /// Derived from the typical order; rebuilt on every regeneration
    Auto,
    Manual,
    /// Missing ingredient of a saved recipe
    Recipe,
    /// Pantry item that ran out
    Out,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryEntry {
    pub id: String,
    pub name: String,
    pub normalized_name: String,
    pub quantity: f64,
    pub unit: Unit,
    pub category: ItemCategory,
    pub source: GrocerySource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_recipe_id: Option<String>,
    #[serde(default)]
    pub checked: bool,
}

impl GroceryEntry {
    /// A manually added entry
    pub fn manual(name: &str, quantity: f64, unit: Unit, category: ItemCategory) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            normalized_name: normalize(name),
            quantity,
            unit,
            category,
            source: GrocerySource::Manual,
            source_recipe_id: None,
            checked: false,
        }
    }

    fn from_recipe_ingredient(ingredient: &MatchedIngredient, recipe_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: ingredient.name.clone(),
            normalized_name: ingredient.normalized_name.clone(),
            quantity: ingredient.quantity.unwrap_or(1.0),
            unit: ingredient.unit,
            category: ItemCategory::Other,
            source: GrocerySource::Recipe,
            source_recipe_id: Some(recipe_id.to_string()),
            checked: false,
        }
    }
}

/// An item the household usually buys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypicalOrderItem {
    pub name: String,
    pub normalized_name: String,
    pub quantity: f64,
    pub unit: Unit,
    pub category: ItemCategory,
}

impl TypicalOrderItem {
    pub fn new(name: &str, quantity: f64, unit: Unit, category: ItemCategory) -> Self {
        Self {
            name: name.to_string(),
            normalized_name: normalize(name),
            quantity,
            unit,
            category,
        }
    }
}

/// Normalized names of the entries already derived from `recipe_id`
pub fn recipe_entry_names(existing: &[GroceryEntry], recipe_id: &str) -> HashSet<String> {
    existing
        .iter()
        .filter(|entry| entry.source_recipe_id.as_deref() == Some(recipe_id))
        .map(|entry| entry.normalized_name.clone())
        .collect()
}

/// New entries for the recipe's ingredients that are neither in the pantry nor
/// already on the list for this recipe. Running it again with the returned
/// entries added to `existing` yields nothing.
pub fn missing_for_recipe(
    ingredients: &[MatchedIngredient],
    recipe_id: &str,
    existing: &[GroceryEntry],
) -> Vec<GroceryEntry> {
    let already_present = recipe_entry_names(existing, recipe_id);
    let entries: Vec<GroceryEntry> = select_missing_for_append(ingredients, &already_present)
        .into_iter()
        .map(|ingredient| GroceryEntry::from_recipe_ingredient(ingredient, recipe_id))
        .collect();

    info!(recipe_id, added = entries.len(), "Derived missing recipe ingredients");
    entries
}

/// Rebuild the grocery list: typical-order items absent from the pantry become
/// fresh `auto` entries, followed by the current manual, recipe and out entries
/// with their checked state intact.
pub fn regenerate(
    typical: &[TypicalOrderItem],
    pantry: &[PantryItem],
    current: &[GroceryEntry],
) -> Vec<GroceryEntry> {
    let identity = full_pantry_identity(pantry);

    let auto = typical
        .iter()
        .filter(|item| !identity.contains(&item.normalized_name))
        .map(|item| GroceryEntry {
            id: Uuid::new_v4().to_string(),
            name: item.name.clone(),
            normalized_name: item.normalized_name.clone(),
            quantity: item.quantity,
            unit: item.unit,
            category: item.category,
            source: GrocerySource::Auto,
            source_recipe_id: None,
            checked: false,
        });
    let preserved = current
        .iter()
        .filter(|entry| entry.source != GrocerySource::Auto)
        .cloned();

    let list: Vec<GroceryEntry> = auto.chain(preserved).collect();
    info!(entries = list.len(), "Regenerated grocery list");
    list
}
