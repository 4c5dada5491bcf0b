//! # Pantry Inventory
//!
//! Inventory records as supplied by the inventory store, and the identity sets
//! built from them. An identity set holds normalized names only and answers
//! "is this ingredient available?".
//!
//! Two constructions exist on purpose:
//!
//! - [`full_pantry_identity`]: every item, whether or not it is flagged out of
//!   stock. Used when annotating recipe ingredients.
//! - [`in_stock_pantry_identity`]: only items not flagged out of stock. Used by
//!   the recipe suggester.

use crate::ingredient_model::Unit;
use crate::normalize::normalize;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info};

/// Inventory categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Produce,
    Dairy,
    Meat,
    Seafood,
    Grains,
    Canned,
    Frozen,
    Snacks,
    Beverages,
    Condiments,
    Baking,
    Spices,
    #[default]
    #[serde(other)]
    Other,
}

impl ItemCategory {
    /// Rank used to choose which pantry items seed a recipe search (lower first)
    pub fn search_priority(&self) -> u8 {
        match self {
            ItemCategory::Meat => 1,
            ItemCategory::Seafood => 2,
            ItemCategory::Produce => 3,
            ItemCategory::Dairy => 4,
            _ => 5,
        }
    }
}

/// One inventory record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub normalized_name: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default)]
    pub category: ItemCategory,
    /// Flagged as used up; still counted by the full identity set
    #[serde(default)]
    pub is_out: bool,
}

fn default_quantity() -> f64 {
    1.0
}

impl PantryItem {
    /// Create an in-stock item, deriving its normalized name
    pub fn new(name: &str, category: ItemCategory) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            normalized_name: normalize(name),
            quantity: default_quantity(),
            unit: Unit::Count,
            category,
            is_out: false,
        }
    }

    /// Flag this item as out of stock
    pub fn out_of_stock(mut self) -> Self {
        self.is_out = true;
        self
    }

    pub fn is_in_stock(&self) -> bool {
        !self.is_out
    }
}

/// The set of normalized names considered available
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PantryIdentitySet {
    names: HashSet<String>,
}

impl PantryIdentitySet {
    pub fn contains(&self, normalized_name: &str) -> bool {
        self.names.contains(normalized_name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for PantryIdentitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Identity set over every inventory item, regardless of its stock flag
pub fn full_pantry_identity(items: &[PantryItem]) -> PantryIdentitySet {
    items
        .iter()
        .map(|item| item.normalized_name.as_str())
        .collect()
}

/// Identity set over the items that are not flagged out of stock
pub fn in_stock_pantry_identity(items: &[PantryItem]) -> PantryIdentitySet {
    items
        .iter()
        .filter(|item| item.is_in_stock())
        .map(|item| item.normalized_name.as_str())
        .collect()
}

/// Source of inventory snapshots
#[async_trait]
pub trait PantryProvider: Send + Sync {
    /// Fetch the current inventory. Failures belong to the store and are
    /// passed through untouched by callers.
    async fn snapshot(&self) -> Result<Vec<PantryItem>>;
}

/// Inventory read from a JSON array of items on disk.
///
/// Items whose `normalizedName` is missing get one derived from their name.
#[derive(Debug, Clone)]
pub struct JsonFilePantry {
    path: PathBuf,
}

impl JsonFilePantry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PantryProvider for JsonFilePantry {
    async fn snapshot(&self) -> Result<Vec<PantryItem>> {
        info!(path = %self.path.display(), "Loading pantry snapshot");

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read pantry file {}", self.path.display()))?;
        let mut items: Vec<PantryItem> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse pantry file {}", self.path.display()))?;

        for item in items.iter_mut().filter(|item| item.normalized_name.is_empty()) {
            item.normalized_name = normalize(&item.name);
            debug!(name = %item.name, normalized = %item.normalized_name, "Derived normalized name");
        }

        Ok(items)
    }
}

/// Inventory held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticPantry {
    items: Vec<PantryItem>,
}

impl StaticPantry {
    pub fn new(items: Vec<PantryItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl PantryProvider for StaticPantry {
    async fn snapshot(&self) -> Result<Vec<PantryItem>> {
        Ok(self.items.clone())
    }
}
