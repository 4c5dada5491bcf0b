//! # Ingredient Data Model
//!
//! This module defines the data structures produced by the line parser and the
//! matcher. An ingredient line such as `"2 1/2 cups flour"` becomes a
//! [`ParsedIngredient`] carrying the quantity, a canonical [`Unit`] and the name,
//! together with the normalized comparison key used for pantry lookups.
//!
//! ## Usage
//!
//! ```rust
//! use pantry::ingredient_model::Unit;
//! use pantry::ingredient_parser::parse_ingredient_line;
//!
//! let parsed = parse_ingredient_line("2 1/2 cups flour");
//! assert_eq!(parsed.quantity, Some(2.5));
//! assert_eq!(parsed.unit, Unit::Cups);
//! assert_eq!(parsed.name, "flour");
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Canonical quantity units.
///
/// Every accepted spelling (`"tablespoons"`, `"Tbsp"`, ...) collapses to exactly
/// one variant, and each variant serializes to its canonical token. Stored
/// records deserialize through the same spellings; anything unrecognized
/// becomes [`Unit::Count`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum Unit {
    /// No unit was given (`"2 eggs"`)
    #[default]
    #[serde(rename = "count")]
    Count,
    #[serde(rename = "cups")]
    Cups,
    #[serde(rename = "tbsp")]
    Tablespoons,
    #[serde(rename = "tsp")]
    Teaspoons,
    #[serde(rename = "oz")]
    Ounces,
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "lb")]
    Pounds,
    #[serde(rename = "ml")]
    Milliliters,
    #[serde(rename = "l")]
    Liters,
    #[serde(rename = "cloves")]
    Cloves,
    #[serde(rename = "slices")]
    Slices,
    #[serde(rename = "pieces")]
    Pieces,
    #[serde(rename = "bunch")]
    Bunch,
    #[serde(rename = "head")]
    Head,
    #[serde(rename = "can")]
    Can,
    #[serde(rename = "bag")]
    Bag,
    #[serde(rename = "box")]
    Box,
    #[serde(rename = "jar")]
    Jar,
    #[serde(rename = "package")]
    Package,
    #[serde(rename = "pinch")]
    Pinch,
    #[serde(rename = "dash")]
    Dash,
    #[serde(rename = "stalks")]
    Stalks,
    #[serde(rename = "sprigs")]
    Sprigs,
    #[serde(rename = "handfuls")]
    Handfuls,
    #[serde(rename = "sticks")]
    Sticks,
}

impl Unit {
    /// The canonical token for this unit (`"tbsp"`, `"count"`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Count => "count",
            Unit::Cups => "cups",
            Unit::Tablespoons => "tbsp",
            Unit::Teaspoons => "tsp",
            Unit::Ounces => "oz",
            Unit::Grams => "g",
            Unit::Kilograms => "kg",
            Unit::Pounds => "lb",
            Unit::Milliliters => "ml",
            Unit::Liters => "l",
            Unit::Cloves => "cloves",
            Unit::Slices => "slices",
            Unit::Pieces => "pieces",
            Unit::Bunch => "bunch",
            Unit::Head => "head",
            Unit::Can => "can",
            Unit::Bag => "bag",
            Unit::Box => "box",
            Unit::Jar => "jar",
            Unit::Package => "package",
            Unit::Pinch => "pinch",
            Unit::Dash => "dash",
            Unit::Stalks => "stalks",
            Unit::Sprigs => "sprigs",
            Unit::Handfuls => "handfuls",
            Unit::Sticks => "sticks",
        }
    }

    /// Whether this is the fallback unit used when a line names none
    pub fn is_count(&self) -> bool {
        matches!(self, Unit::Count)
    }

    /// Resolve any accepted spelling, falling back to [`Unit::Count`]
    pub fn from_token(token: &str) -> Self {
        crate::lexicon::lookup_unit(token.trim()).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Unit::from_token(&token))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ingredient line split into quantity, unit and name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// The line exactly as it was given to the parser
    pub raw_text: String,

    /// The name portion of the line, trimmed but otherwise untouched
    pub name: String,

    /// Comparison key produced by [`crate::normalize::normalize`]
    pub normalized_name: String,

    /// Positive quantity, `None` when the line carries no quantity
    pub quantity: Option<f64>,

    /// Canonical unit, [`Unit::Count`] when absent
    pub unit: Unit,
}

impl ParsedIngredient {
    /// Annotate this ingredient with its pantry membership
    pub fn into_matched(self, in_pantry: bool) -> MatchedIngredient {
        MatchedIngredient {
            raw: self.raw_text,
            name: self.name,
            normalized_name: self.normalized_name,
            quantity: self.quantity,
            unit: self.unit,
            in_pantry,
        }
    }
}

impl fmt::Display for ParsedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quantity {
            Some(quantity) if self.unit.is_count() => write!(f, "{} {}", quantity, self.name),
            Some(quantity) => write!(f, "{} {} {}", quantity, self.unit, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A parsed ingredient annotated with whether the pantry already holds it.
///
/// Serialized with camelCase keys so stored recipes stay compatible with the
/// records kept by the inventory store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedIngredient {
    pub raw: String,
    pub name: String,
    pub normalized_name: String,
    pub quantity: Option<f64>,
    pub unit: Unit,
    pub in_pantry: bool,
}

/// A recipe whose ingredients have been matched against the pantry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    /// Page the recipe was imported from; empty for scanned or suggested recipes
    #[serde(default)]
    pub url: String,
    pub title: String,
    pub ingredients: Vec<MatchedIngredient>,
}

impl Recipe {
    pub fn new(title: &str, url: &str, ingredients: Vec<MatchedIngredient>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            url: url.to_string(),
            title: title.to_string(),
            ingredients,
        }
    }

    /// Ingredients not flagged as in the pantry
    pub fn missing(&self) -> impl Iterator<Item = &MatchedIngredient> {
        self.ingredients.iter().filter(|ingredient| !ingredient.in_pantry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(quantity: Option<f64>, unit: Unit, name: &str) -> ParsedIngredient {
        ParsedIngredient {
            raw_text: String::new(),
            name: name.to_string(),
            normalized_name: name.to_string(),
            quantity,
            unit,
        }
    }

    #[test]
    fn test_unit_tokens_round_trip_through_serde() {
        let json = serde_json::to_string(&Unit::Tablespoons).unwrap();
        assert_eq!(json, "\"tbsp\"");
        let unit: Unit = serde_json::from_str("\"count\"").unwrap();
        assert_eq!(unit, Unit::Count);
    }

    #[test]
    fn test_unit_deserializes_store_spellings() {
        let units: Vec<Unit> = serde_json::from_str(r#"["l", "Tablespoons", " lbs ", "bottle", ""]"#).unwrap();
        assert_eq!(
            units,
            vec![Unit::Liters, Unit::Tablespoons, Unit::Pounds, Unit::Count, Unit::Count]
        );
    }

    #[test]
    fn test_default_unit_is_count() {
        assert_eq!(Unit::default(), Unit::Count);
        assert!(Unit::default().is_count());
        assert_eq!(Unit::Liters.to_string(), "l");
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(parsed(Some(2.5), Unit::Cups, "flour").to_string(), "2.5 cups flour");
        assert_eq!(parsed(Some(3.0), Unit::Count, "eggs").to_string(), "3 eggs");
        assert_eq!(parsed(None, Unit::Count, "salt").to_string(), "salt");
    }

    #[test]
    fn test_into_matched_keeps_fields() {
        let mut ingredient = parsed(Some(2.0), Unit::Count, "eggs");
        ingredient.raw_text = "2 large eggs".to_string();
        ingredient.normalized_name = "egg".to_string();

        let matched = ingredient.into_matched(true);
        assert_eq!(matched.raw, "2 large eggs");
        assert_eq!(matched.normalized_name, "egg");
        assert!(matched.in_pantry);

        let json = serde_json::to_value(&matched).unwrap();
        assert_eq!(json["inPantry"], serde_json::Value::Bool(true));
        assert_eq!(json["normalizedName"], "egg");
    }

    #[test]
    fn test_recipe_missing_ingredients() {
        let recipe = Recipe::new(
            "Omelette",
            "",
            vec![
                parsed(Some(2.0), Unit::Count, "egg").into_matched(true),
                parsed(None, Unit::Count, "chive").into_matched(false),
            ],
        );
        let missing: Vec<&str> = recipe.missing().map(|i| i.name.as_str()).collect();
        assert_eq!(missing, vec!["chive"]);
        assert!(!recipe.id.is_empty());
    }
}
