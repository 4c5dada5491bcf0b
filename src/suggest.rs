//! # Recipe Suggestions
//!
//! Ranks directory recipes by how many of their ingredients the pantry holds,
//! in two rounds:
//!
//! 1. **Coarse**: one directory search per key pantry ingredient, all issued
//!    together. Each recipe scores one point per search that returned it.
//! 2. **Fine**: detail lookups for the best-scoring candidates only (at most
//!    `candidate_limit`), then a meal-type filter and a full ingredient match
//!    against the in-stock pantry.
//!
//! A failed lookup in either round contributes nothing; an empty result means
//! "no suggestions", never an error.

use crate::config::SuggestConfig;
use crate::directory::{CandidateDetail, DirectoryIngredient, RecipeDirectory};
use crate::ingredient_model::Recipe;
use crate::matcher::match_all;
use crate::normalize::normalize;
use crate::pantry::{in_stock_pantry_identity, PantryIdentitySet, PantryItem, PantryProvider};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Meal-type filter applied to directory categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    #[default]
    All,
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    /// Directory categories accepted for this meal type, `None` for no filter
    pub fn allowed_categories(&self) -> Option<&'static [&'static str]> {
        match self {
            MealType::All => None,
            MealType::Breakfast => Some(&["Breakfast"]),
            MealType::Lunch => Some(&["Starter", "Side", "Vegetarian", "Vegan", "Pasta", "Miscellaneous"]),
            MealType::Dinner => Some(&["Beef", "Chicken", "Lamb", "Pork", "Seafood", "Goat", "Pasta"]),
        }
    }

    pub fn allows(&self, category: &str) -> bool {
        self.allowed_categories()
            .map_or(true, |allowed| allowed.contains(&category))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::All => "all",
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(MealType::All),
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            other => Err(format!("unknown meal type '{other}'")),
        }
    }
}

/// A directory recipe scored against the pantry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecipe {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub category: String,
    pub ingredients: Vec<DirectoryIngredient>,
    pub match_count: usize,
    pub total_ingredients: usize,
    pub matched_names: Vec<String>,
    pub missing_names: Vec<String>,
}

impl CandidateRecipe {
    fn score(detail: CandidateDetail, pantry: &PantryIdentitySet) -> Self {
        let (matched, missing): (Vec<&DirectoryIngredient>, Vec<&DirectoryIngredient>) = detail
            .ingredients
            .iter()
            .partition(|ingredient| pantry.contains(&normalize(&ingredient.name)));

        let matched_names: Vec<String> = matched.into_iter().map(|i| i.name.clone()).collect();
        let missing_names: Vec<String> = missing.into_iter().map(|i| i.name.clone()).collect();

        Self {
            id: detail.id,
            title: detail.title,
            thumbnail: detail.thumbnail,
            category: detail.category,
            match_count: matched_names.len(),
            total_ingredients: detail.ingredients.len(),
            ingredients: detail.ingredients,
            matched_names,
            missing_names,
        }
    }

    /// Ingredient lines as `"{measure} {name}"`, or the bare name without a measure
    pub fn raw_lines(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .map(|ingredient| {
                if ingredient.measure.is_empty() {
                    ingredient.name.clone()
                } else {
                    format!("{} {}", ingredient.measure, ingredient.name)
                }
            })
            .collect()
    }

    /// Convert into a stored recipe by matching its lines against `pantry`
    pub fn to_recipe(&self, pantry: &PantryIdentitySet) -> Recipe {
        Recipe::new(&self.title, "", match_all(&self.raw_lines(), pantry))
    }
}

/// Names of the in-stock items that seed the coarse round.
///
/// Items are ordered by category priority (meat, seafood, produce, dairy, then
/// the rest); ties keep their pantry order.
pub fn select_key_ingredients(items: &[PantryItem], limit: usize) -> Vec<String> {
    let mut in_stock: Vec<&PantryItem> = items.iter().filter(|item| item.is_in_stock()).collect();
    in_stock.sort_by_key(|item| item.category.search_priority());
    in_stock.into_iter().take(limit).map(|item| item.name.clone()).collect()
}

/// Two-round suggestion scorer over a [`RecipeDirectory`]
pub struct RecipeSuggester<D: RecipeDirectory> {
    directory: D,
    config: SuggestConfig,
}

impl<D: RecipeDirectory> RecipeSuggester<D> {
    pub fn new(directory: D) -> Self {
        Self::with_config(directory, SuggestConfig::default())
    }

    pub fn with_config(directory: D, config: SuggestConfig) -> Self {
        Self { directory, config }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Fetch a pantry snapshot and suggest from it. Only snapshot failures are
    /// returned as errors.
    pub async fn suggest_from_provider<P>(&self, provider: &P, meal_type: MealType) -> anyhow::Result<Vec<CandidateRecipe>>
    where
        P: PantryProvider + ?Sized,
    {
        let items = provider.snapshot().await?;
        Ok(self.suggest(&items, meal_type).await)
    }

    /// Ranked suggestions for `items`, best pantry overlap first
    pub async fn suggest(&self, items: &[PantryItem], meal_type: MealType) -> Vec<CandidateRecipe> {
        let pantry = in_stock_pantry_identity(items);
        let key_ingredients = select_key_ingredients(items, self.config.key_ingredient_limit);
        if key_ingredients.is_empty() {
            info!("No in-stock pantry items, skipping recipe suggestions");
            return Vec::new();
        }

        let candidates = self.coarse_round(&key_ingredients).await;
        if candidates.is_empty() {
            info!(key_ingredients = ?key_ingredients, "Coarse round found no candidates");
            return Vec::new();
        }

        self.fine_round(&candidates, &pantry, meal_type).await
    }

    /// Candidate ids ranked by coarse score, cut to `candidate_limit`
    async fn coarse_round(&self, key_ingredients: &[String]) -> Vec<String> {
        let searches = key_ingredients
            .iter()
            .map(|ingredient| self.directory.search_by_ingredient(ingredient));
        let results = join_all(searches).await;

        // Scores keep first-seen order so equal scores rank deterministically.
        let mut order: Vec<String> = Vec::new();
        let mut scores: HashMap<String, usize> = HashMap::new();
        let mut failed = 0;

        for (ingredient, result) in key_ingredients.iter().zip(results) {
            let summaries = match result {
                Ok(summaries) => summaries,
                Err(e) => {
                    warn!(ingredient = %ingredient, error = %e, "Ingredient search failed, skipping");
                    failed += 1;
                    continue;
                }
            };

            let mut seen = HashSet::new();
            for summary in summaries {
                if !seen.insert(summary.id.clone()) {
                    continue;
                }
                let score = scores.entry(summary.id.clone()).or_insert_with(|| {
                    order.push(summary.id);
                    0
                });
                *score += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = order
            .into_iter()
            .map(|id| {
                let score = scores.get(&id).copied().unwrap_or(0);
                (id, score)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(self.config.candidate_limit);

        info!(
            searches = key_ingredients.len(),
            failed,
            scored = scores.len(),
            kept = ranked.len(),
            "Coarse round completed"
        );
        ranked.into_iter().map(|(id, _)| id).collect()
    }

    async fn fine_round(
        &self,
        candidate_ids: &[String],
        pantry: &PantryIdentitySet,
        meal_type: MealType,
    ) -> Vec<CandidateRecipe> {
        let lookups = candidate_ids.iter().map(|id| self.directory.lookup(id));
        let results = join_all(lookups).await;

        let mut failed = 0;
        let mut suggestions: Vec<CandidateRecipe> = Vec::new();

        for (id, result) in candidate_ids.iter().zip(results) {
            let detail = match result {
                Ok(Some(detail)) => detail,
                Ok(None) => {
                    warn!(candidate = %id, "Candidate not found in directory, skipping");
                    failed += 1;
                    continue;
                }
                Err(e) => {
                    warn!(candidate = %id, error = %e, "Candidate lookup failed, skipping");
                    failed += 1;
                    continue;
                }
            };

            if !meal_type.allows(&detail.category) {
                debug!(candidate = %id, category = %detail.category, meal_type = %meal_type, "Category filtered out");
                continue;
            }

            let candidate = CandidateRecipe::score(detail, pantry);
            if candidate.match_count > 0 {
                suggestions.push(candidate);
            }
        }

        suggestions.sort_by(|a, b| b.match_count.cmp(&a.match_count));

        info!(
            lookups = candidate_ids.len(),
            failed,
            suggestions = suggestions.len(),
            meal_type = %meal_type,
            "Fine round completed"
        );
        suggestions
    }
}
