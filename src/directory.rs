//! # Recipe Directory
//!
//! The candidate-recipe directory consumed by the suggestion scorer. It offers
//! a cheap search by a single ingredient name and a detail lookup by id.
//! [`MealDbClient`] implements it over TheMealDB JSON API.

use crate::config::DirectoryConfig;
use crate::lookup_client::LookupClient;
use crate::lookup_errors::LookupError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Highest `strIngredientN` / `strMeasureN` index a meal record carries
pub const MAX_INDEXED_INGREDIENTS: usize = 20;

/// One hit of a search by ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
}

/// Ingredient name and free-text measure as the directory lists them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryIngredient {
    pub name: String,
    pub measure: String,
}

/// Full record of one candidate recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateDetail {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub category: String,
    pub ingredients: Vec<DirectoryIngredient>,
}

impl CandidateDetail {
    /// Build a detail from a raw meal record.
    ///
    /// Ingredients come from the indexed `strIngredient1..20` / `strMeasure1..20`
    /// pairs; blank or missing names are skipped and values are trimmed.
    pub fn from_meal_record(id: &str, meal: &Map<String, Value>) -> Self {
        let ingredients = (1..=MAX_INDEXED_INGREDIENTS)
            .filter_map(|i| {
                let name = text_field(meal, &format!("strIngredient{i}"));
                if name.is_empty() {
                    return None;
                }
                Some(DirectoryIngredient {
                    name: name.to_string(),
                    measure: text_field(meal, &format!("strMeasure{i}")).to_string(),
                })
            })
            .collect();

        Self {
            id: id.to_string(),
            title: text_field(meal, "strMeal").to_string(),
            thumbnail: text_field(meal, "strMealThumb").to_string(),
            category: text_field(meal, "strCategory").to_string(),
            ingredients,
        }
    }
}

/// Trimmed string value of `key`, empty for null, missing or non-string values
fn text_field<'a>(meal: &'a Map<String, Value>, key: &str) -> &'a str {
    meal.get(key).and_then(Value::as_str).map(str::trim).unwrap_or("")
}

/// Candidate-recipe directory used by the suggestion scorer
#[async_trait]
pub trait RecipeDirectory: Send + Sync {
    /// Recipes that use `ingredient`; an unknown ingredient yields an empty list
    async fn search_by_ingredient(&self, ingredient: &str) -> Result<Vec<CandidateSummary>, LookupError>;

    /// Full record for `id`, `None` when the directory does not know it
    async fn lookup(&self, id: &str) -> Result<Option<CandidateDetail>, LookupError>;
}

#[derive(Debug, Deserialize)]
struct FilterResponse {
    meals: Option<Vec<FilterMeal>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterMeal {
    id_meal: String,
    str_meal: Option<String>,
    str_meal_thumb: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    meals: Option<Vec<Map<String, Value>>>,
}

/// TheMealDB client (`/filter.php?i=`, `/lookup.php?i=`)
#[derive(Debug)]
pub struct MealDbClient {
    client: LookupClient,
}

impl MealDbClient {
    pub fn new(config: &DirectoryConfig) -> Result<Self, LookupError> {
        Ok(Self {
            client: LookupClient::new(config)?,
        })
    }
}

#[async_trait]
impl RecipeDirectory for MealDbClient {
    async fn search_by_ingredient(&self, ingredient: &str) -> Result<Vec<CandidateSummary>, LookupError> {
        let response: FilterResponse = self.client.get_json("filter.php", &[("i", ingredient)]).await?;
        let summaries: Vec<CandidateSummary> = response
            .meals
            .unwrap_or_default()
            .into_iter()
            .map(|meal| CandidateSummary {
                id: meal.id_meal,
                name: meal.str_meal.unwrap_or_default(),
                thumbnail: meal.str_meal_thumb.unwrap_or_default(),
            })
            .collect();

        debug!(ingredient, hits = summaries.len(), "Directory search completed");
        Ok(summaries)
    }

    async fn lookup(&self, id: &str) -> Result<Option<CandidateDetail>, LookupError> {
        let response: LookupResponse = self.client.get_json("lookup.php", &[("i", id)]).await?;
        Ok(response
            .meals
            .and_then(|meals| meals.into_iter().next())
            .map(|meal| CandidateDetail::from_meal_record(id, &meal)))
    }
}
