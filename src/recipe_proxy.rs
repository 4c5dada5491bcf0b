//! # Recipe Proxy Client
//!
//! Client for the HTML-recipe-extraction proxy. The proxy fetches a recipe
//! page and answers `{"recipes": [{title, url, ingredients, ...}]}`; the first
//! recipe is matched against the pantry and returned as a [`Recipe`].

use crate::config::DirectoryConfig;
use crate::ingredient_model::Recipe;
use crate::lookup_client::LookupClient;
use crate::lookup_errors::LookupError;
use crate::matcher::match_all;
use crate::pantry::PantryIdentitySet;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::info;

const NO_RECIPE_MESSAGE: &str = "No recipe found on this page";

/// A recipe as extracted by the proxy, before matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyRecipe {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProxyResponse {
    #[serde(default)]
    recipes: Vec<ProxyRecipe>,
}

#[derive(Debug)]
pub struct RecipeProxyClient {
    client: LookupClient,
}

impl RecipeProxyClient {
    pub fn new(config: &DirectoryConfig) -> Result<Self, LookupError> {
        Ok(Self {
            client: LookupClient::new(config)?,
        })
    }

    /// Ask the proxy for the first recipe found on the page at `url`
    pub async fn fetch_recipe(&self, url: &str) -> Result<ProxyRecipe, LookupError> {
        let page = validate_page_url(url)?;
        let response: ProxyResponse = self.client.get_json("", &[("url", page.as_str())]).await?;

        response
            .recipes
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotFound(NO_RECIPE_MESSAGE.to_string()))
    }

    /// Fetch the recipe at `url` and match its ingredient lines against `pantry`.
    ///
    /// Callers pass the full pantry identity: stocked-out items still count.
    pub async fn import_recipe(&self, url: &str, pantry: &PantryIdentitySet) -> Result<Recipe, LookupError> {
        let fetched = self.fetch_recipe(url).await?;
        let ingredients = match_all(&fetched.ingredients, pantry);
        let recipe = Recipe::new(&fetched.title, url.trim(), ingredients);

        info!(
            title = %recipe.title,
            ingredients = recipe.ingredients.len(),
            missing = recipe.missing().count(),
            "Recipe imported"
        );
        Ok(recipe)
    }
}

fn validate_page_url(url: &str) -> Result<Url, LookupError> {
    let parsed = Url::parse(url.trim()).map_err(|e| LookupError::InvalidUrl(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(LookupError::InvalidUrl(format!("unsupported scheme '{scheme}'"))),
    }
}
