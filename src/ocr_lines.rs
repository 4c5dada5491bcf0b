//! # OCR Line Filtering
//!
//! Turns the raw text an OCR engine read off a recipe card into candidate
//! ingredient lines. Headings, step text and timing/serving lines are dropped;
//! everything else is handed to the matcher as-is.

use crate::ingredient_model::Recipe;
use crate::matcher::match_all;
use crate::pantry::PantryIdentitySet;
use tracing::{debug, info};

/// Lines dropped when they match exactly (case-insensitive)
const HEADINGS: &[&str] = &["ingredients", "ingredients:", "directions", "instructions"];

/// Lines dropped when they start with one of these (case-insensitive)
const SKIPPED_PREFIXES: &[&str] = &[
    "step ",
    "method",
    "serves ",
    "yield",
    "prep time",
    "cook time",
    "total time",
];

/// Whether a trimmed OCR line could be an ingredient
fn is_candidate_line(line: &str) -> bool {
    if line.chars().count() < 2 {
        return false;
    }
    let lower = line.to_lowercase();
    !HEADINGS.contains(&lower.as_str()) && !SKIPPED_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

/// Split OCR output into trimmed candidate ingredient lines, in reading order
pub fn extract_ingredient_lines(text: &str) -> Vec<String> {
    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| is_candidate_line(line))
        .map(str::to_string)
        .collect();

    debug!(total = text.lines().count(), kept = lines.len(), "Filtered OCR lines");
    lines
}

/// Build a recipe from scanned text, matching every kept line against `pantry`
pub fn scan_recipe(title: &str, text: &str, pantry: &PantryIdentitySet) -> Recipe {
    let lines = extract_ingredient_lines(text);
    let recipe = Recipe::new(title.trim(), "", match_all(&lines, pantry));

    info!(
        title = %recipe.title,
        ingredients = recipe.ingredients.len(),
        missing = recipe.missing().count(),
        "Scanned recipe"
    );
    recipe
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: &str = "Pancakes\n\
        Serves 4\n\
        Prep time: 10 min\n\
        INGREDIENTS:\n\
        \n\
        2 cups flour\n\
        x\n\
          3 large eggs  \n\
        1 cup milk\n\
        Directions\n\
        Step 1 whisk everything\n\
        Method: fry in butter\n\
        Yield: 12 pancakes\n";

    #[test]
    fn test_extract_ingredient_lines_drops_noise() {
        let lines = extract_ingredient_lines(CARD);
        assert_eq!(lines, vec!["Pancakes", "2 cups flour", "3 large eggs", "1 cup milk"]);
    }

    #[test]
    fn test_prefix_rules_need_their_space() {
        // "Stepped" and "Servesomething" do not start with "step " / "serves "
        let lines = extract_ingredient_lines("Stepped cheese\nServesomething\nyielding");
        assert_eq!(lines, vec!["Stepped cheese", "Servesomething"]);
    }

    #[test]
    fn test_scan_recipe_matches_pantry() {
        let pantry: PantryIdentitySet = ["egg", "flour"].into_iter().collect();
        let recipe = scan_recipe(" Pancakes ", CARD, &pantry);

        assert_eq!(recipe.title, "Pancakes");
        assert_eq!(recipe.ingredients.len(), 4);
        let missing: Vec<&str> = recipe.missing().map(|i| i.raw.as_str()).collect();
        assert_eq!(missing, vec!["Pancakes", "1 cup milk"]);
    }
}
