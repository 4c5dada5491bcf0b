//! # Pantry Matcher
//!
//! Batch-matches ingredient lines against a pantry identity set, and selects
//! which ingredients still need to be bought without duplicating entries that
//! an earlier run already derived for the same recipe.

use crate::ingredient_model::MatchedIngredient;
use crate::ingredient_parser::parse_ingredient_line;
use crate::pantry::PantryIdentitySet;
use std::collections::HashSet;
use tracing::debug;

/// Parse every line and flag whether its normalized name is in the pantry
pub fn match_all<S: AsRef<str>>(raw_lines: &[S], pantry: &PantryIdentitySet) -> Vec<MatchedIngredient> {
    let matched: Vec<MatchedIngredient> = raw_lines
        .iter()
        .map(|line| {
            let parsed = parse_ingredient_line(line.as_ref());
            let in_pantry = pantry.contains(&parsed.normalized_name);
            parsed.into_matched(in_pantry)
        })
        .collect();

    debug!(
        lines = matched.len(),
        in_pantry = matched.iter().filter(|ingredient| ingredient.in_pantry).count(),
        pantry_size = pantry.len(),
        "Matched ingredients against pantry"
    );
    matched
}

/// Re-run matching over the raw lines of previously matched ingredients,
/// e.g. after the pantry changed.
pub fn rematch(ingredients: &[MatchedIngredient], pantry: &PantryIdentitySet) -> Vec<MatchedIngredient> {
    let raw_lines: Vec<&str> = ingredients.iter().map(|ingredient| ingredient.raw.as_str()).collect();
    match_all(&raw_lines, pantry)
}

/// Ingredients missing from the pantry whose names are not already present.
///
/// `already_present` must hold the normalized names of entries previously
/// derived from the same recipe, so repeated calls add nothing new.
pub fn select_missing_for_append<'a>(
    ingredients: &'a [MatchedIngredient],
    already_present: &HashSet<String>,
) -> Vec<&'a MatchedIngredient> {
    ingredients
        .iter()
        .filter(|ingredient| !ingredient.in_pantry && !already_present.contains(&ingredient.normalized_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient_model::Unit;

    fn pantry(names: &[&str]) -> PantryIdentitySet {
        names.iter().copied().collect()
    }

    #[test]
    fn test_match_all_flags_pantry_items() {
        let matched = match_all(&["2 large eggs", "1 cup sugar"], &pantry(&["egg"]));
        assert_eq!(matched.len(), 2);
        assert!(matched[0].in_pantry);
        assert_eq!(matched[0].quantity, Some(2.0));
        assert!(!matched[1].in_pantry);
        assert_eq!(matched[1].unit, Unit::Cups);
    }

    #[test]
    fn test_match_all_empty_input() {
        let lines: Vec<String> = Vec::new();
        assert!(match_all(&lines, &pantry(&["egg"])).is_empty());
    }

    #[test]
    fn test_rematch_uses_raw_lines() {
        let before = match_all(&["3 tomatoes"], &pantry(&[]));
        assert!(!before[0].in_pantry);

        let after = rematch(&before, &pantry(&["tomatoe"]));
        assert!(after[0].in_pantry);
        assert_eq!(after[0].raw, "3 tomatoes");
    }

    #[test]
    fn test_select_missing_skips_pantry_and_present_names() {
        let matched = match_all(&["2 eggs", "1 cup milk", "2 cups flour"], &pantry(&["egg"]));
        let present: HashSet<String> = ["milk".to_string()].into_iter().collect();

        let missing = select_missing_for_append(&matched, &present);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].normalized_name, "flour");
    }
}
