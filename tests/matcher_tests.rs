#[cfg(test)]
mod tests {
    use pantry::grocery::{missing_for_recipe, regenerate, GroceryEntry, GrocerySource, TypicalOrderItem};
    use pantry::ingredient_model::Unit;
    use pantry::matcher::{match_all, rematch, select_missing_for_append};
    use pantry::pantry::{full_pantry_identity, in_stock_pantry_identity, ItemCategory, PantryItem};
    use std::collections::HashSet;

    fn inventory() -> Vec<PantryItem> {
        vec![
            PantryItem::new("Eggs", ItemCategory::Dairy),
            PantryItem::new("Plain flour", ItemCategory::Baking),
            PantryItem::new("Butter", ItemCategory::Dairy).out_of_stock(),
        ]
    }

    #[test]
    fn test_matcher_identity() {
        let pantry = full_pantry_identity(&inventory());
        assert!(pantry.contains("egg"));

        let matched = match_all(&["2 large eggs"], &pantry);
        assert_eq!(matched.len(), 1);
        assert!(matched[0].in_pantry);
        assert_eq!(matched[0].normalized_name, "egg");
    }

    #[test]
    fn test_identity_modes_differ_on_stocked_out_items() {
        let items = inventory();
        let full = full_pantry_identity(&items);
        let in_stock = in_stock_pantry_identity(&items);

        assert!(full.contains("butter"));
        assert!(!in_stock.contains("butter"));
        assert_eq!(full.len(), 3);
        assert_eq!(in_stock.len(), 2);

        let lines = ["2 tbsp butter"];
        assert!(match_all(&lines, &full)[0].in_pantry);
        assert!(!match_all(&lines, &in_stock)[0].in_pantry);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let lines: [&str; 0] = [];
        assert!(match_all(&lines, &full_pantry_identity(&inventory())).is_empty());
    }

    #[test]
    fn test_rematch_picks_up_pantry_changes() {
        let before = match_all(&["1 cup sugar", "2 eggs"], &full_pantry_identity(&inventory()));
        assert!(!before[0].in_pantry);

        let mut items = inventory();
        items.push(PantryItem::new("Sugar", ItemCategory::Baking));
        let after = rematch(&before, &full_pantry_identity(&items));

        assert!(after[0].in_pantry);
        assert!(after[1].in_pantry);
        assert_eq!(after[0].raw, "1 cup sugar");
    }

    #[test]
    fn test_select_missing_skips_present_names() {
        let matched = match_all(&["1 cup milk", "2 eggs", "1 tsp vanilla"], &full_pantry_identity(&inventory()));
        let present: HashSet<String> = ["milk".to_string()].into_iter().collect();

        let missing: Vec<&str> = select_missing_for_append(&matched, &present)
            .into_iter()
            .map(|ingredient| ingredient.normalized_name.as_str())
            .collect();
        assert_eq!(missing, vec!["vanilla"]);
    }

    #[test]
    fn test_dedup_idempotence() {
        let matched = match_all(
            &["1 cup milk", "2 eggs", "1 tsp vanilla extract"],
            &full_pantry_identity(&inventory()),
        );
        let mut list: Vec<GroceryEntry> = Vec::new();

        let first = missing_for_recipe(&matched, "recipe-a", &list);
        assert_eq!(first.len(), 2);
        assert!(first.iter().all(|entry| entry.source == GrocerySource::Recipe));
        list.extend(first);

        let second = missing_for_recipe(&matched, "recipe-a", &list);
        assert!(second.is_empty());
    }

    #[test]
    fn test_dedup_is_scoped_per_recipe() {
        let matched = match_all(&["1 cup milk"], &full_pantry_identity(&inventory()));
        let list = missing_for_recipe(&matched, "recipe-a", &[]);

        let other = missing_for_recipe(&matched, "recipe-b", &list);
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].source_recipe_id.as_deref(), Some("recipe-b"));
    }

    #[test]
    fn test_regenerate_keeps_non_auto_entries() {
        let typical = vec![
            TypicalOrderItem::new("Eggs", 12.0, Unit::Count, ItemCategory::Dairy),
            TypicalOrderItem::new("Butter", 1.0, Unit::Count, ItemCategory::Dairy),
            TypicalOrderItem::new("Bananas", 6.0, Unit::Count, ItemCategory::Produce),
        ];
        let mut manual = GroceryEntry::manual("Coffee", 1.0, Unit::Bag, ItemCategory::Beverages);
        manual.checked = true;

        let first = regenerate(&typical, &inventory(), &[manual.clone()]);
        let names: Vec<&str> = first.iter().map(|entry| entry.name.as_str()).collect();
        // butter is stocked out but still counts as held
        assert_eq!(names, vec!["Bananas", "Coffee"]);
        assert!(first[1].checked);

        let second = regenerate(&typical, &inventory(), &first);
        assert_eq!(second.len(), 2);
        assert_eq!(second[1], manual);
    }
}
