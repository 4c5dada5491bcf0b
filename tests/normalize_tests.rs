#[cfg(test)]
mod tests {
    use pantry::normalize::{depluralize, normalize};
    use regex::Regex;

    fn is_canonical(key: &str) -> bool {
        let shape = Regex::new(r"^[a-z]+( [a-z]+)*$").unwrap();
        key.is_empty() || shape.is_match(key)
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let inputs = [
            "Fresh Coriander, chopped",
            "2 Large EGGS",
            "flour (sifted)",
            "  Spring   Onions ",
            "Jalapeño peppers",
            "½ cup crème fraîche",
            "",
        ];

        for input in inputs {
            let first = normalize(input);
            let second = normalize(input);
            assert_eq!(first, second, "normalize({input:?}) changed between calls");
            assert!(is_canonical(&first), "normalize({input:?}) = {first:?} is not canonical");
        }
    }

    #[test]
    fn test_depluralization() {
        assert_eq!(normalize("large eggs"), "egg");
        assert_eq!(normalize("tomatoes"), "tomatoe");
        assert_eq!(normalize("potatoes"), "potatoe");
        assert_eq!(normalize("cherries"), "cherry");
        assert_eq!(normalize("loaves"), "loaf");
        assert_eq!(normalize("peaches"), "peach");
        assert_eq!(normalize("radishes"), "radish");
        assert_eq!(normalize("boxes"), "box");
        assert_eq!(normalize("glass"), "glass");
        assert_eq!(normalize("asparagus"), "asparagus");
        assert_eq!(normalize("peas"), "pea");
    }

    #[test]
    fn test_short_words_are_never_depluralized() {
        assert_eq!(depluralize("gas"), "gas");
        assert_eq!(depluralize("ves"), "ves");
        assert_eq!(depluralize("bus"), "bus");
    }

    #[test]
    fn test_synonym_substitution() {
        assert_eq!(normalize("aubergine"), "eggplant");
        assert_eq!(normalize("Fresh Coriander, chopped"), "cilantro");
        assert_eq!(normalize("spring onions"), "green onion");
        assert_eq!(normalize("Chickpeas"), "garbanzo bean");
        assert_eq!(normalize("bicarbonate of soda"), "baking soda");
        assert_eq!(normalize("Plain Flour"), "all purpose flour");
    }

    #[test]
    fn test_parentheticals_and_modifiers_are_stripped() {
        assert_eq!(normalize("flour (sifted)"), "flour");
        assert_eq!(normalize("Boneless, Skinless Chicken Thighs"), "chicken thigh");
        assert_eq!(normalize("finely chopped fresh parsley"), "parsley");
        assert_eq!(normalize("about 3 cloves garlic, minced"), "clove garlic");
    }

    #[test]
    fn test_modifiers_only_yield_empty_key() {
        assert_eq!(normalize("fresh, chopped"), "");
        assert_eq!(normalize("(optional)"), "");
        assert_eq!(normalize("123"), "");
    }
}
