//! # Lexicon
//!
//! Fixed word tables shared by the normalizer and the line parser: descriptive
//! modifier words, regional synonyms, the canonical unit vocabulary and the
//! Unicode vulgar-fraction glyphs. The tables are built on first use and never
//! mutated afterwards.

use crate::ingredient_model::Unit;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Descriptive words dropped before two names are compared
pub const MODIFIER_WORDS: &[&str] = &[
    "fresh", "dried", "chopped", "minced", "diced", "sliced", "whole", "ground", "crushed",
    "large", "medium", "small", "organic", "fine", "finely", "coarsely", "roughly", "thinly",
    "thick", "thin", "boneless", "skinless", "raw", "cooked", "frozen", "canned", "packed",
    "loosely", "firmly", "heaping", "level", "flat", "about", "approximately", "optional",
];

/// Regional or alternate phrasing, keyed by underscore-joined normalized words
const SYNONYM_ENTRIES: &[(&str, &str)] = &[
    ("aubergine", "eggplant"),
    ("courgette", "zucchini"),
    ("capsicum", "bell pepper"),
    ("coriander", "cilantro"),
    ("spring_onion", "green onion"),
    ("scallion", "green onion"),
    ("prawn", "shrimp"),
    ("mince", "ground meat"),
    ("rocket", "arugula"),
    ("caster_sugar", "superfine sugar"),
    ("icing_sugar", "powdered sugar"),
    ("confectioners_sugar", "powdered sugar"),
    ("cornstarch", "corn starch"),
    ("bicarbonate_of_soda", "baking soda"),
    ("bicarb", "baking soda"),
    ("plain_flour", "all purpose flour"),
    ("self_raising_flour", "self rising flour"),
    ("double_cream", "heavy cream"),
    ("single_cream", "light cream"),
    ("rapeseed_oil", "canola oil"),
    ("groundnut_oil", "peanut oil"),
    ("clingfilm", "plastic wrap"),
    ("mangetout", "snow pea"),
    ("swede", "rutabaga"),
    ("beetroot", "beet"),
    ("broad_bean", "fava bean"),
    ("chickpea", "garbanzo bean"),
    ("cos_lettuce", "romaine lettuce"),
];

/// Accepted unit spellings (lowercase) and the unit they collapse to
const UNIT_ENTRIES: &[(&str, Unit)] = &[
    ("cup", Unit::Cups),
    ("cups", Unit::Cups),
    ("tbsp", Unit::Tablespoons),
    ("tablespoon", Unit::Tablespoons),
    ("tablespoons", Unit::Tablespoons),
    ("tsp", Unit::Teaspoons),
    ("teaspoon", Unit::Teaspoons),
    ("teaspoons", Unit::Teaspoons),
    ("oz", Unit::Ounces),
    ("ounce", Unit::Ounces),
    ("ounces", Unit::Ounces),
    ("g", Unit::Grams),
    ("gram", Unit::Grams),
    ("grams", Unit::Grams),
    ("kg", Unit::Kilograms),
    ("kilogram", Unit::Kilograms),
    ("kilograms", Unit::Kilograms),
    ("lb", Unit::Pounds),
    ("lbs", Unit::Pounds),
    ("pound", Unit::Pounds),
    ("pounds", Unit::Pounds),
    ("ml", Unit::Milliliters),
    ("milliliter", Unit::Milliliters),
    ("milliliters", Unit::Milliliters),
    ("l", Unit::Liters),
    ("liter", Unit::Liters),
    ("liters", Unit::Liters),
    ("litre", Unit::Liters),
    ("litres", Unit::Liters),
    ("clove", Unit::Cloves),
    ("cloves", Unit::Cloves),
    ("slice", Unit::Slices),
    ("slices", Unit::Slices),
    ("piece", Unit::Pieces),
    ("pieces", Unit::Pieces),
    ("bunch", Unit::Bunch),
    ("bunches", Unit::Bunch),
    ("head", Unit::Head),
    ("heads", Unit::Head),
    ("can", Unit::Can),
    ("cans", Unit::Can),
    ("bag", Unit::Bag),
    ("bags", Unit::Bag),
    ("box", Unit::Box),
    ("boxes", Unit::Box),
    ("jar", Unit::Jar),
    ("jars", Unit::Jar),
    ("package", Unit::Package),
    ("packages", Unit::Package),
    ("pkg", Unit::Package),
    ("pinch", Unit::Pinch),
    ("pinches", Unit::Pinch),
    ("dash", Unit::Dash),
    ("dashes", Unit::Dash),
    ("stalk", Unit::Stalks),
    ("stalks", Unit::Stalks),
    ("sprig", Unit::Sprigs),
    ("sprigs", Unit::Sprigs),
    ("handful", Unit::Handfuls),
    ("handfuls", Unit::Handfuls),
    ("stick", Unit::Sticks),
    ("sticks", Unit::Sticks),
];

/// Vulgar-fraction glyphs in lookup order, with their values
pub const FRACTION_GLYPHS: &[(char, f64)] = &[
    ('\u{00BC}', 0.25),
    ('\u{00BD}', 0.5),
    ('\u{00BE}', 0.75),
    ('\u{2153}', 1.0 / 3.0),
    ('\u{2154}', 2.0 / 3.0),
    ('\u{215B}', 0.125),
    ('\u{215C}', 0.375),
    ('\u{215D}', 0.625),
    ('\u{215E}', 0.875),
];

static MODIFIERS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| MODIFIER_WORDS.iter().copied().collect());

static SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| SYNONYM_ENTRIES.iter().copied().collect());

static UNIT_MAPPINGS: LazyLock<HashMap<&'static str, Unit>> =
    LazyLock::new(|| UNIT_ENTRIES.iter().copied().collect());

pub fn is_modifier(word: &str) -> bool {
    MODIFIERS.contains(word)
}

/// Look up the canonical phrase for an underscore-joined key
pub fn synonym(key: &str) -> Option<&'static str> {
    SYNONYMS.get(key).copied()
}

/// Resolve a unit spelling, case-insensitively
pub fn lookup_unit(word: &str) -> Option<Unit> {
    UNIT_MAPPINGS.get(word.to_lowercase().as_str()).copied()
}

pub fn fraction_value(glyph: char) -> Option<f64> {
    FRACTION_GLYPHS
        .iter()
        .find(|(g, _)| *g == glyph)
        .map(|(_, value)| *value)
}

pub fn is_fraction_glyph(c: char) -> bool {
    fraction_value(c).is_some()
}
