//! # Pantry
//!
//! Reconciles free-text ingredient descriptions (recipe pages, typed lines,
//! OCR scans, recipe directory records) into canonical names that can be
//! compared against a pantry inventory.
//!
//! - [`normalize`](mod@normalize) collapses plurals, synonyms and modifiers into one key
//! - [`ingredient_parser`] splits a line into quantity, unit and name
//! - [`matcher`] flags pantry membership and dedups derived grocery entries
//! - [`suggest`] ranks directory recipes by pantry overlap in two bounded rounds

pub mod circuit_breaker;
pub mod config;
pub mod directory;
pub mod grocery;
pub mod ingredient_model;
pub mod ingredient_parser;
pub mod lexicon;
pub mod lookup_client;
pub mod lookup_errors;
pub mod matcher;
pub mod normalize;
pub mod ocr_lines;
pub mod pantry;
pub mod recipe_proxy;
pub mod suggest;

pub use ingredient_model::{MatchedIngredient, ParsedIngredient, Recipe, Unit};
pub use ingredient_parser::{parse_ingredient_line, parse_ingredient_list};
pub use lookup_errors::LookupError;
pub use matcher::{match_all, select_missing_for_append};
pub use normalize::normalize;
pub use pantry::{full_pantry_identity, in_stock_pantry_identity, PantryIdentitySet, PantryItem};
pub use suggest::{CandidateRecipe, MealType, RecipeSuggester};
