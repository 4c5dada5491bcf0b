//! # Ingredient Parser
//!
//! This module splits a raw ingredient line into quantity, unit and name.
//! It is a small hand-written tokenizer with three stages applied left to right:
//!
//! 1. **Quantity scanner**: a leading run of digits, `.`, `/`, spaces and
//!    vulgar-fraction glyphs, optionally followed by `-` and a second run.
//! 2. **Unit matcher**: the next word, when it is a known unit spelling and is
//!    followed by more text. A connective `of` after the unit is skipped.
//! 3. **Name**: whatever remains. The name is required, so when the quantity
//!    would swallow the whole line the scanner gives characters back.
//!
//! Parsing never fails. A line with no structure becomes a name-only ingredient.
//!
//! ## Usage
//!
//! ```rust
//! use pantry::ingredient_parser::parse_ingredient_list;
//!
//! let text = "2 cups flour\n1 tbsp salt\n½ tsp pepper";
//! let parsed = parse_ingredient_list(text);
//!
//! assert_eq!(parsed.len(), 3);
//! assert_eq!(parsed[2].quantity, Some(0.5));
//! ```

use crate::ingredient_model::{ParsedIngredient, Unit};
use crate::lexicon::{self, FRACTION_GLYPHS};
use crate::normalize::normalize;
use std::ops::Range;
use tracing::{debug, trace};

/// Quantity used when the captured quantity text does not evaluate to a positive number
pub const FALLBACK_QUANTITY: f64 = 1.0;

/// Parse every non-empty line of a block of text
pub fn parse_ingredient_list(text: &str) -> Vec<ParsedIngredient> {
    let parsed: Vec<ParsedIngredient> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_ingredient_line)
        .collect();

    debug!(lines = parsed.len(), "Parsed ingredient list");
    parsed
}

/// Parse a single ingredient line
pub fn parse_ingredient_line(line: &str) -> ParsedIngredient {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.contains(['\n', '\r']) {
        return unstructured(line);
    }

    let mut span = QuantitySpan::scan(trimmed);
    while let Some(current) = span.take() {
        if !trimmed[current.end()..].trim_start().is_empty() {
            span = Some(current);
            break;
        }
        span = current.backtrack(trimmed);
    }

    let rest = trimmed[span.as_ref().map_or(0, QuantitySpan::end)..].trim_start();
    let (unit, name) = split_unit(rest);
    let quantity = span.map(|span| evaluate_quantity(&trimmed[..span.end()]));

    trace!(line = trimmed, ?quantity, unit = %unit, name, "Parsed ingredient line");

    ParsedIngredient {
        raw_text: line.to_string(),
        name: name.trim().to_string(),
        normalized_name: normalize(name),
        quantity,
        unit,
    }
}

fn unstructured(line: &str) -> ParsedIngredient {
    debug!(line, "No structure found in ingredient line");
    ParsedIngredient {
        raw_text: line.to_string(),
        name: line.trim().to_string(),
        normalized_name: normalize(line),
        quantity: None,
        unit: Unit::Count,
    }
}

/// Byte extent of the leading quantity in a trimmed line
#[derive(Debug, Clone, PartialEq)]
struct QuantitySpan {
    /// End of the leading run (digits, `.`, `/`, whitespace, glyphs)
    lead_end: usize,
    /// The run following a `-`, if the quantity is written as a range
    range: Option<Range<usize>>,
}

impl QuantitySpan {
    fn scan(line: &str) -> Option<Self> {
        let lead_end = run_length(line, is_lead_char);
        if lead_end == 0 {
            return None;
        }
        let range = scan_range(&line[lead_end..]).map(|run| lead_end + run.start..lead_end + run.end);
        Some(Self { lead_end, range })
    }

    fn end(&self) -> usize {
        self.range.as_ref().map_or(self.lead_end, |run| run.end)
    }

    /// Give back the last character, dropping the range part once it is exhausted.
    fn backtrack(self, line: &str) -> Option<Self> {
        match self.range {
            Some(run) => {
                let last = line[run.clone()].chars().next_back()?.len_utf8();
                let range = (run.len() > last).then(|| run.start..run.end - last);
                Some(Self { lead_end: self.lead_end, range })
            }
            None => {
                let last = line[..self.lead_end].chars().next_back()?.len_utf8();
                let lead_end = self.lead_end - last;
                (lead_end > 0).then_some(Self { lead_end, range: None })
            }
        }
    }
}

fn is_lead_char(c: char) -> bool {
    c.is_whitespace() || is_range_char(c)
}

fn is_range_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '/' || lexicon::is_fraction_glyph(c)
}

fn run_length(text: &str, accept: fn(char) -> bool) -> usize {
    text.char_indices()
        .find(|(_, c)| !accept(*c))
        .map_or(text.len(), |(index, _)| index)
}

/// Locate `\s*-\s*<run>` at the start of `rest`
fn scan_range(rest: &str) -> Option<Range<usize>> {
    let after_dash = rest.trim_start().strip_prefix('-')?;
    let digits = after_dash.trim_start();
    let start = rest.len() - digits.len();
    let len = run_length(digits, is_range_char);
    (len > 0).then(|| start..start + len)
}

/// Split a known unit (and a following `of`) off the front of the remainder
fn split_unit(rest: &str) -> (Unit, &str) {
    if let Some(boundary) = rest.find(char::is_whitespace) {
        if let Some(unit) = lexicon::lookup_unit(&rest[..boundary]) {
            let name = rest[boundary..].trim_start();
            return (unit, strip_connective(name).unwrap_or(name));
        }
    }
    (Unit::Count, rest)
}

fn strip_connective(name: &str) -> Option<&str> {
    let head = name.get(..2)?;
    let tail = &name[2..];
    if head.eq_ignore_ascii_case("of") && tail.starts_with(char::is_whitespace) {
        Some(tail.trim_start())
    } else {
        None
    }
}

/// Evaluate captured quantity text.
///
/// A glyph (`"1½"`) adds its value to the leading number. Otherwise each
/// whitespace-separated token is a decimal or a `num/den` fraction and the
/// tokens are summed (`"2 1/2"` is 2.5). Anything that does not come out as a
/// finite positive number becomes [`FALLBACK_QUANTITY`].
pub fn evaluate_quantity(text: &str) -> f64 {
    let text = text.trim();

    let value = match FRACTION_GLYPHS.iter().find(|(glyph, _)| text.contains(*glyph)) {
        Some(&(glyph, fraction)) => {
            let whole = text.replacen(glyph, "", 1);
            let whole = whole.trim();
            let whole = if whole.is_empty() {
                Some(0.0)
            } else {
                leading_number(whole)
            };
            whole.map(|whole| whole + fraction)
        }
        None => text.split_whitespace().map(token_value).sum::<Option<f64>>(),
    };

    match value {
        Some(value) if value.is_finite() && value > 0.0 => value,
        _ => {
            debug!(quantity = text, "Quantity did not evaluate, using fallback");
            FALLBACK_QUANTITY
        }
    }
}

fn token_value(token: &str) -> Option<f64> {
    if token.contains('/') {
        let mut parts = token.split('/');
        let numerator = leading_number(parts.next()?)?;
        let denominator = leading_number(parts.next()?)?;
        Some(numerator / denominator)
    } else {
        leading_number(token)
    }
}

/// Parse the longest decimal prefix of `text` (`"1-2"` is 1, `"-"` is nothing)
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }
    text[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_ingredient() {
        let result = parse_ingredient_line("2 cups flour");
        assert_eq!(result.name, "flour");
        assert_eq!(result.quantity, Some(2.0));
        assert_eq!(result.unit, Unit::Cups);
    }

    #[test]
    fn test_parse_fraction_ingredient() {
        let result = parse_ingredient_line("1/2 cup sugar");
        assert_eq!(result.name, "sugar");
        assert_eq!(result.quantity, Some(0.5));

        let result = parse_ingredient_line("2 1/4 cups butter");
        assert_eq!(result.name, "butter");
        assert_eq!(result.quantity, Some(2.25));
    }

    #[test]
    fn test_unit_attached_to_number() {
        let result = parse_ingredient_line("500g butter");
        assert_eq!(result.quantity, Some(500.0));
        assert_eq!(result.unit, Unit::Grams);
        assert_eq!(result.name, "butter");
    }

    #[test]
    fn test_connective_of_is_skipped() {
        let result = parse_ingredient_line("2 cans of chickpeas");
        assert_eq!(result.unit, Unit::Can);
        assert_eq!(result.name, "chickpeas");
        assert_eq!(result.normalized_name, "garbanzo bean");
    }

    #[test]
    fn test_unit_without_following_name_is_the_name() {
        let result = parse_ingredient_line("2 cups");
        assert_eq!(result.quantity, Some(2.0));
        assert_eq!(result.unit, Unit::Count);
        assert_eq!(result.name, "cups");
    }

    #[test]
    fn test_quantity_gives_back_characters_for_the_name() {
        let result = parse_ingredient_line("2");
        assert_eq!(result.quantity, None);
        assert_eq!(result.name, "2");

        let result = parse_ingredient_line("1 1/2");
        assert_eq!(result.name, "2");
        assert_eq!(result.quantity, Some(FALLBACK_QUANTITY));

        let result = parse_ingredient_line("1-2");
        assert_eq!(result.name, "-2");
        assert_eq!(result.quantity, Some(1.0));
    }

    #[test]
    fn test_ranges_fold_into_one_expression() {
        let result = parse_ingredient_line("1-2 cups milk");
        assert_eq!(result.quantity, Some(1.0));
        assert_eq!(result.unit, Unit::Cups);
        assert_eq!(result.name, "milk");

        let result = parse_ingredient_line("1 - 2 cups milk");
        assert_eq!(result.quantity, Some(FALLBACK_QUANTITY));
        assert_eq!(result.name, "milk");
    }

    #[test]
    fn test_quantity_evaluation() {
        assert_eq!(evaluate_quantity("2.5"), 2.5);
        assert_eq!(evaluate_quantity("2 1/2 "), 2.5);
        assert_eq!(evaluate_quantity("1½"), 1.5);
        assert_eq!(evaluate_quantity("¾"), 0.75);
        assert_eq!(evaluate_quantity("1/0"), FALLBACK_QUANTITY);
        assert_eq!(evaluate_quantity("0"), FALLBACK_QUANTITY);
        assert_eq!(evaluate_quantity("."), FALLBACK_QUANTITY);
        assert_eq!(evaluate_quantity("1 -2"), FALLBACK_QUANTITY);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("1.5"), Some(1.5));
        assert_eq!(leading_number(".5"), Some(0.5));
        assert_eq!(leading_number("3."), Some(3.0));
        assert_eq!(leading_number("1-2"), Some(1.0));
        assert_eq!(leading_number("1.2.3"), Some(1.2));
        assert_eq!(leading_number("-"), None);
        assert_eq!(leading_number(""), None);
    }

    #[test]
    fn test_parse_ingredient_list_skips_blank_lines() {
        let parsed = parse_ingredient_list("2 cups flour\n\n   \n1 tbsp salt\n");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "flour");
        assert_eq!(parsed[1].unit, Unit::Tablespoons);
    }

    #[test]
    fn test_empty_line_is_unstructured() {
        let result = parse_ingredient_line("   ");
        assert_eq!(result.name, "");
        assert_eq!(result.normalized_name, "");
        assert_eq!(result.quantity, None);
        assert_eq!(result.unit, Unit::Count);
    }
}
