//! Splitting raw ingredient lines into amount, unit and name.

use regex::Regex;
use std::sync::OnceLock;

use crate::amount::parse_amount;
use crate::model::ParsedIngredient;

/// Recognized measurement units, anchored at the start of the text that
/// follows the amount. The alternation order is significant: longer
/// spellings must come before conflicting prefixes ("tablespoons"
/// before "tbsp" would not matter, but "l" after "liters" does).
/// Each unit may carry a trailing period ("lbs.") and must be followed
/// by whitespace.
const UNIT_PATTERN: &str = concat!(
    r"(?i)^(",
    r"cups?|tablespoons?|tbsp|teaspoons?|tsp|",
    r"pounds?|lbs?|ounces?|oz|grams?|g|",
    r"kilograms?|kg|milliliters?|ml|liters?|l|",
    r"cloves?|heads?|bunche?s?|pieces?|slices?|",
    r"cans?|jars?|packages?|bags?|boxes?|",
    r"stalks?|sprigs?|pinch(?:es)?|dash(?:es)?|",
    r"small|medium|large|whole",
    r")\.?\s+",
);

fn unit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(UNIT_PATTERN).unwrap())
}

fn paren_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\([^)]*\)").unwrap())
}

/// Parse one raw ingredient line into its components.
///
/// The amount is taken from the front, then a unit token from the fixed
/// vocabulary; whatever remains is the name. Unrecognized input is not
/// an error: the line degrades to amount 0 and an empty unit.
pub fn parse_ingredient_line(raw: &str) -> ParsedIngredient {
    let original = raw.trim().to_string();

    let parsed = parse_amount(&original);
    let amount = parsed.value;
    let rest = parsed.remainder;

    let (unit, name) = match unit_re().captures(&rest) {
        Some(caps) => {
            let unit = caps[1].to_lowercase();
            let end = caps.get(0).map_or(0, |m| m.end());
            (unit, rest[end..].trim().to_string())
        }
        None => (String::new(), rest.clone()),
    };

    let search_name = derive_search_name(&name);

    ParsedIngredient {
        original,
        amount,
        unit,
        name,
        search_name,
    }
}

/// Clean an ingredient name into a store search query: drop
/// parenthetical notes, truncate at the first comma, trim.
fn derive_search_name(name: &str) -> String {
    let stripped = paren_re().replace_all(name, "");
    let stripped = match stripped.find(',') {
        Some(idx) => &stripped[..idx],
        None => &stripped,
    };
    stripped.trim().to_string()
}
