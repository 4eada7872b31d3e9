//! Scaling parsed ingredients from the published yield to the
//! requested number of servings.

use regex::Regex;
use std::sync::OnceLock;

use crate::model::{ParsedIngredient, ScaledIngredient};

/// Fallback when the published yield is missing or unparseable.
pub const DEFAULT_ORIGINAL_SERVINGS: u32 = 4;

/// Servings to scale to when the caller does not specify a target.
pub const DEFAULT_TARGET_SERVINGS: u32 = 7;

fn servings_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").unwrap())
}

/// Extract the serving count from a yields string like "4 servings"
/// or "Makes 12 muffins". The first integer found wins; defaults to
/// [`DEFAULT_ORIGINAL_SERVINGS`] when there is none.
pub fn extract_servings(yields: &str) -> u32 {
    servings_re()
        .find(yields)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(DEFAULT_ORIGINAL_SERVINGS)
}

/// Ratio applied to every amount. Guards against a zero original
/// serving count by leaving amounts unchanged.
pub fn scale_factor(original_servings: u32, target_servings: u32) -> f64 {
    if original_servings > 0 {
        target_servings as f64 / original_servings as f64
    } else {
        1.0
    }
}

/// Scale every ingredient by `target / original`. Order is preserved
/// and nothing is dropped or merged; amounts of zero stay zero.
pub fn scale_ingredients(
    ingredients: &[ParsedIngredient],
    original_servings: u32,
    target_servings: u32,
) -> Vec<ScaledIngredient> {
    let factor = scale_factor(original_servings, target_servings);

    ingredients
        .iter()
        .cloned()
        .map(|ingredient| {
            let scaled_amount = if ingredient.amount > 0.0 {
                ingredient.amount * factor
            } else {
                0.0
            };
            ScaledIngredient {
                ingredient,
                scaled_amount,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::parse_ingredient_line;

    fn fixture() -> Vec<ParsedIngredient> {
        [
            "2 cups flour",
            "1 1/2 tsp baking soda",
            "salt to taste",
            "3 eggs",
        ]
        .iter()
        .map(|line| parse_ingredient_line(line))
        .collect()
    }

    #[test]
    fn test_extract_servings() {
        assert_eq!(extract_servings("4 servings"), 4);
        assert_eq!(extract_servings("Makes 12 muffins"), 12);
        assert_eq!(extract_servings("Serves 6-8"), 6);
    }

    #[test]
    fn test_extract_servings_default() {
        assert_eq!(extract_servings(""), DEFAULT_ORIGINAL_SERVINGS);
        assert_eq!(extract_servings("a crowd"), DEFAULT_ORIGINAL_SERVINGS);
    }

    #[test]
    fn test_doubling() {
        let scaled = scale_ingredients(&fixture(), 4, 8);
        assert_eq!(scaled[0].scaled_amount, 4.0);
        assert_eq!(scaled[1].scaled_amount, 3.0);
        assert_eq!(scaled[3].scaled_amount, 6.0);
    }

    #[test]
    fn test_zero_original_servings_leaves_amounts_unchanged() {
        let scaled = scale_ingredients(&fixture(), 0, 8);
        assert_eq!(scaled[0].scaled_amount, 2.0);
        assert_eq!(scaled[1].scaled_amount, 1.5);
    }

    #[test]
    fn test_zero_amounts_stay_zero() {
        let scaled = scale_ingredients(&fixture(), 4, 100);
        assert_eq!(scaled[2].ingredient.amount, 0.0);
        assert_eq!(scaled[2].scaled_amount, 0.0);
    }

    #[test]
    fn test_order_and_count_preserved() {
        let ingredients = fixture();
        let scaled = scale_ingredients(&ingredients, 4, 7);
        assert_eq!(scaled.len(), ingredients.len());
        for (before, after) in ingredients.iter().zip(&scaled) {
            assert_eq!(before.original, after.ingredient.original);
        }
    }

    #[test]
    fn test_scale_factor_guard() {
        assert_eq!(scale_factor(4, 8), 2.0);
        assert_eq!(scale_factor(0, 8), 1.0);
    }
}
