use serde::{Deserialize, Serialize};

/// A recipe extracted from a webpage, before any parsing of the
/// individual ingredient lines.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Recipe {
    pub name: String,
    pub description: String,
    pub image: Vec<String>,
    /// Raw ingredient lines exactly as published.
    pub ingredients: Vec<String>,
    pub instructions: String,
    /// The published yield, e.g. "4 servings" or "Makes 12 muffins".
    pub yields: String,
    pub total_time_minutes: Option<u32>,
    /// Host of the source URL, e.g. "www.bonappetit.com".
    pub host: String,
}

impl Recipe {
    /// Flatten the recipe into plain text suitable for an LLM prompt.
    pub fn to_prompt_text(&self) -> String {
        let mut out = format!("Recipe: {}\n", self.name);
        if !self.yields.is_empty() {
            out.push_str(&format!("Yields: {}\n", self.yields));
        }
        out.push_str("\nIngredients:\n");
        for line in &self.ingredients {
            out.push_str(&format!("- {}\n", line));
        }
        if !self.instructions.is_empty() {
            out.push_str(&format!("\nInstructions:\n{}\n", self.instructions));
        }
        out
    }
}

/// Result of parsing the leading quantity expression of a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedAmount {
    /// Numeric value of the recognized token; 0 when none was found.
    pub value: f64,
    /// Text following the recognized token, trimmed.
    pub remainder: String,
}

/// An ingredient line split into amount, unit and name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedIngredient {
    pub original: String,
    pub amount: f64,
    /// Lowercased unit token, or empty when no known unit matched.
    pub unit: String,
    pub name: String,
    /// `name` with parenthetical notes and comma suffix removed,
    /// used as the store search query.
    pub search_name: String,
}

/// A parsed ingredient together with its amount scaled to the
/// target servings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledIngredient {
    #[serde(flatten)]
    pub ingredient: ParsedIngredient,
    pub scaled_amount: f64,
}

/// The fully assembled shopping list for one recipe.
#[derive(Debug, Clone, Serialize)]
pub struct ShoppingList {
    pub recipe: Recipe,
    pub original_servings: u32,
    pub target_servings: u32,
    pub items: Vec<ScaledIngredient>,
}

/// Structured recipe analysis returned by an LLM provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecipeAnalysis {
    pub recipe_name: String,
    #[serde(default)]
    pub original_servings: Option<u32>,
    #[serde(default)]
    pub ingredients: Vec<AnalyzedIngredient>,
}

/// One ingredient as categorized by the LLM.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyzedIngredient {
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
    /// One of: produce, dairy, meat, seafood, pantry, spices, frozen, bakery.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub notes: String,
}
