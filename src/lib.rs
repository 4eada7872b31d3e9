//! Turn a recipe URL into a scaled shopping list.
//!
//! The pipeline fetches the page, extracts the recipe (JSON-LD first,
//! microdata as fallback), parses each ingredient line into amount,
//! unit and name, scales the amounts to the requested servings and
//! renders a markdown or JSON shopping list with store search links.
//!
//! An optional LLM analysis pass (OpenAI or Anthropic) can categorize
//! ingredients when an API key is configured; the regex-based core
//! works offline and is the default.

pub mod amount;
pub mod ingredient;
pub mod render;
pub mod scale;

mod builder;
mod config;
mod error;
mod extractors;
mod fetchers;
mod model;
mod providers;

use std::time::Duration;

use log::debug;
use scraper::Html;

use crate::extractors::{Extractor, JsonLdExtractor, MicroDataExtractor, ParsingContext};
use crate::fetchers::RequestFetcher;

pub use crate::builder::{CartResult, OutputMode, RecipeCart, RecipeCartBuilder};
pub use crate::config::{AiConfig, ProviderConfig};
pub use crate::error::ImportError;
pub use crate::ingredient::parse_ingredient_line;
pub use crate::model::{
    AnalyzedIngredient, ParsedAmount, ParsedIngredient, Recipe, RecipeAnalysis, ScaledIngredient,
    ShoppingList,
};
pub use crate::providers::{
    AnthropicProvider, LlmProvider, OpenAIProvider, ProviderFactory, RECIPE_ANALYZER_PROMPT,
};

/// Fetch a URL and extract the recipe on it.
///
/// Extractors are tried in order: JSON-LD, then microdata. The first
/// one that produces a recipe wins.
pub async fn fetch_recipe(url: &str) -> Result<Recipe, ImportError> {
    fetch_recipe_with_timeout(url, None).await
}

/// Like [`fetch_recipe`] with an explicit HTTP timeout.
pub async fn fetch_recipe_with_timeout(
    url: &str,
    timeout: Option<Duration>,
) -> Result<Recipe, ImportError> {
    let fetcher = RequestFetcher::new(timeout);
    let body = fetcher.fetch(url).await?;

    let context = ParsingContext {
        url: url.to_string(),
        document: Html::parse_document(&body),
    };

    let extractors: Vec<Box<dyn Extractor>> =
        vec![Box::new(JsonLdExtractor), Box::new(MicroDataExtractor)];

    for extractor in extractors {
        match extractor.parse(&context) {
            Ok(recipe) => {
                debug!("{:#?}", recipe);
                return Ok(recipe);
            }
            Err(err) => debug!("Extractor failed: {}", err),
        }
    }

    Err(ImportError::NoExtractorMatched)
}

/// Parse and scale a recipe's ingredient lines into a shopping list.
///
/// The original serving count is read from the recipe's yields string,
/// defaulting to 4 when it cannot be determined.
pub fn build_shopping_list(recipe: &Recipe, target_servings: u32) -> ShoppingList {
    let original_servings = scale::extract_servings(&recipe.yields);

    let parsed: Vec<ParsedIngredient> = recipe
        .ingredients
        .iter()
        .map(|line| parse_ingredient_line(line))
        .collect();

    let items = scale::scale_ingredients(&parsed, original_servings, target_servings);

    ShoppingList {
        recipe: recipe.clone(),
        original_servings,
        target_servings,
        items,
    }
}

/// Full pipeline: fetch, extract, parse and scale.
pub async fn process_recipe(
    url: &str,
    target_servings: u32,
) -> Result<ShoppingList, ImportError> {
    let recipe = fetch_recipe(url).await?;
    Ok(build_shopping_list(&recipe, target_servings))
}

/// Run the configured LLM provider over an extracted recipe and return
/// its structured analysis. Requires a provider to be configured via
/// config.toml or RECIPE_CART environment variables.
pub async fn analyze_recipe(recipe: &Recipe) -> Result<RecipeAnalysis, ImportError> {
    let config = AiConfig::load()?;
    let provider = ProviderFactory::get_default_provider(&config)?;
    let raw = provider.analyze(&recipe.to_prompt_text()).await?;
    providers::parse_analysis(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recipe() -> Recipe {
        Recipe {
            name: "Test Bake".to_string(),
            ingredients: vec![
                "2 cups flour".to_string(),
                "½ tsp salt".to_string(),
                "butter for greasing".to_string(),
            ],
            yields: "4 servings".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_shopping_list_scales_from_yields() {
        let list = build_shopping_list(&sample_recipe(), 8);
        assert_eq!(list.original_servings, 4);
        assert_eq!(list.target_servings, 8);
        assert_eq!(list.items.len(), 3);
        assert_eq!(list.items[0].scaled_amount, 4.0);
        assert_eq!(list.items[1].scaled_amount, 1.0);
        assert_eq!(list.items[2].scaled_amount, 0.0);
    }

    #[test]
    fn test_build_shopping_list_defaults_unknown_yields() {
        let mut recipe = sample_recipe();
        recipe.yields = String::new();
        let list = build_shopping_list(&recipe, 8);
        assert_eq!(list.original_servings, 4);
    }

    #[test]
    fn test_recipe_prompt_text() {
        let text = sample_recipe().to_prompt_text();
        assert!(text.contains("Recipe: Test Bake"));
        assert!(text.contains("- 2 cups flour"));
        assert!(text.contains("Yields: 4 servings"));
    }
}
