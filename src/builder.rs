use std::time::Duration;

use crate::error::ImportError;
use crate::model::ShoppingList;
use crate::scale::DEFAULT_TARGET_SERVINGS;
use crate::{build_shopping_list, fetch_recipe_with_timeout, render};

/// Desired output format for a cart build
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputMode {
    /// Markdown document with shopping table and instructions (default)
    #[default]
    Markdown,
    /// Pretty-printed JSON shopping list
    Json,
    /// The ShoppingList struct itself, for callers doing their own rendering
    List,
}

/// Result of a cart build operation
#[derive(Debug, Clone)]
pub enum CartResult {
    Markdown(String),
    Json(String),
    List(ShoppingList),
}

/// Builder for configuring and executing a recipe-to-shopping-list run
///
/// # Example
/// ```no_run
/// # use recipe_cart::RecipeCart;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let result = RecipeCart::builder()
///     .url("https://example.com/recipe")
///     .servings(8)
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct RecipeCartBuilder {
    url: Option<String>,
    servings: Option<u32>,
    timeout: Option<Duration>,
    mode: OutputMode,
}

impl RecipeCartBuilder {
    /// Set the recipe URL to import
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the target number of servings (default: 7)
    pub fn servings(mut self, servings: u32) -> Self {
        self.servings = Some(servings);
        self
    }

    /// Set a timeout for HTTP requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Produce a markdown document (default)
    pub fn markdown(mut self) -> Self {
        self.mode = OutputMode::Markdown;
        self
    }

    /// Produce pretty-printed JSON
    pub fn json(mut self) -> Self {
        self.mode = OutputMode::Json;
        self
    }

    /// Return the shopping list struct without rendering
    pub fn list_only(mut self) -> Self {
        self.mode = OutputMode::List;
        self
    }

    /// Fetch, extract, parse, scale and render
    ///
    /// # Errors
    /// Returns `ImportError` if no URL was set, the fetch fails, or no
    /// extractor can parse the page.
    pub async fn build(self) -> Result<CartResult, ImportError> {
        let url = self.url.ok_or_else(|| {
            ImportError::BuilderError("No recipe URL specified. Use .url()".to_string())
        })?;

        let servings = self.servings.unwrap_or(DEFAULT_TARGET_SERVINGS);

        let recipe = fetch_recipe_with_timeout(&url, self.timeout).await?;
        let list = build_shopping_list(&recipe, servings);

        match self.mode {
            OutputMode::Markdown => Ok(CartResult::Markdown(render::render_markdown(&list, &url))),
            OutputMode::Json => Ok(CartResult::Json(render::render_json(&list)?)),
            OutputMode::List => Ok(CartResult::List(list)),
        }
    }
}

/// Main entry point for the builder API
pub struct RecipeCart;

impl RecipeCart {
    /// Creates a new builder for importing a recipe into a shopping list
    pub fn builder() -> RecipeCartBuilder {
        RecipeCartBuilder::default()
    }
}
