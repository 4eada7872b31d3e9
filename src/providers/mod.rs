mod anthropic;
mod factory;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use open_ai::OpenAIProvider;
pub use prompt::RECIPE_ANALYZER_PROMPT;

use async_trait::async_trait;

use crate::error::ImportError;
use crate::model::RecipeAnalysis;

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Analyze plain recipe text and return the raw JSON response text.
    async fn analyze(&self, recipe_text: &str) -> Result<String, ImportError>;
}

/// Strip a wrapping markdown code fence from a provider response.
/// Models add them despite being told not to.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence, if any.
    let inner = match inner.find('\n') {
        Some(idx) => &inner[idx + 1..],
        None => inner,
    };
    inner.trim_end().strip_suffix("```").unwrap_or(inner).trim()
}

/// Parse a provider response into a [`RecipeAnalysis`], tolerating
/// code fences around the JSON.
pub fn parse_analysis(raw: &str) -> Result<RecipeAnalysis, ImportError> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(cleaned).map_err(|err| {
        ImportError::ProviderError(format!("Provider returned unusable JSON: {}", err))
    })
}
