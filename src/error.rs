use thiserror::Error;

/// Errors that can occur while turning a recipe URL into a shopping list
#[derive(Error, Debug)]
pub enum ImportError {
    /// Failed to fetch recipe from URL
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Failed to parse recipe from webpage
    #[error("Failed to parse recipe: {0}")]
    ParseError(String),

    /// No extractor could successfully parse the recipe
    #[error("No extractor could parse the recipe from this webpage")]
    NoExtractorMatched,

    /// LLM provider returned an unusable response
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Malformed JSON in a provider response or while serializing output
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
