/// The system prompt used for structured recipe analysis.
///
/// Instructs the model to return one JSON object with the recipe name,
/// original servings and a categorized ingredient list. Loaded from
/// `prompt.txt` at compile time with `include_str!` so it can be edited
/// without dealing with Rust string syntax.
pub const RECIPE_ANALYZER_PROMPT: &str = include_str!("prompt.txt");
