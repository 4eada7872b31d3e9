use html_escape::decode_html_entities;
use log::debug;
use scraper::Selector;
use serde::Deserialize;
use serde_json::Value;

use super::{host_from_url, parse_duration_minutes, Extractor, ParsingContext};
use crate::error::ImportError;
use crate::model::Recipe;

/// Extracts recipes published as schema.org JSON-LD, the format used
/// by the vast majority of recipe sites.
pub struct JsonLdExtractor;

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: String,
    #[serde(default)]
    description: Option<DescriptionType>,
    #[serde(default)]
    image: Option<ImageType>,
    #[serde(rename = "recipeIngredient", alias = "ingredients", default)]
    recipe_ingredient: Vec<String>,
    #[serde(rename = "recipeInstructions", default)]
    recipe_instructions: Option<RecipeInstructions>,
    #[serde(rename = "recipeYield", default)]
    recipe_yield: Option<YieldType>,
    #[serde(rename = "totalTime", default)]
    total_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextObject {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DescriptionType {
    String(String),
    Object(TextObject),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageType {
    String(String),
    Object(ImageObject),
    MultipleStrings(Vec<String>),
    MultipleObjects(Vec<ImageObject>),
}

#[derive(Debug, Deserialize)]
struct InstructionObject {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    String(String),
    Multiple(Vec<String>),
    MultipleObject(Vec<InstructionObject>),
    HowTo(Vec<HowTo>),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "@type")]
enum HowTo {
    HowToStep(HowToStep),
    HowToSection(HowToSection),
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<HowToStep>,
}

/// recipeYield shows up as a number, a string, or an array of either.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YieldType {
    Number(f64),
    String(String),
    Multiple(Vec<YieldType>),
}

impl YieldType {
    fn into_string(self) -> String {
        match self {
            YieldType::Number(n) if n.fract() == 0.0 => format!("{}", n as i64),
            YieldType::Number(n) => format!("{}", n),
            YieldType::String(s) => s,
            YieldType::Multiple(items) => items
                .into_iter()
                .next()
                .map(YieldType::into_string)
                .unwrap_or_default(),
        }
    }
}

/// Sites double-escape entities often enough that decoding twice is
/// the only way to get clean text.
fn decode_html_symbols(text: &str) -> String {
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

fn is_recipe_type(type_field: Option<&Value>) -> bool {
    match type_field {
        Some(Value::String(s)) => s.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(items)) => items
            .iter()
            .any(|v| v.as_str().is_some_and(|s| s.eq_ignore_ascii_case("recipe"))),
        _ => false,
    }
}

/// Walk a JSON-LD value looking for the Recipe node. Handles plain
/// objects, top-level arrays and @graph wrappers.
fn find_recipe_node(value: Value) -> Option<Value> {
    match value {
        Value::Array(items) => items.into_iter().find_map(find_recipe_node),
        Value::Object(ref map) => {
            if is_recipe_type(map.get("@type")) {
                return Some(value);
            }
            map.get("@graph").cloned().and_then(find_recipe_node)
        }
        _ => None,
    }
}

fn flatten_instructions(instructions: RecipeInstructions) -> String {
    match instructions {
        RecipeInstructions::String(text) => decode_html_symbols(&text),
        RecipeInstructions::Multiple(steps) => steps
            .iter()
            .map(|step| decode_html_symbols(step))
            .collect::<Vec<_>>()
            .join("\n"),
        RecipeInstructions::MultipleObject(steps) => steps
            .iter()
            .map(|step| decode_html_symbols(&step.text))
            .collect::<Vec<_>>()
            .join("\n"),
        RecipeInstructions::HowTo(sections) => sections
            .into_iter()
            .flat_map(|section| match section {
                HowTo::HowToStep(step) => vec![step],
                HowTo::HowToSection(section) => section.item_list_element,
            })
            .filter_map(|step| step.text.or(step.description))
            .map(|text| decode_html_symbols(&text))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn build_recipe(parsed: JsonLdRecipe, url: &str) -> Recipe {
    Recipe {
        name: decode_html_symbols(&parsed.name),
        description: match parsed.description {
            Some(DescriptionType::String(desc)) => decode_html_symbols(&desc),
            Some(DescriptionType::Object(desc)) => decode_html_symbols(&desc.text),
            None => String::new(),
        },
        image: match parsed.image {
            Some(ImageType::String(img)) => vec![decode_html_symbols(&img)],
            Some(ImageType::Object(img)) => vec![img.url],
            Some(ImageType::MultipleStrings(imgs)) => {
                imgs.iter().map(|img| decode_html_symbols(img)).collect()
            }
            Some(ImageType::MultipleObjects(imgs)) => {
                imgs.into_iter().map(|img| img.url).collect()
            }
            None => vec![],
        },
        ingredients: parsed
            .recipe_ingredient
            .iter()
            .map(|line| decode_html_symbols(line))
            .collect(),
        instructions: parsed
            .recipe_instructions
            .map(flatten_instructions)
            .unwrap_or_default(),
        yields: parsed
            .recipe_yield
            .map(YieldType::into_string)
            .unwrap_or_default(),
        total_time_minutes: parsed
            .total_time
            .as_deref()
            .and_then(parse_duration_minutes),
        host: host_from_url(url),
    }
}

impl Extractor for JsonLdExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<Recipe, ImportError> {
        debug!("Attempting to extract recipe using JSON-LD extractor");

        let selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
        for script in context.document.select(&selector) {
            let raw = script.inner_html();
            let value: Value = match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    debug!("Skipping malformed JSON-LD block: {}", err);
                    continue;
                }
            };

            if let Some(node) = find_recipe_node(value) {
                let parsed: JsonLdRecipe = serde_json::from_value(node).map_err(|err| {
                    ImportError::ParseError(format!(
                        "JSON-LD recipe has unexpected shape: {}",
                        err
                    ))
                })?;
                return Ok(build_recipe(parsed, &context.url));
            }
        }

        Err(ImportError::ParseError(
            "No JSON-LD recipe block found".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn context_for(json_ld: &str) -> ParsingContext {
        let html = format!(
            r#"<html><head><script type="application/ld+json">{}</script></head><body></body></html>"#,
            json_ld
        );
        ParsingContext {
            url: "https://www.example.com/recipe".to_string(),
            document: Html::parse_document(&html),
        }
    }

    #[test]
    fn test_parses_basic_recipe() {
        let ctx = context_for(
            r#"{
                "@context": "https://schema.org",
                "@type": "Recipe",
                "name": "Simple Pasta",
                "description": "Weeknight pasta",
                "image": "https://example.com/pasta.jpg",
                "recipeIngredient": ["1 lb pasta", "2 cups marinara"],
                "recipeInstructions": "Boil pasta. Add sauce.",
                "recipeYield": "4 servings",
                "totalTime": "PT30M"
            }"#,
        );

        let recipe = JsonLdExtractor.parse(&ctx).unwrap();
        assert_eq!(recipe.name, "Simple Pasta");
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.yields, "4 servings");
        assert_eq!(recipe.total_time_minutes, Some(30));
        assert_eq!(recipe.host, "www.example.com");
    }

    #[test]
    fn test_parses_graph_wrapper() {
        let ctx = context_for(
            r#"{
                "@context": "https://schema.org",
                "@graph": [
                    {"@type": "WebPage", "name": "Page"},
                    {
                        "@type": "Recipe",
                        "name": "Graph Recipe",
                        "recipeIngredient": ["1 egg"],
                        "recipeInstructions": ["Crack egg", "Fry egg"]
                    }
                ]
            }"#,
        );

        let recipe = JsonLdExtractor.parse(&ctx).unwrap();
        assert_eq!(recipe.name, "Graph Recipe");
        assert_eq!(recipe.instructions, "Crack egg\nFry egg");
    }

    #[test]
    fn test_type_array_and_case_insensitive() {
        let ctx = context_for(
            r#"{
                "@type": ["recipe", "Thing"],
                "name": "Lowercase Type",
                "recipeIngredient": ["1 cup rice"]
            }"#,
        );

        let recipe = JsonLdExtractor.parse(&ctx).unwrap();
        assert_eq!(recipe.name, "Lowercase Type");
    }

    #[test]
    fn test_numeric_and_array_yields() {
        let ctx = context_for(
            r#"{
                "@type": "Recipe",
                "name": "Yield Variants",
                "recipeIngredient": ["1 cup rice"],
                "recipeYield": [6, "6 servings"]
            }"#,
        );

        let recipe = JsonLdExtractor.parse(&ctx).unwrap();
        assert_eq!(recipe.yields, "6");
    }

    #[test]
    fn test_howto_steps_and_sections() {
        let ctx = context_for(
            r#"{
                "@type": "Recipe",
                "name": "HowTo Recipe",
                "recipeIngredient": ["1 potato"],
                "recipeInstructions": [
                    {"@type": "HowToStep", "text": "Peel the potato"},
                    {"@type": "HowToSection", "itemListElement": [
                        {"@type": "HowToStep", "text": "Slice it"},
                        {"@type": "HowToStep", "text": "Fry it"}
                    ]}
                ]
            }"#,
        );

        let recipe = JsonLdExtractor.parse(&ctx).unwrap();
        assert_eq!(recipe.instructions, "Peel the potato\nSlice it\nFry it");
    }

    #[test]
    fn test_decodes_html_entities() {
        let ctx = context_for(
            r#"{
                "@type": "Recipe",
                "name": "Mac &amp; Cheese",
                "recipeIngredient": ["1 cup macaroni &amp; cheese"]
            }"#,
        );

        let recipe = JsonLdExtractor.parse(&ctx).unwrap();
        assert_eq!(recipe.name, "Mac & Cheese");
        assert_eq!(recipe.ingredients[0], "1 cup macaroni & cheese");
    }

    #[test]
    fn test_no_recipe_block() {
        let ctx = context_for(r#"{"@type": "WebSite", "name": "Not a recipe"}"#);
        assert!(JsonLdExtractor.parse(&ctx).is_err());
    }
}
