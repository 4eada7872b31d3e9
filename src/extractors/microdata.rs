use log::debug;
use scraper::{ElementRef, Selector};

use super::{host_from_url, parse_duration_minutes, Extractor, ParsingContext};
use crate::error::ImportError;
use crate::model::Recipe;

/// Extracts recipes marked up with schema.org microdata
/// (`itemscope`/`itemprop` attributes). Fallback for sites that never
/// moved to JSON-LD.
pub struct MicroDataExtractor;

impl MicroDataExtractor {
    fn find_recipe_container<'a>(&self, document: &'a scraper::Html) -> Option<ElementRef<'a>> {
        let selector = Selector::parse("[itemscope]").unwrap();
        for element in document.select(&selector) {
            if let Some(itemtype) = element.value().attr("itemtype") {
                if itemtype.contains("schema.org/Recipe")
                    || itemtype.contains("data-vocabulary.org/Recipe")
                {
                    return Some(element);
                }
            }
        }
        None
    }

    fn get_itemprop(&self, root: ElementRef, prop: &str) -> Option<String> {
        let selector = Selector::parse(&format!("[itemprop='{}']", prop)).unwrap();
        root.select(&selector).next().map(element_text)
    }

    fn get_itemprop_list(&self, root: ElementRef, prop: &str) -> Vec<String> {
        let selector = Selector::parse(&format!("[itemprop='{}']", prop)).unwrap();
        root.select(&selector)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect()
    }

    /// For time and yield props the value often lives in a `content`
    /// or `datetime` attribute rather than the element text.
    fn get_itemprop_value(&self, root: ElementRef, prop: &str) -> Option<String> {
        let selector = Selector::parse(&format!("[itemprop='{}']", prop)).unwrap();
        let element = root.select(&selector).next()?;
        for attr in ["content", "datetime"] {
            if let Some(value) = element.value().attr(attr) {
                if !value.trim().is_empty() {
                    return Some(value.trim().to_string());
                }
            }
        }
        let text = element_text(element);
        (!text.is_empty()).then_some(text)
    }
}

fn element_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

impl Extractor for MicroDataExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<Recipe, ImportError> {
        debug!("Attempting to extract recipe using microdata extractor");

        // Scoping everything to the Recipe container avoids picking up
        // unrelated itemprops elsewhere on the page (site title, author
        // bio, ads).
        let container = self
            .find_recipe_container(&context.document)
            .ok_or_else(|| {
                ImportError::ParseError("No microdata Recipe container found".to_string())
            })?;

        let name = self.get_itemprop(container, "name").ok_or_else(|| {
            ImportError::ParseError("Could not extract recipe name".to_string())
        })?;

        let mut ingredients = self.get_itemprop_list(container, "recipeIngredient");
        if ingredients.is_empty() {
            // Legacy itemprop name used by data-vocabulary-era markup.
            ingredients = self.get_itemprop_list(container, "ingredients");
        }
        if ingredients.is_empty() {
            return Err(ImportError::ParseError(
                "Microdata recipe has no ingredients".to_string(),
            ));
        }

        let instructions = self
            .get_itemprop_list(container, "recipeInstructions")
            .join("\n");

        let image_selector = Selector::parse("[itemprop='image']").unwrap();
        let image = container
            .select(&image_selector)
            .filter_map(|el| {
                el.value()
                    .attr("src")
                    .or_else(|| el.value().attr("content"))
                    .map(str::to_string)
            })
            .collect();

        Ok(Recipe {
            name,
            description: self
                .get_itemprop(container, "description")
                .unwrap_or_default(),
            image,
            ingredients,
            instructions,
            yields: self
                .get_itemprop_value(container, "recipeYield")
                .unwrap_or_default(),
            total_time_minutes: self
                .get_itemprop_value(container, "totalTime")
                .as_deref()
                .and_then(parse_duration_minutes),
            host: host_from_url(&context.url),
        })
    }
}
