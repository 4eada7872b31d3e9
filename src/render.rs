//! Rendering a shopping list as a markdown document or JSON, with
//! outbound store search links.

use chrono::Local;
use regex::Regex;
use std::sync::OnceLock;

use crate::amount::format_amount;
use crate::error::ImportError;
use crate::model::ShoppingList;

/// Store the generated search links point at.
pub const STORE_HOST: &str = "www.walmart.com";

fn step_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+[.)]\s*").unwrap())
}

fn title_char_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s-]").unwrap())
}

/// Build the store search URL for an ingredient. The search name is
/// URL-encoded; this is the one wire format downstream consumers
/// depend on.
pub fn search_link(search_name: &str) -> String {
    format!(
        "https://{}/search?q={}",
        STORE_HOST,
        urlencoding::encode(search_name)
    )
}

/// Render the shopping list as a markdown document: header, a
/// `| Qty | Ingredient | Store |` table and renumbered instructions.
pub fn render_markdown(list: &ShoppingList, url: &str) -> String {
    let recipe = &list.recipe;
    let mut lines = vec![
        format!("# {}", recipe.name),
        String::new(),
        format!(
            "**Source:** [{}]({})",
            if recipe.host.is_empty() {
                "Recipe"
            } else {
                &recipe.host
            },
            url
        ),
        format!(
            "**Original Servings:** {}",
            if recipe.yields.is_empty() {
                "Unknown".to_string()
            } else {
                recipe.yields.clone()
            }
        ),
        format!("**Scaled to:** {} servings", list.target_servings),
    ];

    if let Some(minutes) = recipe.total_time_minutes {
        lines.push(format!("**Total Time:** {} minutes", minutes));
    }

    lines.extend([
        String::new(),
        format!(
            "*Generated: {}*",
            Local::now().format("%Y-%m-%d %H:%M")
        ),
        String::new(),
        "---".to_string(),
        String::new(),
        "## Shopping List".to_string(),
        String::new(),
        "| Qty | Ingredient | Store |".to_string(),
        "|-----|------------|-------|".to_string(),
    ]);

    for item in &list.items {
        let mut qty = format_amount(item.scaled_amount);
        if !item.ingredient.unit.is_empty() {
            qty = format!("{} {}", qty, item.ingredient.unit);
        }
        lines.push(format!(
            "| {} | {} | [Buy]({}) |",
            qty.trim(),
            item.ingredient.name,
            search_link(&item.ingredient.search_name)
        ));
    }

    lines.extend([
        String::new(),
        "---".to_string(),
        String::new(),
        "## Instructions".to_string(),
        String::new(),
    ]);

    let mut step_number = 0;
    for step in recipe.instructions.split('\n') {
        let step = step.trim();
        if step.is_empty() {
            continue;
        }
        step_number += 1;
        // Strip any published numbering before renumbering.
        let step = step_number_re().replace(step, "");
        lines.push(format!("{}. {}", step_number, step));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Serialize the shopping list as pretty-printed JSON.
pub fn render_json(list: &ShoppingList) -> Result<String, ImportError> {
    Ok(serde_json::to_string_pretty(list)?)
}

/// Filename for the written markdown document:
/// `recipe_<sanitized-title>_<timestamp>.md`.
pub fn output_filename(title: &str) -> String {
    format!(
        "recipe_{}_{}.md",
        sanitize_title(title),
        Local::now().format("%Y%m%d_%H%M")
    )
}

/// Reduce a recipe title to something filesystem-safe: keep word
/// characters, spaces and hyphens, cap at 50 chars, spaces become
/// underscores.
fn sanitize_title(title: &str) -> String {
    let cleaned = title_char_re().replace_all(title, "");
    cleaned
        .trim()
        .chars()
        .take(50)
        .collect::<String>()
        .replace(' ', "_")
}
