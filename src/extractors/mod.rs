use regex::Regex;
use scraper::Html;
use std::sync::OnceLock;

use crate::error::ImportError;
use crate::model::Recipe;

mod json_ld;
mod microdata;

pub use json_ld::JsonLdExtractor;
pub use microdata::MicroDataExtractor;

/// Everything an extractor needs to pull a recipe out of a page.
pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

pub trait Extractor {
    fn parse(&self, context: &ParsingContext) -> Result<Recipe, ImportError>;
}

/// Host portion of the source URL, for display in the rendered output.
pub(crate) fn host_from_url(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

fn duration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:[\d.]+S)?)?$").unwrap()
    })
}

/// Parse a schema.org duration ("PT1H30M") or a bare minute count
/// ("90") into total minutes. Returns None for zero or unparseable
/// values so callers can treat the field as absent.
pub(crate) fn parse_duration_minutes(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(minutes) = raw.parse::<u32>() {
        return (minutes > 0).then_some(minutes);
    }

    let caps = duration_re().captures(raw)?;
    let group = |i| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    };
    let total = group(1) * 24 * 60 + group(2) * 60 + group(3);
    (total > 0).then_some(total)
}
