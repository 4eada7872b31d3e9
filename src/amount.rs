//! Parsing and display of ingredient quantities.
//!
//! Handles the quantity vocabulary that actually shows up in published
//! recipes: integers, decimals, ASCII fractions ("1/2"), mixed numbers
//! ("1 1/2") and unicode vulgar fraction glyphs ("½", "1½").

use regex::Regex;
use std::sync::OnceLock;

use crate::model::ParsedAmount;

/// Unicode vulgar fractions and their values. Checked in this order;
/// the first glyph found in the input wins.
const UNICODE_FRACTIONS: &[(char, f64)] = &[
    ('½', 0.5),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('¼', 0.25),
    ('¾', 0.75),
    ('⅕', 0.2),
    ('⅖', 0.4),
    ('⅗', 0.6),
    ('⅘', 0.8),
    ('⅙', 1.0 / 6.0),
    ('⅚', 5.0 / 6.0),
    ('⅛', 0.125),
    ('⅜', 0.375),
    ('⅝', 0.625),
    ('⅞', 0.875),
];

/// Display table for `format_amount`. Iterated in order; the first
/// entry within tolerance wins, so the order is part of the output
/// contract (0.333 must hit ⅓ before anything else can claim it).
const DISPLAY_FRACTIONS: &[(f64, &str)] = &[
    (0.125, "⅛"),
    (0.25, "¼"),
    (0.333, "⅓"),
    (0.375, "⅜"),
    (0.5, "½"),
    (0.625, "⅝"),
    (0.666, "⅔"),
    (0.75, "¾"),
    (0.875, "⅞"),
];

const FRACTION_TOLERANCE: f64 = 0.05;

fn mixed_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\s+(\d+)/(\d+)").unwrap())
}

fn simple_fraction_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)/(\d+)").unwrap())
}

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+(?:\.\d+)?").unwrap())
}

/// Parse the leading quantity expression of `text`.
///
/// Branches are tried in priority order and exactly one fires:
/// unicode fraction glyph, mixed number, ASCII fraction, plain number,
/// then the no-match fallback of `(0, text)`. A fraction with a zero
/// denominator is treated as not-a-fraction and falls through to the
/// plain-number branch, so `"1 1/0 cups"` parses as `(1, "1/0 cups")`.
pub fn parse_amount(text: &str) -> ParsedAmount {
    let text = text.trim();
    if text.is_empty() {
        return ParsedAmount {
            value: 0.0,
            remainder: String::new(),
        };
    }

    for &(glyph, value) in UNICODE_FRACTIONS {
        if let Some(pos) = text.find(glyph) {
            // Anything numeric before the glyph is a whole-number prefix.
            let whole = text[..pos].trim().parse::<f64>().unwrap_or(0.0);
            let remainder = text[pos + glyph.len_utf8()..].trim().to_string();
            return ParsedAmount {
                value: whole + value,
                remainder,
            };
        }
    }

    if let Some(caps) = mixed_number_re().captures(text) {
        let denom: f64 = caps[3].parse().unwrap_or(0.0);
        if denom != 0.0 {
            let whole: f64 = caps[1].parse().unwrap_or(0.0);
            let num: f64 = caps[2].parse().unwrap_or(0.0);
            let end = caps.get(0).map_or(0, |m| m.end());
            return ParsedAmount {
                value: whole + num / denom,
                remainder: text[end..].trim().to_string(),
            };
        }
    }

    if let Some(caps) = simple_fraction_re().captures(text) {
        let denom: f64 = caps[2].parse().unwrap_or(0.0);
        if denom != 0.0 {
            let num: f64 = caps[1].parse().unwrap_or(0.0);
            let end = caps.get(0).map_or(0, |m| m.end());
            return ParsedAmount {
                value: num / denom,
                remainder: text[end..].trim().to_string(),
            };
        }
    }

    if let Some(m) = number_re().find(text) {
        let value: f64 = m.as_str().parse().unwrap_or(0.0);
        return ParsedAmount {
            value,
            remainder: text[m.end()..].trim().to_string(),
        };
    }

    ParsedAmount {
        value: 0.0,
        remainder: text.to_string(),
    }
}

/// Format an amount for display: fractions for the common values,
/// otherwise integers, 2 significant digits below 10, or one decimal.
pub fn format_amount(value: f64) -> String {
    if value == 0.0 {
        return String::new();
    }

    let whole = value.trunc() as i64;
    let frac = value - whole as f64;

    for &(target, glyph) in DISPLAY_FRACTIONS {
        if (frac - target).abs() < FRACTION_TOLERANCE {
            return if whole > 0 {
                format!("{} {}", whole, glyph)
            } else {
                glyph.to_string()
            };
        }
    }

    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else if value < 10.0 {
        format_significant(value, 2)
    } else {
        format!("{}", (value * 10.0).round() / 10.0)
    }
}

/// Round to `digits` significant digits and render with the shortest
/// representation (f64 Display drops trailing zeros).
fn format_significant(value: f64, digits: i32) -> String {
    let magnitude = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(digits - 1 - magnitude);
    format!("{}", (value * factor).round() / factor)
}
