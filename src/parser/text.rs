use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse whitespace runs (newlines included) to one space and trim.
pub fn clean_text(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Text nodes of an element, each trimmed, joined by a space, then cleaned.
pub fn element_text(element: &ElementRef) -> String {
    let joined = element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    clean_text(&joined)
}

/// Text nodes of an element split into cleaned, non-empty lines.
/// Each `<br>` or literal newline starts a new part.
pub fn element_lines(element: &ElementRef) -> Vec<String> {
    element
        .text()
        .collect::<Vec<_>>()
        .join("\n")
        .split('\n')
        .map(clean_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parse a euro amount in German notation: "4,20€" → 4.2, "1.234,50€" → 1234.5.
/// Empty, non-numeric and non-finite inputs give `None`.
pub fn parse_price(price: &str) -> Option<f64> {
    if price.is_empty() {
        return None;
    }
    let normalized = price.replace('€', "").replace('.', "").replace(',', ".");
    normalized
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
}

/// Drop literal line-break markup left in a display name.
pub fn strip_line_breaks(name: &str) -> String {
    name.replace("<br>", "")
        .replace("<br/>", "")
        .replace("<br />", "")
        .trim()
        .to_string()
}
