use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use super::text::{element_lines, parse_price};
use super::Candidate;
use crate::config::{MEASURES, SPECIAL_CATEGORY, SPECIAL_SECTION_MARKER};

const SECTION_TAG: &str = "h2";
const ENTRY_TAG: &str = "h3";

static H2_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(SECTION_TAG).unwrap());

/// Any "<measure>: … €" on a line marks a price paragraph.
static PRICE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let labels: Vec<String> = MEASURES.iter().map(|m| regex::escape(m)).collect();
    Regex::new(&format!(r"(?:{}):[^€]*€", labels.join("|"))).unwrap()
});

/// Per-measure amount capture: "2cl: 3,50€" → "3,50".
static MEASURE_PRICE_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    MEASURES
        .iter()
        .map(|m| {
            let re = Regex::new(&format!(r"{}:\s*([\d,.]+)\s*€", regex::escape(m))).unwrap();
            (*m, re)
        })
        .collect()
});

/// Candidates from the heading-delimited special section, in document order.
/// No section, no candidates.
pub fn extract(document: &Html) -> Vec<Candidate> {
    let Some(heading) = document
        .select(&H2_SEL)
        .find(|h| h.text().collect::<String>().contains(SPECIAL_SECTION_MARKER))
    else {
        debug!("No {} section in document", SPECIAL_SECTION_MARKER);
        return Vec::new();
    };

    let section: Vec<ElementRef> = heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|el| el.value().name() != SECTION_TAG)
        .collect();

    let candidates: Vec<Candidate> = section
        .iter()
        .enumerate()
        .filter(|(_, el)| el.value().name() == ENTRY_TAG)
        .flat_map(|(i, entry)| read_entry(entry, &section[i + 1..]))
        .collect();

    info!("{}: {} candidates", SPECIAL_CATEGORY, candidates.len());
    candidates
}

/// One `<h3>` entry: "name<br>descriptor" plus its price paragraph.
/// Each measure with a readable amount yields its own candidate.
fn read_entry(entry: &ElementRef, following: &[ElementRef]) -> Vec<Candidate> {
    let parts = element_lines(entry);
    let [name, details, ..] = parts.as_slice() else {
        debug!("{} entry without descriptor: {:?}", SPECIAL_CATEGORY, parts);
        return Vec::new();
    };

    let Some(price_text) = following
        .iter()
        .filter(|el| el.value().name() == "p")
        .map(|p| p.text().collect::<String>())
        .find(|text| PRICE_LINE_RE.is_match(text))
    else {
        debug!("{}: no price paragraph for {}", SPECIAL_CATEGORY, name);
        return Vec::new();
    };

    MEASURE_PRICE_RES
        .iter()
        .filter_map(|(measure, re)| {
            let amount = re.captures(&price_text)?.get(1)?.as_str();
            let price = parse_price(amount)?;
            Some(Candidate {
                category: SPECIAL_CATEGORY.to_string(),
                name: name.clone(),
                price: Some(price),
                size: Some(measure.to_string()),
                details: Some(details.clone()),
            })
        })
        .collect()
}
