pub mod freeform;
pub mod layout;
pub mod tables;
pub mod text;

use scraper::Html;
use tracing::info;
use uuid::Uuid;

use crate::config::CategoryTable;
use crate::menu::MenuItem;
use text::strip_line_breaks;

/// A record before the emission filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub category: String,
    pub name: String,
    pub price: Option<f64>,
    pub size: Option<String>,
    pub details: Option<String>,
}

impl Candidate {
    pub fn is_emittable(&self) -> bool {
        !strip_line_breaks(&self.name).is_empty()
            && self.price.is_some_and(|p| p.is_finite() && p > 0.0)
    }

    /// Apply the emission filter and give the record a fresh id.
    pub fn into_item(self) -> Option<MenuItem> {
        if !self.is_emittable() {
            return None;
        }
        Some(MenuItem {
            id: Uuid::new_v4().to_string(),
            category: self.category,
            name: strip_line_breaks(&self.name),
            price: self.price?,
            details: self.details.filter(|d| !d.is_empty()),
            size: self.size.filter(|s| !s.is_empty()),
        })
    }
}

/// Markup → tree → table and freeform candidates → catalog.
pub fn process_document(html: &str, tables: &[CategoryTable]) -> Vec<MenuItem> {
    let document = Html::parse_document(html);
    extract_menu(&document, tables)
}

/// Tables in declared order, then the freeform section.
pub fn extract_menu(document: &Html, tables: &[CategoryTable]) -> Vec<MenuItem> {
    let mut candidates = Vec::new();
    for table in tables {
        candidates.extend(tables::extract_table(document, table));
    }
    candidates.extend(freeform::extract(document));
    assemble(candidates)
}

/// Filter candidates and assign ids. Identical-looking entries stay distinct.
pub fn assemble(candidates: Vec<Candidate>) -> Vec<MenuItem> {
    let total = candidates.len();
    let items: Vec<MenuItem> = candidates
        .into_iter()
        .filter_map(Candidate::into_item)
        .collect();
    info!("Kept {} of {} candidates", items.len(), total);
    items
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::config::CATEGORY_TABLES;

    fn fixture() -> Vec<MenuItem> {
        let html = std::fs::read_to_string("tests/fixtures/menu.html").unwrap();
        process_document(&html, CATEGORY_TABLES)
    }

    fn candidate(name: &str, price: Option<f64>) -> Candidate {
        Candidate {
            category: "Heiße Getränke".into(),
            name: name.into(),
            price,
            size: Some(String::new()),
            details: None,
        }
    }

    fn strip_ids(items: &[MenuItem]) -> Vec<MenuItem> {
        items
            .iter()
            .cloned()
            .map(|mut i| {
                i.id.clear();
                i
            })
            .collect()
    }

    #[test]
    fn emission_filter() {
        let kept = assemble(vec![
            candidate("Kaffee", Some(2.6)),
            candidate("", Some(2.6)),
            candidate("Tee", None),
            candidate("Wasser", Some(0.0)),
            candidate("<br>", Some(1.0)),
            candidate("Kakao", Some(-1.0)),
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Kaffee");
        assert_eq!(kept[0].size, None);
    }

    #[test]
    fn duplicates_kept_with_distinct_ids() {
        let kept = assemble(vec![candidate("Kaffee", Some(2.6)), candidate("Kaffee", Some(2.6))]);
        assert_eq!(kept.len(), 2);
        assert_ne!(kept[0].id, kept[1].id);
    }

    #[test]
    fn fixture_records_are_valid() {
        let items = fixture();
        assert!(!items.is_empty());
        for item in &items {
            assert!(!item.name.is_empty());
            assert!(item.price.is_finite() && item.price > 0.0, "{:?}", item);
            assert_ne!(item.details.as_deref(), Some(""));
            assert_ne!(item.size.as_deref(), Some(""));
        }
        let ids: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn fixture_follows_table_then_section_order() {
        let items = fixture();
        let mut order: Vec<&str> = Vec::new();
        for item in &items {
            if order.last() != Some(&item.category.as_str()) {
                order.push(&item.category);
            }
        }
        assert_eq!(
            order,
            [
                "Bier vom Fass",
                "Flaschenbier",
                "Alkoholfreie Getränke",
                "Heiße Getränke",
                "Heißgetränke mit Spirit",
                "Wein / Sekt",
                "Longdrinks / Cocktails",
                "Shots / Brands / Aperitifs",
                "Absinthe",
            ]
        );
    }

    #[test]
    fn fixture_details_and_sizes() {
        let items = fixture();
        let find = |name: &str| items.iter().find(|i| i.name == name).unwrap();

        let pils = find("Pilsner");
        assert_eq!(pils.details.as_deref(), Some("4.1% / Hopfen"));
        assert_eq!(pils.size.as_deref(), Some("0,3l"));
        assert_eq!(pils.price, 3.80);

        let cuba = find("Cuba Libre");
        assert_eq!(cuba.details.as_deref(), Some("Havana Club 3, Cola, Limette"));
        assert!(!items.iter().any(|i| i.name == "Havana Club 3, Cola, Limette"));

        let caipi = find("Caipirinha");
        assert_eq!(caipi.details.as_deref(), Some("Cachaça, Limette, Rohrzucker"));

        let jaeger = find("Jägermeister");
        assert_eq!(jaeger.size.as_deref(), Some("2cl"));

        let verte: Vec<_> = items.iter().filter(|i| i.name == "Verte").collect();
        assert_eq!(verte.len(), 2);
        assert_eq!(verte[0].size.as_deref(), Some("2cl"));
        assert_eq!(verte[1].size.as_deref(), Some("4cl"));
    }

    #[test]
    fn fixture_skips_placeholders() {
        let items = fixture();
        assert!(items.iter().all(|i| !i.name.eq_ignore_ascii_case("keine daten")));
        assert!(items.iter().all(|i| i.name != "Saisonbier"));
        assert!(items.iter().all(|i| i.name != "Vom Fass"));
    }

    #[test]
    fn missing_table_does_not_stop_later_tables() {
        let html = "<html><body>\
            <table id=\"supsystic-table-9\"><tbody>\
            <tr><td>Kaffee</td><td>2,60€</td></tr>\
            </tbody></table>\
            </body></html>";
        let items = process_document(html, CATEGORY_TABLES);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, "Heiße Getränke");
    }

    #[test]
    fn runs_are_repeatable() {
        let first = fixture();
        let second = fixture();
        assert_eq!(strip_ids(&first), strip_ids(&second));
        assert_ne!(first[0].id, second[0].id);
    }
}
