use std::collections::BTreeMap;

use crate::menu::MenuItem;

/// Narrowing applied before grouping. `None` keeps everything.
#[derive(Debug, Default)]
pub struct Filter<'a> {
    pub category: Option<&'a str>,
    pub search: Option<&'a str>,
}

impl Filter<'_> {
    fn matches(&self, item: &MenuItem) -> bool {
        let category_ok = self.category.map_or(true, |c| item.category == c);
        let search_ok = self.search.map_or(true, |term| {
            let term = term.to_lowercase();
            item.name.to_lowercase().contains(&term)
                || item.category.to_lowercase().contains(&term)
                || item
                    .details
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&term))
        });
        category_ok && search_ok
    }
}

/// Categories in alphabetical order, items by name within each.
pub fn group_by_category<'a>(
    items: &'a [MenuItem],
    filter: &Filter,
) -> BTreeMap<&'a str, Vec<&'a MenuItem>> {
    let mut grouped: BTreeMap<&str, Vec<&MenuItem>> = BTreeMap::new();
    for item in items.iter().filter(|i| filter.matches(i)) {
        grouped.entry(item.category.as_str()).or_default().push(item);
    }
    for entries in grouped.values_mut() {
        entries.sort_by_cached_key(|i| i.name.to_lowercase());
    }
    grouped
}

/// "Pilsner (0,3l) - 3.80€ [4.1% / Hopfen]"
pub fn format_item(item: &MenuItem) -> String {
    let mut line = match &item.size {
        Some(size) => format!("{} ({}) - {:.2}€", item.name, size, item.price),
        None => format!("{} - {:.2}€", item.name, item.price),
    };
    if let Some(details) = &item.details {
        line.push_str(&format!(" [{}]", details));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: &str, name: &str, size: Option<&str>, price: f64) -> MenuItem {
        MenuItem {
            id: format!("{}-{}", category, name),
            category: category.into(),
            name: name.into(),
            price,
            details: None,
            size: size.map(Into::into),
        }
    }

    fn sample() -> Vec<MenuItem> {
        vec![
            item("Flaschenbier", "Tannenzäpfle", Some("0,33l"), 3.9),
            item("Absinthe", "Verte", Some("2cl"), 3.5),
            item("Flaschenbier", "Guinness", Some("0,44l"), 4.8),
            item("Heiße Getränke", "Kaffee", None, 2.6),
            MenuItem {
                details: Some("Havana Club 3, Cola, Limette".into()),
                ..item("Longdrinks / Cocktails", "Cuba Libre", Some("0,4l"), 7.5)
            },
        ]
    }

    #[test]
    fn groups_sorted() {
        let items = sample();
        let grouped = group_by_category(&items, &Filter::default());
        let cats: Vec<&str> = grouped.keys().copied().collect();
        assert_eq!(
            cats,
            ["Absinthe", "Flaschenbier", "Heiße Getränke", "Longdrinks / Cocktails"]
        );
        let beers: Vec<&str> = grouped["Flaschenbier"].iter().map(|i| i.name.as_str()).collect();
        assert_eq!(beers, ["Guinness", "Tannenzäpfle"]);
    }

    #[test]
    fn category_filter_is_exact() {
        let items = sample();
        let filter = Filter {
            category: Some("Flaschenbier"),
            search: None,
        };
        let grouped = group_by_category(&items, &filter);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["Flaschenbier"].len(), 2);
    }

    #[test]
    fn search_matches_name_or_category() {
        let items = sample();
        let by_name = Filter {
            category: None,
            search: Some("guin"),
        };
        assert_eq!(group_by_category(&items, &by_name)["Flaschenbier"].len(), 1);

        let by_category = Filter {
            category: None,
            search: Some("HEISSE"),
        };
        assert!(group_by_category(&items, &by_category).is_empty());

        let by_category = Filter {
            category: None,
            search: Some("heiße"),
        };
        assert_eq!(group_by_category(&items, &by_category).len(), 1);
    }

    #[test]
    fn item_lines() {
        let items = sample();
        assert_eq!(format_item(&items[0]), "Tannenzäpfle (0,33l) - 3.90€");
        assert_eq!(format_item(&items[3]), "Kaffee - 2.60€");
        assert_eq!(
            format_item(&items[4]),
            "Cuba Libre (0,4l) - 7.50€ [Havana Club 3, Cola, Limette]"
        );
    }

    #[test]
    fn search_matches_details() {
        let items = sample();
        let filter = Filter {
            category: None,
            search: Some("cola"),
        };
        let grouped = group_by_category(&items, &filter);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["Longdrinks / Cocktails"][0].name, "Cuba Libre");
    }
}
