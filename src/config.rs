use crate::parser::layout::Layout;

pub const DEFAULT_INPUT_PATH: &str = "data/menu.html";
pub const DEFAULT_OUTPUT_PATH: &str = "data/drinks.json";

/// First-cell text marking an empty table placeholder row (compared lowercased).
pub const NO_DATA_SENTINEL: &str = "keine daten";

/// Word that identifies the freeform section's `<h2>`.
pub const SPECIAL_SECTION_MARKER: &str = "Absinthe";
pub const SPECIAL_CATEGORY: &str = "Absinthe";

/// Pour sizes priced in the freeform section, in the order records are emitted.
pub const MEASURES: &[&str] = &["2cl", "4cl"];

/// A table anchor in the source document and how its rows are laid out.
#[derive(Debug, Clone, Copy)]
pub struct CategoryTable {
    pub table_id: &'static str,
    pub category: &'static str,
    pub layout: Layout,
}

/// Hand-maintained against the menu page. Tables are extracted in this order.
pub const CATEGORY_TABLES: &[CategoryTable] = &[
    CategoryTable {
        table_id: "supsystic-table-6",
        category: "Bier vom Fass",
        layout: Layout::Tabular,
    },
    CategoryTable {
        table_id: "supsystic-table-7",
        category: "Flaschenbier",
        layout: Layout::Tabular,
    },
    CategoryTable {
        table_id: "supsystic-table-8",
        category: "Alkoholfreie Getränke",
        layout: Layout::Tabular,
    },
    CategoryTable {
        table_id: "supsystic-table-9",
        category: "Heiße Getränke",
        layout: Layout::Simple,
    },
    CategoryTable {
        table_id: "supsystic-table-10",
        category: "Heißgetränke mit Spirit",
        layout: Layout::Described { cl_size: false },
    },
    CategoryTable {
        table_id: "supsystic-table-11",
        category: "Wein / Sekt",
        layout: Layout::Tabular,
    },
    CategoryTable {
        table_id: "supsystic-table-13",
        category: "Longdrinks / Cocktails",
        layout: Layout::Described { cl_size: false },
    },
    CategoryTable {
        table_id: "supsystic-table-12",
        category: "Shots / Brands / Aperitifs",
        layout: Layout::Described { cl_size: true },
    },
];
