use std::sync::LazyLock;

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use super::layout::{Columns, SizeColumn};
use super::text::{clean_text, element_text, parse_price};
use super::Candidate;
use crate::config::{CategoryTable, NO_DATA_SENTINEL};

static TABLE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
static TBODY_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody").unwrap());
static ITALIC_TAG_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("i").unwrap());
static ITALIC_CLASS_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".italic").unwrap());

/// The `<td>` cells of one `<tr>`.
pub struct Row<'a> {
    cells: Vec<ElementRef<'a>>,
}

impl<'a> Row<'a> {
    fn from_element(tr: ElementRef<'a>) -> Self {
        let cells = tr
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "td")
            .collect();
        Row { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    fn text(&self, idx: usize) -> Result<String> {
        self.cells
            .get(idx)
            .map(element_text)
            .ok_or_else(|| anyhow!("no cell at column {} of {}", idx + 1, self.cells.len()))
    }

    fn texts(&self) -> Vec<String> {
        self.cells.iter().map(element_text).collect()
    }

    /// Text of the first italic span inside a cell. An `<i>` anywhere in
    /// the cell takes precedence over a `.italic` element.
    fn italic_text(&self, idx: usize) -> Option<String> {
        let cell = self.cells.get(idx)?;
        cell.select(&ITALIC_TAG_SEL)
            .next()
            .or_else(|| cell.select(&ITALIC_CLASS_SEL).next())
            .map(|el| element_text(&el))
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoCells,
    MergedHeader,
    NoData,
    TooNarrow,
    Malformed,
}

/// What a row contributes to its table.
#[derive(Debug, Clone, PartialEq)]
pub enum RowRole {
    Skipped(SkipReason),
    /// `claims_next` marks the following row as this item's description.
    Item { candidate: Candidate, claims_next: bool },
    Description,
}

/// Candidates from one configured table, in row order.
/// A missing table yields nothing.
pub fn extract_table(document: &Html, table: &CategoryTable) -> Vec<Candidate> {
    let Some(element) = find_table(document, table.table_id) else {
        warn!("Table with id {} not found ({})", table.table_id, table.category);
        return Vec::new();
    };

    let rows = table_rows(element);
    let roles = assign_roles(&rows, table);
    let candidates: Vec<Candidate> = roles
        .into_iter()
        .filter_map(|role| match role {
            RowRole::Item { candidate, .. } => Some(candidate),
            _ => None,
        })
        .collect();

    info!(
        "{}: {} rows, {} candidates",
        table.category,
        rows.len(),
        candidates.len()
    );
    candidates
}

fn find_table<'a>(document: &'a Html, table_id: &str) -> Option<ElementRef<'a>> {
    document
        .select(&TABLE_SEL)
        .find(|el| el.value().id() == Some(table_id))
}

fn table_rows(table: ElementRef<'_>) -> Vec<Row<'_>> {
    let Some(tbody) = table.select(&TBODY_SEL).next() else {
        return Vec::new();
    };
    tbody
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "tr")
        .map(Row::from_element)
        .collect()
}

/// Forward scan over a table's rows. A row claimed as the previous item's
/// description is never read as an item itself.
pub fn assign_roles(rows: &[Row], table: &CategoryTable) -> Vec<RowRole> {
    let mut roles: Vec<RowRole> = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        if let Some(RowRole::Item { claims_next: true, .. }) = roles.last() {
            debug!("{} row {}: folded into previous item", table.table_id, i);
            roles.push(RowRole::Description);
            continue;
        }

        let role = read_row(row, rows.get(i + 1), table);
        if let RowRole::Skipped(reason) = &role {
            debug!("{} row {}: skipped ({:?})", table.table_id, i, reason);
        }
        roles.push(role);
    }

    roles
}

fn read_row(row: &Row, next: Option<&Row>, table: &CategoryTable) -> RowRole {
    let Some(first) = row.cells.first() else {
        return RowRole::Skipped(SkipReason::NoCells);
    };
    if first.value().attr("colspan").is_some() {
        return RowRole::Skipped(SkipReason::MergedHeader);
    }
    if element_text(first).to_lowercase() == NO_DATA_SENTINEL {
        return RowRole::Skipped(SkipReason::NoData);
    }
    let Some(columns) = table.layout.columns(row.len()) else {
        return RowRole::Skipped(SkipReason::TooNarrow);
    };

    match read_candidate(row, next, columns, table.category) {
        Ok((candidate, claims_next)) => RowRole::Item {
            candidate,
            claims_next,
        },
        // Layout::columns only maps cells the row has, so this arm is
        // reached only if a mapping and the row's arity ever disagree.
        Err(e) => {
            warn!(
                "Row parsing error in {} for cells {:?}: {}",
                table.category,
                row.texts(),
                e
            );
            RowRole::Skipped(SkipReason::Malformed)
        }
    }
}

/// Read one row with the given column mapping. The flag is set when the
/// next row was taken as this item's description.
pub fn read_candidate(
    row: &Row,
    next: Option<&Row>,
    columns: Columns,
    category: &str,
) -> Result<(Candidate, bool)> {
    let mut name = row.text(columns.name)?;
    let mut details = columns.details.map(|i| row.text(i)).transpose()?;
    let size = match columns.size {
        Some(SizeColumn::Plain(i)) => Some(row.text(i)?),
        Some(SizeColumn::Centiliters(i)) => {
            Some(row.text(i)?).filter(|s| s.to_lowercase().ends_with("cl"))
        }
        None => None,
    };
    let price = parse_price(&row.text(columns.price)?);

    let mut claims_next = false;
    if columns.describe {
        // Inline and trailing descriptions are alternatives; inline wins.
        if let Some(inline) = row.italic_text(columns.name) {
            name = clean_text(&name.replace(&inline, ""));
            details = Some(inline);
        } else if let Some(trailing) = next.and_then(|n| trailing_description(row, n)) {
            details = Some(trailing);
            claims_next = true;
        }
    }

    let candidate = Candidate {
        category: category.to_string(),
        name,
        price,
        size: size.filter(|s| !s.is_empty()),
        details: details.filter(|d| !d.is_empty()),
    };
    // An item that will not be emitted leaves its description row alone.
    let claims_next = claims_next && candidate.is_emittable();
    Ok((candidate, claims_next))
}

/// First-cell text of `next` when it reads as a description of `row`:
/// narrower than `row`, or without a price in its last cell.
fn trailing_description(row: &Row, next: &Row) -> Option<String> {
    let text = element_text(next.cells.first()?);
    if text.is_empty() {
        return None;
    }
    let next_price = next
        .cells
        .last()
        .and_then(|cell| parse_price(&element_text(cell)));
    let priced = next_price.is_some_and(|p| p != 0.0);
    (next.len() < row.len() || !priced).then_some(text)
}
