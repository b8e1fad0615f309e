/// Column layout shared by one or more menu categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// name | descriptor | size | price, narrowing to name | size | price and name | price.
    Tabular,
    /// name | price.
    Simple,
    /// Name with an italic inline description or a trailing description row,
    /// price in the last cell. `cl_size` picks up a "…cl" second column as size.
    Described { cl_size: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeColumn {
    /// Any non-empty text is the size.
    Plain(usize),
    /// Only text ending in "cl" (any case) is the size.
    Centiliters(usize),
}

/// Cell positions for one row arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub name: usize,
    pub details: Option<usize>,
    pub size: Option<SizeColumn>,
    pub price: usize,
    /// Look for an inline italic span or a trailing description row.
    pub describe: bool,
}

impl Columns {
    const fn name_price() -> Self {
        Columns {
            name: 0,
            details: None,
            size: None,
            price: 1,
            describe: false,
        }
    }
}

impl Layout {
    /// Map a row's actual cell count to field positions.
    /// `None` when the row is too narrow to hold a name and a price.
    pub fn columns(self, arity: usize) -> Option<Columns> {
        match (self, arity) {
            (_, 0 | 1) => None,
            (Layout::Tabular, 2) | (Layout::Simple, _) | (Layout::Described { .. }, 2) => {
                Some(Columns::name_price())
            }
            (Layout::Tabular, 3) => Some(Columns {
                name: 0,
                details: None,
                size: Some(SizeColumn::Plain(1)),
                price: 2,
                describe: false,
            }),
            (Layout::Tabular, _) => Some(Columns {
                name: 0,
                details: Some(1),
                size: Some(SizeColumn::Plain(2)),
                price: 3,
                describe: false,
            }),
            (Layout::Described { cl_size }, n) => Some(Columns {
                name: 0,
                details: None,
                size: cl_size.then_some(SizeColumn::Centiliters(1)),
                price: n - 1,
                describe: true,
            }),
        }
    }
}
