//! Typed table model shared by the locator, the normalizer and the CSV writer.

use crate::{Error, Result};

/// One table cell. Blank cells are `Missing`, never an empty `Text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Missing,
}

impl Cell {
    /// Trims the text and turns blank input into `Missing`.
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            Cell::Missing
        } else {
            Cell::Text(text.to_string())
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            Cell::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Applies `f` to text cells. `None` from `f` makes the cell `Missing`.
    pub fn map_text(self, f: impl FnOnce(&str) -> Option<String>) -> Self {
        match self {
            Cell::Text(s) => f(&s).map_or(Cell::Missing, |t| Cell::from_text(&t)),
            Cell::Missing => Cell::Missing,
        }
    }
}

/// Column labels of a raw table, one label per column on every level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    Single(Vec<String>),
    /// `outer` holds the grouping labels ("Pases", "Regates", ...), `inner` the column labels.
    Double { outer: Vec<String>, inner: Vec<String> },
}

impl Header {
    /// Builds a header from its `<thead>` rows, top level first.
    pub fn from_levels(mut levels: Vec<Vec<String>>) -> Result<Self> {
        let header = match levels.len() {
            1 => Header::Single(levels.remove(0)),
            2 => {
                let inner = levels.remove(1);
                let outer = levels.remove(0);
                if outer.len() != inner.len() {
                    return Err(Error::MalformedTable(format!(
                        "header levels disagree on width: {} vs {}",
                        outer.len(),
                        inner.len()
                    )));
                }
                Header::Double { outer, inner }
            }
            n => {
                return Err(Error::MalformedTable(format!(
                    "expected 1 or 2 header rows, found {n}"
                )))
            }
        };
        if header.width() == 0 {
            return Err(Error::MalformedTable("header has no columns".into()));
        }
        Ok(header)
    }

    pub fn width(&self) -> usize {
        match self {
            Header::Single(labels) => labels.len(),
            Header::Double { inner, .. } => inner.len(),
        }
    }

    #[cfg(test)]
    pub fn depth(&self) -> usize {
        match self {
            Header::Single(_) => 1,
            Header::Double { .. } => 2,
        }
    }

    /// True if any label on any level contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        match self {
            Header::Single(labels) => labels.iter().any(|l| l.contains(needle)),
            Header::Double { outer, inner } => {
                outer.iter().chain(inner).any(|l| l.contains(needle))
            }
        }
    }

    /// Drops the grouping level, leaving one label per column.
    pub fn collapse(self) -> Vec<String> {
        match self {
            Header::Single(labels) => labels,
            Header::Double { inner, .. } => inner,
        }
    }
}

/// A table as it was found in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    header: Header,
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Rows shorter than the header are padded with `Missing`, longer ones are rejected.
    pub fn new(header: Header, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let width = header.width();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, mut row)| {
                if row.len() > width {
                    return Err(Error::MalformedTable(format!(
                        "row {i} has {} cells, header has {width}",
                        row.len()
                    )));
                }
                row.resize(width, Cell::Missing);
                Ok(row)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { header, rows })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn into_parts(self) -> (Header, Vec<Vec<Cell>>) {
        (self.header, self.rows)
    }
}

/// A cleaned table, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl CleanTable {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in output order, indexed contiguously from 0.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Every value of the named column, in row order.
    #[cfg(test)]
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }
}
