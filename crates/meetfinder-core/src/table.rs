//! In-memory competitions table.
//!
//! The source spreadsheet has no stable schema, so a table is just an ordered
//! header list plus rows of loosely-typed cells. Records are addressed by
//! header name through the owning [`CompetitionTable`].

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("row {row} has {found} cells but the table has {expected} columns")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A single cell of the source table.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

impl CellValue {
    /// Builds a cell from raw text, mapping empty or whitespace-only input to
    /// [`CellValue::Missing`].
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    /// `true` for missing cells, blank text, and NaN numbers.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(n) => n.is_nan(),
            CellValue::Missing => true,
        }
    }

    /// The cell rendered as text, or `None` when blank.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        if self.is_blank() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            #[allow(clippy::float_cmp)]
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{n:.0}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Missing => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(raw: &str) -> Self {
        CellValue::from_raw(raw)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// One row of the source table; cells are positional and line up with the
/// table's headers.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitionRecord {
    cells: Vec<CellValue>,
}

impl CompetitionRecord {
    #[must_use]
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompetitionTable {
    headers: Vec<String>,
    records: Vec<CompetitionRecord>,
}

impl CompetitionTable {
    #[must_use]
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            records: Vec::new(),
        }
    }

    /// Appends a row. Short rows are padded with [`CellValue::Missing`]; rows
    /// wider than the header list are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::RowWidth`] if `cells` has more entries than
    /// there are headers.
    pub fn push_row(&mut self, mut cells: Vec<CellValue>) -> Result<(), TableError> {
        if cells.len() > self.headers.len() {
            return Err(TableError::RowWidth {
                row: self.records.len(),
                expected: self.headers.len(),
                found: cells.len(),
            });
        }
        cells.resize(self.headers.len(), CellValue::Missing);
        self.records.push(CompetitionRecord { cells });
        Ok(())
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn records(&self) -> &[CompetitionRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of the first header equal to `header`.
    #[must_use]
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// The cell under `header` in `record`, if the column exists.
    #[must_use]
    pub fn cell<'a>(&self, record: &'a CompetitionRecord, header: &str) -> Option<&'a CellValue> {
        self.column_index(header).and_then(|i| record.cells.get(i))
    }

    /// Non-blank text under `header`, or `None`.
    #[must_use]
    pub fn text(&self, record: &CompetitionRecord, header: &str) -> Option<String> {
        self.cell(record, header).and_then(CellValue::as_text)
    }
}
