//! Worksheet access.
//!
//! The extractor only needs to count rows and read cells by position, so
//! worksheets are addressed through the small [`Worksheet`] trait rather
//! than through any particular spreadsheet library.

use std::collections::HashMap;

use spia_types::CellValue;

/// Read-only access to one named sheet.
pub trait Worksheet {
    /// Name of the sheet.
    fn name(&self) -> &str;

    /// Number of rows, header included.
    fn row_count(&self) -> usize;

    /// Returns the cell at a zero-based row and column.
    ///
    /// Addresses outside the sheet yield [`CellValue::Blank`].
    fn cell(&self, row: usize, col: usize) -> CellValue;

    /// Number of cells in a row, counting up to the last populated column.
    fn row_len(&self, row: usize) -> usize;
}

/// A collection of named sheets.
pub trait Workbook {
    /// Looks up a sheet by its exact name.
    fn sheet(&self, name: &str) -> Option<&dyn Worksheet>;
}

/// A worksheet held entirely in memory.
///
/// # Example
///
/// ```
/// use spia_loader::{InMemoryWorksheet, Worksheet};
/// use spia_types::CellValue;
///
/// let sheet = InMemoryWorksheet::from_rows("Sheet1", vec![vec!["a", "b"], vec!["c"]]);
/// assert_eq!(sheet.row_count(), 2);
/// assert_eq!(sheet.cell(1, 0), CellValue::Text("c".to_string()));
/// assert_eq!(sheet.cell(1, 1), CellValue::Blank);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorksheet {
    name: String,
    rows: Vec<Vec<CellValue>>,
}

impl InMemoryWorksheet {
    /// Creates an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Creates a sheet from rows of anything convertible into a cell.
    pub fn from_rows<R, C>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<CellValue>,
    {
        let mut sheet = Self::new(name);
        for row in rows {
            sheet.push_row(row);
        }
        sheet
    }

    /// Appends a row.
    pub fn push_row<C: Into<CellValue>>(&mut self, row: impl IntoIterator<Item = C>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Replaces a single cell, growing the sheet as needed.
    pub fn set_cell(&mut self, row: usize, col: usize, value: impl Into<CellValue>) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Blank);
        }
        cells[col] = value.into();
    }
}

impl Worksheet for InMemoryWorksheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, row: usize, col: usize) -> CellValue {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .cloned()
            .unwrap_or_default()
    }

    fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }
}

/// A workbook of in-memory sheets, indexed by name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkbook {
    sheets: HashMap<String, InMemoryWorksheet>,
}

impl InMemoryWorkbook {
    /// Creates an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sheet, replacing any sheet with the same name.
    pub fn add_sheet(&mut self, sheet: InMemoryWorksheet) {
        self.sheets.insert(sheet.name.clone(), sheet);
    }

    /// Builder-style variant of [`add_sheet`](Self::add_sheet).
    pub fn with_sheet(mut self, sheet: InMemoryWorksheet) -> Self {
        self.add_sheet(sheet);
        self
    }

    /// Returns the number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }
}

impl Workbook for InMemoryWorkbook {
    fn sheet(&self, name: &str) -> Option<&dyn Worksheet> {
        self.sheets.get(name).map(|sheet| sheet as &dyn Worksheet)
    }
}

/// Helper functions for reading typed values out of cells.
///
/// A cell of the wrong type reads as `None` rather than failing.
pub mod parse {
    use spia_types::CellValue;

    /// Reads a text cell.
    ///
    /// Blank or whitespace-only text and non-text cells are `None`; other
    /// text is returned unchanged.
    pub fn string(cell: &CellValue) -> Option<String> {
        match cell {
            CellValue::Text(text) if !text.trim().is_empty() => Some(text.clone()),
            _ => None,
        }
    }

    /// Reads a numeric cell.
    ///
    /// Text cells are accepted when their trimmed content parses as a number.
    pub fn numeric(cell: &CellValue) -> Option<f64> {
        match cell {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Splits a `;` separated list, trimming each item.
    ///
    /// Items that are empty after trimming are dropped.
    pub fn list<'a>(value: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        value
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
    }
}
