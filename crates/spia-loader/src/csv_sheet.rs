//! Worksheets read from delimited text exports.
//!
//! A SPIA sheet saved as CSV (or TSV) loses its cell types, so every
//! non-empty field becomes a [`CellValue::Text`] and empty fields become
//! [`CellValue::Blank`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use spia_types::CellValue;

use crate::types::{SpiaError, SpiaResult};
use crate::worksheet::{Workbook, Worksheet};

/// A worksheet backed by the records of a delimited text file.
///
/// The header row is kept as row 0 so the header contract can be checked
/// against it like any other worksheet.
#[derive(Debug, Clone)]
pub struct CsvWorksheet {
    name: String,
    records: Vec<StringRecord>,
}

impl CsvWorksheet {
    /// Reads a sheet from a file path.
    ///
    /// # Errors
    /// Returns an error if the file does not exist or is not valid delimited text.
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        name: impl Into<String>,
        delimiter: u8,
    ) -> SpiaResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SpiaError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), name, delimiter)
    }

    /// Reads a sheet from any reader.
    pub fn from_reader<R: Read>(
        reader: R,
        name: impl Into<String>,
        delimiter: u8,
    ) -> SpiaResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let mut records = Vec::new();
        for record in csv_reader.records() {
            records.push(record?);
        }

        Ok(Self {
            name: name.into(),
            records,
        })
    }
}

impl Worksheet for CsvWorksheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn row_count(&self) -> usize {
        self.records.len()
    }

    fn cell(&self, row: usize, col: usize) -> CellValue {
        match self.records.get(row).and_then(|record| record.get(col)) {
            Some(field) if !field.is_empty() => {
                // Excel prefixes UTF-8 exports with a BOM
                let field = if row == 0 && col == 0 {
                    field.trim_start_matches('\u{feff}')
                } else {
                    field
                };
                CellValue::Text(field.to_string())
            }
            _ => CellValue::Blank,
        }
    }

    fn row_len(&self, row: usize) -> usize {
        self.records.get(row).map_or(0, StringRecord::len)
    }
}

/// A single exported sheet is a workbook containing just that sheet.
impl Workbook for CsvWorksheet {
    fn sheet(&self, name: &str) -> Option<&dyn Worksheet> {
        (self.name == name).then_some(self as &dyn Worksheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reader_keeps_header_row() {
        let data = "RCPA Preferred term,RCPA Synonyms\nHaemoglobin,Hb; HGB\n";
        let sheet = CsvWorksheet::from_reader(data.as_bytes(), "Sheet1", b',').unwrap();

        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.cell(0, 0), CellValue::from("RCPA Preferred term"));
        assert_eq!(sheet.cell(1, 1), CellValue::from("Hb; HGB"));
    }

    #[test]
    fn test_empty_and_missing_fields_are_blank() {
        let data = "a\tb\tc\nx\t\n";
        let sheet = CsvWorksheet::from_reader(data.as_bytes(), "Sheet1", b'\t').unwrap();

        assert_eq!(sheet.row_len(0), 3);
        assert_eq!(sheet.row_len(1), 2);
        assert_eq!(sheet.cell(1, 1), CellValue::Blank);
        assert_eq!(sheet.cell(1, 2), CellValue::Blank);
        assert_eq!(sheet.cell(5, 0), CellValue::Blank);
    }

    #[test]
    fn test_quoted_fields() {
        let data = "term,history\n\"Red cell count, automated\",\"line one\nline two\"\n";
        let sheet = CsvWorksheet::from_reader(data.as_bytes(), "Sheet1", b',').unwrap();

        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.cell(1, 0), CellValue::from("Red cell count, automated"));
        assert_eq!(sheet.cell(1, 1), CellValue::from("line one\nline two"));
    }

    #[test]
    fn test_bom_is_stripped_from_first_cell() {
        let data = "\u{feff}RCPA Preferred term,RCPA Synonyms\n";
        let sheet = CsvWorksheet::from_reader(data.as_bytes(), "Sheet1", b',').unwrap();
        assert_eq!(sheet.cell(0, 0), CellValue::from("RCPA Preferred term"));
    }

    #[test]
    fn test_acts_as_single_sheet_workbook() {
        let sheet = CsvWorksheet::from_reader("a\n".as_bytes(), "Haem", b',').unwrap();
        assert!(sheet.sheet("Haem").is_some());
        assert!(sheet.sheet("Chem").is_none());
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = CsvWorksheet::from_path("/nonexistent/spia.csv", "Sheet1", b',');
        assert!(matches!(result, Err(SpiaError::FileNotFound { .. })));
    }
}
