//! Loader-specific types for SPIA worksheet processing.

use thiserror::Error;

/// Sheet holding the Haematology terminology in the SPIA requesting workbook.
pub const HAEMATOLOGY_SHEET: &str = "Terminology for Haematology";

/// Preferred term excluded from the Haematology refset.
pub const CROSS_MATCH_TERM: &str = "Cross match";

/// Errors that can occur while loading a SPIA worksheet.
#[derive(Error, Debug)]
pub enum SpiaError {
    /// I/O error reading a worksheet export.
    #[error("IO error reading worksheet: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The workbook has no sheet with the expected name.
    #[error("Sheet not found: {sheet}")]
    SheetNotFound {
        /// The sheet name that was looked up.
        sheet: String,
    },

    /// Invalid header - the header row has too few columns.
    #[error("Invalid header: expected {expected} columns, found {found}")]
    InvalidHeader {
        /// Expected column count.
        expected: usize,
        /// Found column count.
        found: usize,
    },

    /// Unexpected column label in the header row.
    #[error("Unexpected column '{found}' at position {position}, expected '{expected}'")]
    UnexpectedColumn {
        /// The column position.
        position: usize,
        /// Expected column label.
        expected: String,
        /// Found column label.
        found: String,
    },
}

impl SpiaError {
    /// Returns true if the error means the sheet does not have the expected shape.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::SheetNotFound { .. } | Self::InvalidHeader { .. } | Self::UnexpectedColumn { .. }
        )
    }
}

/// Result type for SPIA loader operations.
pub type SpiaResult<T> = Result<T, SpiaError>;

/// Configuration for refset extraction.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Name of the sheet to read.
    pub sheet_name: String,
    /// Preferred terms whose rows are always dropped.
    pub excluded_terms: Vec<String>,
    /// Whether LOINC codes must also carry a correct check digit.
    pub verify_check_digit: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            sheet_name: HAEMATOLOGY_SHEET.to_string(),
            excluded_terms: vec![CROSS_MATCH_TERM.to_string()],
            verify_check_digit: false,
        }
    }
}

impl ExtractConfig {
    /// Returns true if rows with this preferred term are excluded.
    pub fn is_excluded_term(&self, term: &str) -> bool {
        self.excluded_terms.iter().any(|excluded| excluded == term)
    }
}

/// Why a data row produced no refset entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The preferred term is on the exclusion list.
    ExcludedTerm(String),
    /// The LOINC column is blank.
    MissingCode,
    /// The LOINC column failed validation.
    InvalidCode(String),
}

/// A data row that was left out of the refset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Zero-based row index within the sheet.
    pub row: usize,
    /// Why the row was skipped.
    pub reason: SkipReason,
}

/// Statistics from extracting a refset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Data rows read (header excluded).
    pub rows_read: usize,
    /// Rows that produced an entry.
    pub accepted: usize,
    /// Rows that were skipped.
    pub skipped: usize,
}

impl ExtractStats {
    /// Returns the percentage of data rows that produced an entry.
    pub fn acceptance_rate(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            (self.accepted as f64 / self.rows_read as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_config_default() {
        let config = ExtractConfig::default();
        assert_eq!(config.sheet_name, "Terminology for Haematology");
        assert!(config.is_excluded_term("Cross match"));
        assert!(!config.is_excluded_term("cross match"));
        assert!(!config.verify_check_digit);
    }

    #[test]
    fn test_extract_stats_acceptance_rate() {
        let stats = ExtractStats {
            rows_read: 8,
            accepted: 6,
            skipped: 2,
        };
        assert!((stats.acceptance_rate() - 75.0).abs() < 0.01);
        assert_eq!(ExtractStats::default().acceptance_rate(), 0.0);
    }

    #[test]
    fn test_contract_violation() {
        let err = SpiaError::UnexpectedColumn {
            position: 7,
            expected: "LOINC".to_string(),
            found: "Code".to_string(),
        };
        assert!(err.is_contract_violation());
        assert_eq!(
            err.to_string(),
            "Unexpected column 'Code' at position 7, expected 'LOINC'"
        );

        let err = SpiaError::FileNotFound {
            path: "missing.csv".to_string(),
        };
        assert!(!err.is_contract_violation());
    }
}
