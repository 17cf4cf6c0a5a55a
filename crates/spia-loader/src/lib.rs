//! # spia-loader
//!
//! Parser and validator for RCPA SPIA terminology worksheets.
//!
//! Reads a worksheet through the [`Worksheet`]/[`Workbook`] traits, checks
//! its header row, and keeps each data row that maps a term to a valid
//! LOINC code as a [`RefsetEntry`](spia_types::RefsetEntry).
//!
//! ```no_run
//! use spia_loader::{CsvWorksheet, HaematologyRefset, HasRefsetEntries, HAEMATOLOGY_SHEET};
//!
//! let sheet = CsvWorksheet::from_path("haematology.csv", HAEMATOLOGY_SHEET, b',')?;
//! let refset = HaematologyRefset::new(&sheet)?;
//!
//! for entry in refset.refset_entries() {
//!     println!("{:?} -> {:?}", entry.preferred_term, entry.code);
//! }
//! # Ok::<(), spia_loader::SpiaError>(())
//! ```

#![warn(missing_docs)]

mod csv_sheet;
mod haematology;
mod header;
pub mod loinc;
mod types;
pub mod worksheet;

pub use csv_sheet::CsvWorksheet;
pub use haematology::{HaematologyRefset, HasRefsetEntries, HAEMATOLOGY_COLUMNS};
pub use header::validate_header_row;
pub use loinc::{CodeValidator, LoincCodeValidator};
pub use types::{
    ExtractConfig, ExtractStats, SkipReason, SkippedRow, SpiaError, SpiaResult,
    CROSS_MATCH_TERM, HAEMATOLOGY_SHEET,
};
pub use worksheet::{InMemoryWorkbook, InMemoryWorksheet, Workbook, Worksheet};

// Re-export spia-types for convenience
pub use spia_types;
