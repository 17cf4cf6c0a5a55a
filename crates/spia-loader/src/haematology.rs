//! Haematology refset extraction.
//!
//! Reads the "Terminology for Haematology" sheet of the SPIA requesting
//! workbook and keeps every row that maps an RCPA term to a LOINC code.

use std::collections::BTreeSet;

use spia_types::RefsetEntry;
use tracing::{debug, info};

use crate::header::validate_header_row;
use crate::loinc::{CodeValidator, LoincCodeValidator};
use crate::types::{ExtractConfig, ExtractStats, SkipReason, SkippedRow, SpiaError, SpiaResult};
use crate::worksheet::{parse, Workbook, Worksheet};

/// Expected column labels of the Haematology sheet.
pub const HAEMATOLOGY_COLUMNS: &[&str] = &[
    "RCPA Preferred term",
    "RCPA Synonyms",
    "Usage guidance",
    "Length",
    "Specimen",
    "Unit",
    "UCUM",
    "LOINC",
    "Component",
    "Property",
    "Timing",
    "System",
    "Scale",
    "Method",
    "LongName",
    "Version",
    "History",
];

// Column 3 (Length) holds formulas and is never read.
const PREFERRED_TERM: usize = 0;
const SYNONYMS: usize = 1;
const USAGE_GUIDANCE: usize = 2;
const SPECIMEN: usize = 4;
const UNIT: usize = 5;
const UCUM: usize = 6;
const LOINC: usize = 7;
const COMPONENT: usize = 8;
const PROPERTY: usize = 9;
const TIMING: usize = 10;
const SYSTEM: usize = 11;
const SCALE: usize = 12;
const METHOD: usize = 13;
const LONG_NAME: usize = 14;
const VERSION: usize = 15;
const HISTORY: usize = 16;

/// Something that holds an ordered list of refset entries.
pub trait HasRefsetEntries {
    /// Returns the entries in worksheet row order.
    fn refset_entries(&self) -> &[RefsetEntry];
}

/// The Haematology reference set.
///
/// Built in a single pass over the sheet; entries cannot be changed
/// afterwards.
///
/// # Example
///
/// ```
/// use spia_loader::{HaematologyRefset, HasRefsetEntries, InMemoryWorkbook, InMemoryWorksheet};
/// use spia_loader::{HAEMATOLOGY_COLUMNS, HAEMATOLOGY_SHEET};
///
/// let mut sheet = InMemoryWorksheet::new(HAEMATOLOGY_SHEET);
/// sheet.push_row(HAEMATOLOGY_COLUMNS.iter().copied());
/// sheet.push_row(["Haemoglobin", "Hb", "", "", "Blood", "g/L", "g/L", "718-7"]);
///
/// let workbook = InMemoryWorkbook::new().with_sheet(sheet);
/// let refset = HaematologyRefset::new(&workbook)?;
///
/// assert_eq!(refset.refset_entries().len(), 1);
/// assert_eq!(refset.refset_entries()[0].code.as_deref(), Some("718-7"));
/// # Ok::<(), spia_loader::SpiaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HaematologyRefset {
    entries: Vec<RefsetEntry>,
    skipped: Vec<SkippedRow>,
    stats: ExtractStats,
}

impl HaematologyRefset {
    /// Extracts the refset using the default configuration and a syntax-only
    /// LOINC validator.
    ///
    /// # Errors
    /// Fails if the sheet is missing or its header row does not match
    /// [`HAEMATOLOGY_COLUMNS`].
    pub fn new<W: Workbook + ?Sized>(workbook: &W) -> SpiaResult<Self> {
        Self::with_config(workbook, ExtractConfig::default())
    }

    /// Extracts the refset using the given configuration.
    pub fn with_config<W: Workbook + ?Sized>(workbook: &W, config: ExtractConfig) -> SpiaResult<Self> {
        let validator = if config.verify_check_digit {
            LoincCodeValidator::with_check_digit()
        } else {
            LoincCodeValidator::new()
        };
        Self::with_validator(workbook, &config, &validator)
    }

    /// Extracts the refset, deciding code validity with `validator`.
    pub fn with_validator<W, V>(workbook: &W, config: &ExtractConfig, validator: &V) -> SpiaResult<Self>
    where
        W: Workbook + ?Sized,
        V: CodeValidator + ?Sized,
    {
        let sheet = workbook
            .sheet(&config.sheet_name)
            .ok_or_else(|| SpiaError::SheetNotFound {
                sheet: config.sheet_name.clone(),
            })?;

        validate_header_row(sheet, HAEMATOLOGY_COLUMNS)?;

        let mut refset = Self {
            entries: Vec::new(),
            skipped: Vec::new(),
            stats: ExtractStats::default(),
        };

        for row in 1..sheet.row_count() {
            refset.stats.rows_read += 1;
            match extract_row(sheet, row, config, validator) {
                Ok(entry) => {
                    refset.stats.accepted += 1;
                    refset.entries.push(entry);
                }
                Err(reason) => {
                    debug!(row, ?reason, "Skipping row");
                    refset.stats.skipped += 1;
                    refset.skipped.push(SkippedRow { row, reason });
                }
            }
        }

        info!(
            sheet = sheet.name(),
            rows = refset.stats.rows_read,
            accepted = refset.stats.accepted,
            skipped = refset.stats.skipped,
            "Extracted Haematology refset"
        );

        Ok(refset)
    }

    /// Returns the rows that produced no entry, in row order.
    pub fn skipped_rows(&self) -> &[SkippedRow] {
        &self.skipped
    }

    /// Returns extraction statistics.
    pub fn stats(&self) -> &ExtractStats {
        &self.stats
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no row was accepted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl HasRefsetEntries for HaematologyRefset {
    fn refset_entries(&self) -> &[RefsetEntry] {
        &self.entries
    }
}

/// Builds the entry for one data row, or says why the row is skipped.
fn extract_row<V>(
    sheet: &dyn Worksheet,
    row: usize,
    config: &ExtractConfig,
    validator: &V,
) -> Result<RefsetEntry, SkipReason>
where
    V: CodeValidator + ?Sized,
{
    let string = |col| parse::string(&sheet.cell(row, col));

    let preferred_term = string(PREFERRED_TERM);
    if let Some(term) = preferred_term.as_deref() {
        if config.is_excluded_term(term) {
            return Err(SkipReason::ExcludedTerm(term.to_string()));
        }
    }

    let synonyms: BTreeSet<String> = string(SYNONYMS)
        .map(|raw| parse::list(&raw).map(str::to_string).collect())
        .unwrap_or_default();

    let usage_guidance = string(USAGE_GUIDANCE);
    let specimen = string(SPECIMEN);
    let unit = string(UNIT);
    let ucum_unit = string(UCUM);

    let code = match string(LOINC) {
        None => return Err(SkipReason::MissingCode),
        Some(code) if !validator.is_valid(&code) => return Err(SkipReason::InvalidCode(code)),
        Some(code) => code,
    };

    Ok(RefsetEntry {
        preferred_term,
        synonyms,
        usage_guidance,
        specimen,
        unit,
        ucum_unit,
        code: Some(code),
        code_component: string(COMPONENT),
        code_property: string(PROPERTY),
        code_timing: string(TIMING),
        code_system: string(SYSTEM),
        code_scale: string(SCALE),
        code_method: string(METHOD),
        code_long_name: string(LONG_NAME),
        version: parse::numeric(&sheet.cell(row, VERSION)),
        history: string(HISTORY),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HAEMATOLOGY_SHEET;
    use crate::worksheet::{InMemoryWorkbook, InMemoryWorksheet};
    use spia_types::CellValue;

    fn sheet_with_rows(rows: Vec<Vec<&str>>) -> InMemoryWorkbook {
        let mut sheet = InMemoryWorksheet::new(HAEMATOLOGY_SHEET);
        sheet.push_row(HAEMATOLOGY_COLUMNS.iter().copied());
        for row in rows {
            sheet.push_row(row);
        }
        InMemoryWorkbook::new().with_sheet(sheet)
    }

    #[test]
    fn test_column_count() {
        assert_eq!(HAEMATOLOGY_COLUMNS.len(), 17);
        assert_eq!(HAEMATOLOGY_COLUMNS[LOINC], "LOINC");
        assert_eq!(HAEMATOLOGY_COLUMNS[VERSION], "Version");
        assert_eq!(HAEMATOLOGY_COLUMNS[HISTORY], "History");
    }

    #[test]
    fn test_missing_sheet() {
        let workbook = InMemoryWorkbook::new().with_sheet(InMemoryWorksheet::new("Chemical"));
        let err = HaematologyRefset::new(&workbook).unwrap_err();
        assert!(matches!(err, SpiaError::SheetNotFound { .. }));
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_header_only_sheet() {
        let refset = HaematologyRefset::new(&sheet_with_rows(vec![])).unwrap();
        assert!(refset.is_empty());
        assert_eq!(refset.stats(), &ExtractStats::default());
    }

    #[test]
    fn test_excluded_term() {
        let workbook = sheet_with_rows(vec![vec![
            "Cross match", "", "", "", "", "", "", "718-7",
        ]]);
        let refset = HaematologyRefset::new(&workbook).unwrap();

        assert!(refset.is_empty());
        assert_eq!(
            refset.skipped_rows(),
            &[SkippedRow {
                row: 1,
                reason: SkipReason::ExcludedTerm("Cross match".to_string()),
            }]
        );
    }

    #[test]
    fn test_excluded_term_is_exact_match() {
        let workbook = sheet_with_rows(vec![vec![
            "Cross match (urgent)", "", "", "", "", "", "", "718-7",
        ]]);
        let refset = HaematologyRefset::new(&workbook).unwrap();
        assert_eq!(refset.len(), 1);
    }

    #[test]
    fn test_missing_and_invalid_code() {
        let workbook = sheet_with_rows(vec![
            vec!["Blood film", "", "", "", "Blood"],
            vec!["ESR", "", "", "", "Blood", "mm/h", "mm/h", "Not mapped"],
        ]);
        let refset = HaematologyRefset::new(&workbook).unwrap();

        assert!(refset.is_empty());
        let reasons: Vec<&SkipReason> = refset.skipped_rows().iter().map(|s| &s.reason).collect();
        assert_eq!(
            reasons,
            vec![
                &SkipReason::MissingCode,
                &SkipReason::InvalidCode("Not mapped".to_string())
            ]
        );
    }

    #[test]
    fn test_numeric_code_cell_is_missing() {
        let mut sheet = InMemoryWorksheet::new(HAEMATOLOGY_SHEET);
        sheet.push_row(HAEMATOLOGY_COLUMNS.iter().copied());
        sheet.set_cell(1, 0, "Platelets");
        sheet.set_cell(1, LOINC, 777.0);
        let workbook = InMemoryWorkbook::new().with_sheet(sheet);

        let refset = HaematologyRefset::new(&workbook).unwrap();
        assert_eq!(refset.skipped_rows()[0].reason, SkipReason::MissingCode);
    }

    #[test]
    fn test_custom_validator() {
        let workbook = sheet_with_rows(vec![vec!["Haemoglobin", "", "", "", "", "", "", "HB01"]]);
        let config = ExtractConfig::default();
        let refset =
            HaematologyRefset::with_validator(&workbook, &config, &|code: &str| code.starts_with("HB"))
                .unwrap();

        assert_eq!(refset.len(), 1);
        assert_eq!(refset.refset_entries()[0].code.as_deref(), Some("HB01"));
    }

    #[test]
    fn test_check_digit_config() {
        let workbook = sheet_with_rows(vec![
            vec!["Haemoglobin", "", "", "", "", "", "", "718-7"],
            vec!["Haematocrit", "", "", "", "", "", "", "4544-4"],
        ]);
        let config = ExtractConfig {
            verify_check_digit: true,
            ..Default::default()
        };
        let refset = HaematologyRefset::with_config(&workbook, config).unwrap();

        assert_eq!(refset.len(), 1);
        assert_eq!(refset.skipped_rows()[0].row, 2);
    }

    #[test]
    fn test_length_column_is_ignored() {
        let mut sheet = InMemoryWorksheet::new(HAEMATOLOGY_SHEET);
        sheet.push_row(HAEMATOLOGY_COLUMNS.iter().copied());
        sheet.push_row(["Haemoglobin", "", "", "", "", "", "", "718-7"]);
        sheet.set_cell(1, 3, CellValue::Error("#VALUE!".to_string()));
        let workbook = InMemoryWorkbook::new().with_sheet(sheet);

        let refset = HaematologyRefset::new(&workbook).unwrap();
        assert_eq!(refset.len(), 1);
    }

    #[test]
    fn test_stats() {
        let workbook = sheet_with_rows(vec![
            vec!["Haemoglobin", "", "", "", "", "", "", "718-7"],
            vec!["Cross match"],
            vec!["Film comment"],
            vec!["Haematocrit", "", "", "", "", "", "", "4544-3"],
        ]);
        let refset = HaematologyRefset::new(&workbook).unwrap();

        assert_eq!(
            refset.stats(),
            &ExtractStats {
                rows_read: 4,
                accepted: 2,
                skipped: 2,
            }
        );
        assert!((refset.stats().acceptance_rate() - 50.0).abs() < 0.01);
    }
}
