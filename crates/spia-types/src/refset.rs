//! SPIA reference set entry type.
//!
//! A reference set entry links a locally defined RCPA term to a LOINC code,
//! together with the lab context the worksheet records for it.
//!
//! # Example
//!
//! ```
//! use spia_types::RefsetEntry;
//!
//! let entry = RefsetEntry {
//!     preferred_term: Some("Haemoglobin".to_string()),
//!     synonyms: ["Hb".to_string()].into_iter().collect(),
//!     code: Some("718-7".to_string()),
//!     ..Default::default()
//! };
//!
//! assert!(entry.has_synonym("Hb"));
//! ```

use std::collections::BTreeSet;

/// A single accepted row of a SPIA refset worksheet.
///
/// Every field other than `synonyms` is optional: a blank worksheet cell is
/// `None`, never an empty string. An entry produced by the loader always
/// carries a `code` that passed LOINC validation.
///
/// # Worksheet Columns
///
/// | Column | Field |
/// |--------|-------|
/// | RCPA Preferred term | `preferred_term` |
/// | RCPA Synonyms | `synonyms` (`;` separated) |
/// | Usage guidance | `usage_guidance` |
/// | Length | not read |
/// | Specimen | `specimen` |
/// | Unit | `unit` |
/// | UCUM | `ucum_unit` |
/// | LOINC | `code` |
/// | Component .. Method | `code_component` .. `code_method` |
/// | LongName | `code_long_name` |
/// | Version | `version` |
/// | History | `history` |
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefsetEntry {
    /// Canonical RCPA name for the concept.
    pub preferred_term: Option<String>,
    /// Alternate RCPA names, trimmed and de-duplicated.
    pub synonyms: BTreeSet<String>,
    /// Free-text usage guidance.
    pub usage_guidance: Option<String>,
    /// Specimen the test is performed on.
    pub specimen: Option<String>,
    /// Unit of measure as written by the RCPA.
    pub unit: Option<String>,
    /// Unit of measure in UCUM syntax.
    pub ucum_unit: Option<String>,
    /// LOINC code.
    pub code: Option<String>,
    /// LOINC component axis.
    pub code_component: Option<String>,
    /// LOINC property axis.
    pub code_property: Option<String>,
    /// LOINC timing axis.
    pub code_timing: Option<String>,
    /// LOINC system axis.
    pub code_system: Option<String>,
    /// LOINC scale axis.
    pub code_scale: Option<String>,
    /// LOINC method axis.
    pub code_method: Option<String>,
    /// LOINC long common name.
    pub code_long_name: Option<String>,
    /// Version of the worksheet row.
    pub version: Option<f64>,
    /// Free-text change history.
    pub history: Option<String>,
}

impl RefsetEntry {
    /// Returns true if `term` is one of the entry's synonyms.
    pub fn has_synonym(&self, term: &str) -> bool {
        self.synonyms.contains(term)
    }

    /// Returns the best available human-readable name.
    ///
    /// Falls back from the preferred term to the LOINC long name, then to
    /// the code itself.
    pub fn display_name(&self) -> Option<&str> {
        self.preferred_term
            .as_deref()
            .or(self.code_long_name.as_deref())
            .or(self.code.as_deref())
    }
}
