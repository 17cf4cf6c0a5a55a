//! Header row contract.

use crate::types::{SpiaError, SpiaResult};
use crate::worksheet::{parse, Worksheet};

/// Checks that row 0 of a sheet carries exactly the expected column labels.
///
/// Labels are compared position by position. Columns beyond the expected
/// set are ignored.
///
/// # Errors
/// Returns [`SpiaError::InvalidHeader`] if the header row is shorter than
/// `expected`, or [`SpiaError::UnexpectedColumn`] for the first label that
/// does not match.
pub fn validate_header_row(sheet: &dyn Worksheet, expected: &[&str]) -> SpiaResult<()> {
    let found = sheet.row_len(0);
    if found < expected.len() {
        return Err(SpiaError::InvalidHeader {
            expected: expected.len(),
            found,
        });
    }

    for (position, expected_label) in expected.iter().enumerate() {
        let found = parse::string(&sheet.cell(0, position)).unwrap_or_default();
        if found != *expected_label {
            return Err(SpiaError::UnexpectedColumn {
                position,
                expected: expected_label.to_string(),
                found,
            });
        }
    }

    Ok(())
}
