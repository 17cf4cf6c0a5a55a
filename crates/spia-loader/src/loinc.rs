//! LOINC code validation.
//!
//! A LOINC code is an item number of one to seven digits, a hyphen, and a
//! single mod-10 check digit, e.g. `718-7`. Validation here is structural:
//! a well-formed code is not necessarily present in any LOINC release.

/// A predicate deciding whether a code is acceptable for a refset.
///
/// Implemented by [`LoincCodeValidator`] and by any `Fn(&str) -> bool`.
pub trait CodeValidator {
    /// Returns true if `code` is well formed.
    fn is_valid(&self, code: &str) -> bool;
}

impl<F> CodeValidator for F
where
    F: Fn(&str) -> bool,
{
    fn is_valid(&self, code: &str) -> bool {
        self(code)
    }
}

/// Maximum number of digits before the hyphen.
const MAX_ITEM_DIGITS: usize = 7;

/// Validates LOINC codes against the LOINC code syntax.
///
/// # Example
///
/// ```
/// use spia_loader::{CodeValidator, LoincCodeValidator};
///
/// let validator = LoincCodeValidator::new();
/// assert!(validator.is_valid("718-7"));
/// assert!(!validator.is_valid("718"));
///
/// let strict = LoincCodeValidator::with_check_digit();
/// assert!(strict.is_valid("718-7"));
/// assert!(!strict.is_valid("718-6"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoincCodeValidator {
    verify_check_digit: bool,
}

impl LoincCodeValidator {
    /// Creates a validator that checks code syntax only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator that also verifies the check digit.
    pub fn with_check_digit() -> Self {
        Self {
            verify_check_digit: true,
        }
    }

    /// Returns true if this validator verifies check digits.
    pub fn verifies_check_digit(&self) -> bool {
        self.verify_check_digit
    }
}

impl CodeValidator for LoincCodeValidator {
    fn is_valid(&self, code: &str) -> bool {
        let Some((item, check)) = split_code(code) else {
            return false;
        };
        if !self.verify_check_digit {
            return true;
        }
        check_digit(item) == Some(check)
    }
}

/// Splits a syntactically valid code into its item number and check digit.
fn split_code(code: &str) -> Option<(&str, u8)> {
    let (item, check) = code.split_once('-')?;

    if item.is_empty() || item.len() > MAX_ITEM_DIGITS || !item.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match check.as_bytes() {
        [digit] if digit.is_ascii_digit() => Some((item, digit - b'0')),
        _ => None,
    }
}

/// Computes the mod-10 check digit for a LOINC item number.
///
/// Returns `None` if `item` is empty or contains anything but ASCII digits.
///
/// ```
/// assert_eq!(spia_loader::loinc::check_digit("718"), Some(7));
/// assert_eq!(spia_loader::loinc::check_digit("2345"), Some(7));
/// ```
pub fn check_digit(item: &str) -> Option<u8> {
    if item.is_empty() || !item.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Digits in odd positions from the right are doubled.
    let sum: u32 = item
        .bytes()
        .rev()
        .map(|b| u32::from(b - b'0'))
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    Some(((10 - sum % 10) % 10) as u8)
}
