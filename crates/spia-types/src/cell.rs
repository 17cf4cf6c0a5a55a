//! Worksheet cell values.

/// The value held by one worksheet cell.
///
/// Formula cells are represented by their cached result, or by
/// [`CellValue::Error`] when the formula did not evaluate.
///
/// # Examples
///
/// ```
/// use spia_types::CellValue;
///
/// let cell = CellValue::from("Haemoglobin");
/// assert_eq!(cell.as_text(), Some("Haemoglobin"));
/// assert_eq!(CellValue::from(2.0).as_number(), Some(2.0));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// Cell has no content.
    #[default]
    Blank,
    /// Textual content.
    Text(String),
    /// Numeric content.
    Number(f64),
    /// Boolean content.
    Bool(bool),
    /// Cell holds an error value (e.g. `#REF!`).
    Error(String),
}

impl CellValue {
    /// Returns true if the cell has no content.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// Returns the text content, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the numeric content, if this is a numeric cell.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
