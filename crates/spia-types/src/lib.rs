//! # spia-types
//!
//! Type definitions for RCPA Standards for Pathology Informatics in Australia
//! (SPIA) terminology refsets.
//!
//! This crate provides the records produced when a SPIA requesting or
//! reporting worksheet is ingested, and the cell values those worksheets are
//! made of.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use spia_types::{CellValue, RefsetEntry};
//!
//! let entry = RefsetEntry {
//!     preferred_term: Some("Haemoglobin".to_string()),
//!     code: Some("718-7".to_string()),
//!     ..Default::default()
//! };
//!
//! assert_eq!(entry.display_name(), Some("Haemoglobin"));
//! assert!(CellValue::Blank.is_blank());
//! ```

#![warn(missing_docs)]

mod cell;
mod refset;

pub use cell::CellValue;
pub use refset::RefsetEntry;
