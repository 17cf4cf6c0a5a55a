//! SPIA refset ingestion binary.
//!
//! Reads a delimited export of the Haematology sheet, extracts the refset
//! and writes the accepted entries to stdout as JSON.

use std::io::Write;

use spia_loader::{CsvWorksheet, ExtractConfig, HaematologyRefset, HasRefsetEntries, SkipReason};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_SHEET_PATH: &str = "Terminology for Haematology.csv";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; stdout is reserved for the JSON output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Sheet path from the first argument, then env, then default
    let sheet_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SPIA_SHEET_PATH").ok())
        .unwrap_or_else(|| DEFAULT_SHEET_PATH.to_string());

    let delimiter = match std::env::var("SPIA_DELIMITER").as_deref() {
        Ok("tab") | Ok("\\t") => b'\t',
        Ok(other) if other.len() == 1 => other.as_bytes()[0],
        _ => b',',
    };

    let config = ExtractConfig {
        verify_check_digit: std::env::var("SPIA_VERIFY_CHECK_DIGIT")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false),
        ..ExtractConfig::default()
    };

    tracing::info!("Loading SPIA worksheet from: {}", sheet_path);
    let sheet = CsvWorksheet::from_path(&sheet_path, config.sheet_name.clone(), delimiter)?;

    let refset = match HaematologyRefset::with_config(&sheet, config) {
        Ok(refset) => refset,
        Err(e) if e.is_contract_violation() => {
            tracing::error!("{} is not a recognised Haematology worksheet: {}", sheet_path, e);
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    for skipped in refset.skipped_rows() {
        match &skipped.reason {
            SkipReason::InvalidCode(code) => {
                tracing::warn!("Row {}: invalid LOINC code '{}'", skipped.row, code)
            }
            SkipReason::MissingCode | SkipReason::ExcludedTerm(_) => {}
        }
    }

    let stats = refset.stats();
    tracing::info!(
        "Accepted {} of {} rows ({:.1}%)",
        stats.accepted,
        stats.rows_read,
        stats.acceptance_rate()
    );

    let entries: &[spia_types::RefsetEntry] = refset.refset_entries();
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, entries)?;
    writeln!(stdout)?;

    Ok(())
}
