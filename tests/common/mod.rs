// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use spendbook::application::LedgerService;
use tempfile::TempDir;

/// Helper to create a test service over a data file in a temporary directory
pub fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let service = LedgerService::open(data_file(&temp_dir))?;
    Ok((service, temp_dir))
}

/// Path of the data file used by `test_service`
pub fn data_file(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("expenses.json")
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Test fixture: record `(amount, category, date)` entries with empty notes
pub fn record_all(service: &mut LedgerService, entries: &[(&str, &str, &str)]) -> Result<()> {
    for (amount, category, date) in entries {
        service.add_expense_on(parse_date(date), amount, category, "")?;
    }
    Ok(())
}
