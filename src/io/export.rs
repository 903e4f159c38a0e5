use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::domain::ExpenseRecord;

/// Snapshot written by the JSON export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub expenses: Vec<ExpenseRecord>,
}

/// Output format for [`Exporter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format '{}' (expected csv or json)", other)),
        }
    }
}

/// Exporter for converting ledger records to other formats
pub struct Exporter<'a> {
    records: &'a [ExpenseRecord],
}

impl<'a> Exporter<'a> {
    pub fn new(records: &'a [ExpenseRecord]) -> Self {
        Self { records }
    }

    /// Write records in `format`, returning how many were written.
    pub fn export<W: Write>(&self, format: ExportFormat, writer: W) -> Result<usize> {
        match format {
            ExportFormat::Csv => self.export_csv(writer),
            ExportFormat::Json => Ok(self.export_json(writer)?.expenses.len()),
        }
    }

    /// Export records to CSV, one row per expense
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["date", "amount", "category", "note"])?;

        let mut count = 0;
        for record in self.records {
            csv_writer.write_record([
                record.date.format("%Y-%m-%d").to_string(),
                record.amount.to_string(),
                record.category.clone(),
                record.note.clone(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export all records as a pretty-printed JSON snapshot
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            expenses: self.records.to_vec(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample() -> Vec<ExpenseRecord> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        vec![
            ExpenseRecord::new(12.5, "Food", date).with_note("lunch, with friends"),
            ExpenseRecord::new(40.0, "Travel", date),
        ]
    }

    #[test]
    fn test_export_csv() {
        let records = sample();
        let mut out = Vec::new();
        let count = Exporter::new(&records).export_csv(&mut out).unwrap();

        assert_eq!(count, 2);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "date,amount,category,note");
        assert_eq!(lines[1], "2024-01-05,12.5,Food,\"lunch, with friends\"");
        assert_eq!(lines[2], "2024-01-05,40,Travel,");
    }

    #[test]
    fn test_export_json() {
        let records = sample();
        let mut out = Vec::new();
        let snapshot = Exporter::new(&records).export_json(&mut out).unwrap();

        assert_eq!(snapshot.expenses.len(), 2);
        let parsed: LedgerSnapshot = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.expenses, records);
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("json".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
