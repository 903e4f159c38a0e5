use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{format_amount, Amount};

/// A single recorded expense.
/// Records are immutable once appended to a ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Magnitude spent, currency-agnostic
    pub amount: Amount,
    /// Label used for filtering and charting
    pub category: String,
    /// Free text, may be empty
    pub note: String,
    /// Calendar day the expense was recorded, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
}

impl ExpenseRecord {
    pub fn new(amount: Amount, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            amount,
            category: category.into(),
            note: String::new(),
            date,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Year-month bucket (`YYYY-MM`) used for monthly aggregation.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Case-insensitive comparison against a category query. Both sides are trimmed.
    pub fn matches_category(&self, query: &str) -> bool {
        self.category.trim().to_lowercase() == query.trim().to_lowercase()
    }

    /// One display line, as rendered in expense listings.
    pub fn display_line(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            format_amount(self.amount),
            self.category,
            self.note,
            self.date.format("%Y-%m-%d")
        )
    }
}
