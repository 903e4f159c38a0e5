use chrono::NaiveDate;

use super::{parse_amount, Amount, ExpenseRecord, ParseAmountError};

/// Number of categories shown individually in the chart breakdown.
pub const CHART_TOP_CATEGORIES: usize = 5;

/// Label for the bucket collecting every category past the top ones.
pub const OTHER_LABEL: &str = "Other";

/// Ordered, append-only collection of expense records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    records: Vec<ExpenseRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ExpenseRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validate raw user input and append a new record dated `date`.
    /// Nothing is appended when validation fails. Persisting is left to the caller.
    pub fn add(
        &mut self,
        amount_text: &str,
        category_text: &str,
        note_text: &str,
        date: NaiveDate,
    ) -> Result<ExpenseRecord, ValidationError> {
        let record = validate_expense(amount_text, category_text, note_text, date)?;
        self.records.push(record.clone());
        Ok(record)
    }

    pub fn filter_by_category(&self, category: &str) -> Vec<ExpenseRecord> {
        filter_by_category(&self.records, category)
    }
}

/// Build a record from raw input without touching any ledger.
/// Empty fields are checked before the amount is parsed.
pub fn validate_expense(
    amount_text: &str,
    category_text: &str,
    note_text: &str,
    date: NaiveDate,
) -> Result<ExpenseRecord, ValidationError> {
    if amount_text.trim().is_empty() {
        return Err(ValidationError::MissingField("amount"));
    }
    // Stored trimmed: " Food" and "Food" group as one category
    let category = category_text.trim();
    if category.is_empty() {
        return Err(ValidationError::MissingField("category"));
    }

    let amount = parse_amount(amount_text).map_err(|e| ValidationError::InvalidAmount {
        input: amount_text.trim().to_string(),
        reason: e,
    })?;

    Ok(ExpenseRecord::new(amount, category, date).with_note(note_text))
}

/// Records whose category equals `category`, ignoring case and surrounding whitespace.
pub fn filter_by_category(records: &[ExpenseRecord], category: &str) -> Vec<ExpenseRecord> {
    records
        .iter()
        .filter(|r| r.matches_category(category))
        .cloned()
        .collect()
}

pub fn total(records: &[ExpenseRecord]) -> Amount {
    records.iter().map(|r| r.amount).sum()
}

/// Sum per `YYYY-MM`, in the order each month is first seen.
pub fn monthly_totals(records: &[ExpenseRecord]) -> Vec<(String, Amount)> {
    group_sums(records.iter().map(|r| (r.month_key(), r.amount)))
}

/// Sum per exact category label, in the order each category is first seen.
pub fn category_totals(records: &[ExpenseRecord]) -> Vec<(String, Amount)> {
    group_sums(records.iter().map(|r| (r.category.clone(), r.amount)))
}

/// Category totals ranked by amount, largest first. The top
/// `CHART_TOP_CATEGORIES` are kept as-is; the rest collapse into a single
/// `OTHER_LABEL` entry, which is dropped unless its sum is positive.
pub fn chart_breakdown(records: &[ExpenseRecord]) -> Vec<(String, Amount)> {
    let mut ranked = category_totals(records);
    // Stable: equal totals keep first-seen order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let rest = if ranked.len() > CHART_TOP_CATEGORIES {
        ranked.split_off(CHART_TOP_CATEGORIES)
    } else {
        Vec::new()
    };

    let other: Amount = rest.iter().map(|(_, amount)| amount).sum();
    if other > 0.0 {
        ranked.push((OTHER_LABEL.to_string(), other));
    }
    ranked
}

fn group_sums(entries: impl Iterator<Item = (String, Amount)>) -> Vec<(String, Amount)> {
    let mut groups: Vec<(String, Amount)> = Vec::new();
    for (key, amount) in entries {
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, sum)) => *sum += amount,
            None => groups.push((key, amount)),
        }
    }
    groups
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty after trimming
    MissingField(&'static str),
    InvalidAmount {
        input: String,
        reason: ParseAmountError,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingField(field) => {
                write!(f, "Amount and Category are required (missing {})", field)
            }
            ValidationError::InvalidAmount { input, reason } => {
                write!(f, "Amount must be a number, got '{}': {}", input, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
