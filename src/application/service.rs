use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::domain::{self, ExpenseRecord, Ledger};
use crate::storage::Repository;

use super::{AppError, CategoryChart, MonthlyTotal, Summary};

/// Application service providing high-level operations for the expense ledger.
/// This is the primary interface for any client (CLI, TUI, GUI, etc.).
///
/// The service owns the in-memory ledger for its whole lifetime. Mutations
/// never touch the disk; call [`LedgerService::save`] afterwards.
pub struct LedgerService {
    repo: Repository,
    ledger: Ledger,
    last_chart: Option<CategoryChart>,
}

impl LedgerService {
    /// Create a service over an already loaded ledger.
    pub fn new(repo: Repository, ledger: Ledger) -> Self {
        Self {
            repo,
            ledger,
            last_chart: None,
        }
    }

    /// Open the data file at `path`, starting empty if it is missing or malformed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let repo = Repository::new(path);
        let ledger = repo.load()?;
        tracing::info!(
            path = %repo.path().display(),
            count = ledger.len(),
            "opened ledger"
        );
        Ok(Self::new(repo, ledger))
    }

    pub fn data_path(&self) -> &Path {
        self.repo.path()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // ========================
    // Mutations
    // ========================

    /// Record an expense dated today. The ledger is not persisted.
    pub fn add_expense(
        &mut self,
        amount: &str,
        category: &str,
        note: &str,
    ) -> Result<ExpenseRecord, AppError> {
        self.add_expense_on(Local::now().date_naive(), amount, category, note)
    }

    /// Record an expense with an explicit date. The ledger is not persisted.
    pub fn add_expense_on(
        &mut self,
        date: NaiveDate,
        amount: &str,
        category: &str,
        note: &str,
    ) -> Result<ExpenseRecord, AppError> {
        let record = self.ledger.add(amount, category, note, date)?;
        tracing::debug!(
            amount = record.amount,
            category = %record.category,
            date = %record.date,
            "expense added"
        );
        Ok(record)
    }

    /// Write the full ledger to disk, replacing the previous file.
    pub fn save(&self) -> Result<(), AppError> {
        self.repo.save(&self.ledger)?;
        Ok(())
    }

    // ========================
    // Queries
    // ========================

    /// All records in insertion order.
    pub fn list_all(&self) -> &[ExpenseRecord] {
        self.ledger.records()
    }

    pub fn filter_by_category(&self, category: &str) -> Vec<ExpenseRecord> {
        self.ledger.filter_by_category(category)
    }

    /// Total and average of every amount. Fails with `EmptyLedger` when there is nothing recorded.
    pub fn summary(&self) -> Result<Summary, AppError> {
        let records = self.ledger.records();
        if records.is_empty() {
            return Err(AppError::EmptyLedger);
        }

        let total = domain::total(records);
        Ok(Summary {
            count: records.len(),
            total,
            average: total / records.len() as f64,
        })
    }

    /// Totals per `YYYY-MM`, ordered by first appearance in the ledger.
    pub fn monthly_totals(&self) -> Vec<MonthlyTotal> {
        domain::monthly_totals(self.ledger.records())
            .into_iter()
            .map(|(month, total)| MonthlyTotal { month, total })
            .collect()
    }

    /// Build the category breakdown for the pie chart and keep it as the
    /// most recently rendered chart, replacing any previous one.
    pub fn category_chart(&mut self) -> Result<CategoryChart, AppError> {
        self.last_chart = None;
        if self.ledger.is_empty() {
            return Err(AppError::EmptyLedger);
        }

        let chart = CategoryChart::from_breakdown(domain::chart_breakdown(self.ledger.records()));
        self.last_chart = Some(chart.clone());
        Ok(chart)
    }

    pub fn last_chart(&self) -> Option<&CategoryChart> {
        self.last_chart.as_ref()
    }
}
