use thiserror::Error;

use crate::domain::ValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Informational: there is nothing to summarize yet.
    #[error("No expenses to show.")]
    EmptyLedger,

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl AppError {
    /// True for conditions shown as an informational message rather than an error.
    pub fn is_informational(&self) -> bool {
        matches!(self, AppError::EmptyLedger)
    }
}
