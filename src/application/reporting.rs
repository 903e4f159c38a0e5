use serde::{Deserialize, Serialize};

use crate::domain::Amount;

/// Total and average spending across the whole ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub total: Amount,
    pub average: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// `YYYY-MM`
    pub month: String,
    pub total: Amount,
}

/// One wedge of the category pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub label: String,
    pub amount: Amount,
    /// Share of the chart total, 0..=100
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryChart {
    pub title: String,
    pub slices: Vec<ChartSlice>,
}

impl CategoryChart {
    pub const TITLE: &'static str = "Expense Distribution by Category";

    /// Build slices from ranked `(label, amount)` pairs, computing each share
    /// of the combined total.
    pub fn from_breakdown(breakdown: Vec<(String, Amount)>) -> Self {
        let total: Amount = breakdown.iter().map(|(_, amount)| amount).sum();
        let slices = breakdown
            .into_iter()
            .map(|(label, amount)| ChartSlice {
                label,
                amount,
                percentage: if total != 0.0 {
                    amount / total * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        Self {
            title: Self::TITLE.to_string(),
            slices,
        }
    }
}
