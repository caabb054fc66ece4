use chrono::NaiveDate;
use serde::Serialize;

use crate::db::models::TreasuryEntry;

/// Headline figures of the treasury ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreasurySummary {
    pub current: Option<TreasuryEntry>,
    pub previous: Option<TreasuryEntry>,
    pub change: f64,
    pub change_percentage: f64,
    pub count: usize,
    pub first_date: Option<NaiveDate>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

impl TreasurySummary {
    /// Summarize a ledger sorted by date ascending.
    pub fn from_entries(entries: &[TreasuryEntry]) -> Self {
        let current = entries.last().cloned();
        let previous = entries.len().checked_sub(2).and_then(|i| entries.get(i)).cloned();

        let (change, change_percentage) = match (&current, &previous) {
            (Some(current), Some(previous)) => {
                let change = current.amount - previous.amount;
                let pct = if previous.amount == 0.0 {
                    0.0
                } else {
                    change / previous.amount * 100.0
                };
                (change, pct)
            }
            _ => (0.0, 0.0),
        };

        let amounts = entries.iter().map(|e| e.amount);
        Self {
            current,
            previous,
            change,
            change_percentage,
            count: entries.len(),
            first_date: entries.first().and_then(|e| e.date),
            min_amount: amounts.clone().reduce(f64::min),
            max_amount: amounts.reduce(f64::max),
        }
    }
}

/// Response body of `GET /api/treasury`.
#[derive(Debug, Clone, Serialize)]
pub struct TreasuryReport {
    pub entries: Vec<TreasuryEntry>,
    pub summary: TreasurySummary,
}

impl TreasuryReport {
    pub fn new(entries: Vec<TreasuryEntry>) -> Self {
        let summary = TreasurySummary::from_entries(&entries);
        Self { entries, summary }
    }
}
