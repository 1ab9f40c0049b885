//! Report structures for pages and API responses

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::models::TransactionPage;
use super::query::TransactionQuery;

/// A label with a count (status, payment mode, school)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

impl CountEntry {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Number of transactions on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    /// `YYYY-MM-DD`
    pub date: String,
    pub count: usize,
}

/// Transaction amount collected in one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAmount {
    pub month: String,
    pub amount: Decimal,
}

/// Fixed success/pending/failed triple for the status pie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub success: usize,
    pub pending: usize,
    pub failed: usize,
}

impl StatusSummary {
    pub fn entries(&self) -> Vec<CountEntry> {
        vec![
            CountEntry::new("Success", self.success),
            CountEntry::new("Pending", self.pending),
            CountEntry::new("Failed", self.failed),
        ]
    }

    pub fn total(&self) -> usize {
        self.success + self.pending + self.failed
    }
}

/// Headline totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub total_transaction_amount: Decimal,
    pub total_order_amount: Decimal,
    pub total_transactions: usize,
    pub total_schools: usize,
}

/// One row of the recent transactions widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTransaction {
    /// `YYYY-MM-DD HH:MM:SS`
    pub date: String,
    pub school_id: String,
    pub amount: Decimal,
}

/// Everything the analytics page shows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub summary: TransactionSummary,
    pub status_summary: StatusSummary,
    pub status_breakdown: Vec<CountEntry>,
    pub time_series: Vec<DailyCount>,
    pub payment_modes: Vec<CountEntry>,
    pub pending_by_school: Vec<CountEntry>,
    pub monthly_volume: Vec<MonthlyAmount>,
    pub recent: Vec<RecentTransaction>,
    /// Range used for the monthly volume, `YYYY-MM-DD to YYYY-MM-DD`
    pub period: String,
}

/// Transaction listing for the JSON API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub query: TransactionQuery,
    #[serde(flatten)]
    pub page: TransactionPage,
}

/// School id list for the JSON API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolsResponse {
    pub schools: Vec<String>,
    pub total_count: usize,
}
