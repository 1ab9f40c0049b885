//! Client-side aggregation over a bounded sample of transactions

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::models::Transaction;
use super::reports::{
    CountEntry, DailyCount, MonthlyAmount, RecentTransaction, StatusSummary, TransactionSummary,
};
use super::time::{month_name, rolling_month_labels, DateRange};
use super::types::TransactionStatus;

/// Count by key in first-seen order
fn count_ordered(keys: impl Iterator<Item = String>) -> Vec<CountEntry> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for key in keys {
        let entry = counts.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            0
        });
        *entry += 1;
    }
    order
        .into_iter()
        .map(|label| {
            let count = counts.get(&label).copied().unwrap_or(0);
            CountEntry { label, count }
        })
        .collect()
}

/// Count per lowercase status; blank statuses are skipped
pub fn status_breakdown(transactions: &[Transaction]) -> Vec<CountEntry> {
    count_ordered(
        transactions
            .iter()
            .map(|t| t.status.as_str().to_string())
            .filter(|s| !s.is_empty()),
    )
}

/// Count per payment day, ascending dates
pub fn time_series(transactions: &[Transaction]) -> Vec<DailyCount> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for date in transactions.iter().filter_map(Transaction::payment_date) {
        *days.entry(date).or_insert(0) += 1;
    }
    days.into_iter()
        .map(|(date, count)| DailyCount {
            date: date.format("%Y-%m-%d").to_string(),
            count,
        })
        .collect()
}

/// Count per lowercase gateway name; blank gateways are skipped
pub fn payment_modes(transactions: &[Transaction]) -> Vec<CountEntry> {
    count_ordered(
        transactions
            .iter()
            .map(|t| t.gateway_name.trim().to_lowercase())
            .filter(|g| !g.is_empty()),
    )
}

/// Pending transactions per school
pub fn pending_by_school(transactions: &[Transaction]) -> Vec<CountEntry> {
    count_ordered(
        transactions
            .iter()
            .filter(|t| t.status.is_pending())
            .map(|t| t.school_key().to_string()),
    )
}

pub fn status_summary(transactions: &[Transaction]) -> StatusSummary {
    let mut summary = StatusSummary::default();
    for txn in transactions {
        match txn.status {
            TransactionStatus::Success => summary.success += 1,
            TransactionStatus::Pending => summary.pending += 1,
            TransactionStatus::Failed => summary.failed += 1,
            TransactionStatus::Other(_) => {}
        }
    }
    summary
}

/// Transaction amount per month over `range`, labelled with rolling month
/// names that start at the month of `today`
pub fn monthly_volume(transactions: &[Transaction], range: &DateRange, today: NaiveDate) -> Vec<MonthlyAmount> {
    let mut totals: HashMap<&'static str, Decimal> = HashMap::new();
    for txn in transactions {
        let Some(date) = txn.payment_date() else {
            continue;
        };
        if !range.contains(&date) {
            continue;
        }
        *totals.entry(month_name(&date)).or_insert(Decimal::ZERO) += txn.transaction_amount;
    }

    rolling_month_labels(today)
        .into_iter()
        .map(|month| MonthlyAmount {
            month: month.to_string(),
            amount: totals.get(month).copied().unwrap_or(Decimal::ZERO),
        })
        .collect()
}

pub fn summary(transactions: &[Transaction]) -> TransactionSummary {
    let schools: HashSet<&str> = transactions.iter().map(|t| t.school_id.as_str()).collect();
    TransactionSummary {
        total_transaction_amount: transactions.iter().map(|t| t.transaction_amount).sum(),
        total_order_amount: transactions.iter().map(|t| t.order_amount).sum(),
        total_transactions: transactions.len(),
        total_schools: schools.len(),
    }
}

/// The `count` newest transactions, newest first
pub fn recent_transactions(transactions: &[Transaction], count: usize) -> Vec<RecentTransaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.payment_datetime().cmp(&a.payment_datetime()));
    sorted
        .into_iter()
        .take(count)
        .map(|t| RecentTransaction {
            date: t.datetime_label(),
            school_id: t.school_id.clone(),
            amount: t.transaction_amount,
        })
        .collect()
}

/// Unique school ids in first-seen order
pub fn unique_school_ids(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = HashSet::new();
    transactions
        .iter()
        .map(|t| t.school_id.trim())
        .filter(|id| !id.is_empty() && seen.insert(id.to_string()))
        .map(str::to_string)
        .collect()
}
