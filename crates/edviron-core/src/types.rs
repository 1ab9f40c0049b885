//! Basic enumerations shared by queries, models and analytics

use serde::{Deserialize, Serialize};

/// Payment status of a transaction.
///
/// The backend is not consistent about casing, so parsing folds case and
/// anything unrecognised is kept in `Other`, trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
    Other(String),
}

impl TransactionStatus {
    /// Statuses offered by the filter form
    pub const FILTERABLE: [TransactionStatus; 3] = [
        TransactionStatus::Success,
        TransactionStatus::Pending,
        TransactionStatus::Failed,
    ];

    /// Lowercase wire value
    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Success => "success",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Other(s) => s.as_str(),
        }
    }

    /// Value the filter form sends as `status=`; failed rows are stored as
    /// `Failed` by the backend, the others in lowercase
    pub fn filter_value(&self) -> &str {
        match self {
            TransactionStatus::Failed => "Failed",
            other => other.as_str(),
        }
    }

    /// Capitalised label for display
    pub fn label(&self) -> String {
        edviron_utils::capitalize(self.as_str())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TransactionStatus::Pending)
    }
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Other(String::new())
    }
}

impl From<&str> for TransactionStatus {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "pending" => TransactionStatus::Pending,
            "success" => TransactionStatus::Success,
            "failed" => TransactionStatus::Failed,
            other => TransactionStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for TransactionStatus {
    fn from(s: String) -> Self {
        TransactionStatus::from(s.as_str())
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Asc
    }
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Arrow shown next to the active column
    pub fn indicator(&self) -> &'static str {
        match self {
            SortOrder::Asc => "▲",
            SortOrder::Desc => "▼",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Columns the transaction listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    PaymentTime,
    OrderAmount,
    TransactionAmount,
}

impl Default for SortField {
    fn default() -> Self {
        SortField::PaymentTime
    }
}

impl SortField {
    pub const ALL: [SortField; 3] = [SortField::PaymentTime, SortField::OrderAmount, SortField::TransactionAmount];

    /// Backend `sortBy` value
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::PaymentTime => "payment_time",
            SortField::OrderAmount => "order_amount",
            SortField::TransactionAmount => "transaction_amount",
        }
    }

    /// Column header text
    pub fn label(&self) -> &'static str {
        match self {
            SortField::PaymentTime => "Date & Time",
            SortField::OrderAmount => "Order Amt",
            SortField::TransactionAmount => "Transaction Amt",
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment_time" => Ok(SortField::PaymentTime),
            "order_amount" => Ok(SortField::OrderAmount),
            "transaction_amount" => Ok(SortField::TransactionAmount),
            _ => Err(format!("Invalid sort field: {}", s)),
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
