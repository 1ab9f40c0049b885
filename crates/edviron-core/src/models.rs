//! Data transfer objects exchanged with the payments backend

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::TransactionStatus;

/// A payment record as returned by the backend.
///
/// The record is owned by the backend; deserialization tolerates missing
/// optional fields, numeric ids and amounts sent as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, deserialize_with = "lenient::string")]
    pub collect_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub school_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub gateway_name: String,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub order_amount: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub transaction_amount: Decimal,
    #[serde(default)]
    pub status: TransactionStatus,
    /// ISO-8601 timestamp
    #[serde(default, deserialize_with = "lenient::string")]
    pub payment_time: String,
    #[serde(default, alias = "customOrderId", deserialize_with = "lenient::string")]
    pub custom_order_id: String,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_decimal", skip_serializing_if = "Option::is_none")]
    pub vendor_amount: Option<Decimal>,
}

impl Transaction {
    /// Payment time as a naive UTC timestamp
    pub fn payment_datetime(&self) -> Option<NaiveDateTime> {
        let raw = self.payment_time.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(dt);
            }
        }
        NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    /// Payment date (UTC)
    pub fn payment_date(&self) -> Option<NaiveDate> {
        self.payment_datetime().map(|dt| dt.date())
    }

    /// `YYYY-MM-DD HH:MM:SS`, or the raw value when it cannot be parsed
    pub fn datetime_label(&self) -> String {
        match self.payment_datetime() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => self.payment_time.clone(),
        }
    }

    /// School id used for grouping; blank ids group under `Unknown`
    pub fn school_key(&self) -> &str {
        let id = self.school_id.trim();
        if id.is_empty() {
            "Unknown"
        } else {
            id
        }
    }
}

/// Paging metadata of a listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default, alias = "totalEntries", alias = "total", deserialize_with = "lenient::count")]
    pub total_entries: usize,
    #[serde(default, alias = "totalPages", deserialize_with = "lenient::count")]
    pub total_pages: usize,
}

/// One page of `GET /transactions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionPage {
    #[serde(default, deserialize_with = "lenient::list")]
    pub data: Vec<Transaction>,
    #[serde(default)]
    pub meta: PageMeta,
}

impl TransactionPage {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Total pages, never less than one
    pub fn page_count(&self) -> usize {
        self.meta.total_pages.max(1)
    }
}

/// Reply of `GET /transactions/school/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchoolTransactions {
    #[serde(default, deserialize_with = "lenient::list")]
    pub transactions: Vec<Transaction>,
}

/// Login form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `POST /create-payment`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub school_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub callback_url: String,
}

/// Reply of `POST /create-payment`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentLink {
    #[serde(alias = "collectRequestUrl", alias = "Collect_request_url")]
    pub collect_request_url: String,
}

/// Reply of `GET /users/me`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, alias = "_id", deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
}

impl UserProfile {
    /// Best available display name
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("Admin")
    }
}

/// Session obtained from a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Cookie header value to forward to the backend (`name=value; name2=value2`)
    pub cookie: String,
    /// Backend message, if any
    pub message: Option<String>,
}

/// Lenient field decoders for backend JSON
mod lenient {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::str::FromStr;

    fn value_to_string(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => Some(other.to_string()),
        }
    }

    fn value_to_decimal(value: Value) -> Option<Decimal> {
        let text = match value {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.trim().to_string(),
            _ => return None,
        };
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(value_to_string(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(value_to_string(Value::deserialize(d)?))
    }

    pub fn decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
        Ok(value_to_decimal(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn opt_decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
        Ok(value_to_decimal(Value::deserialize(d)?))
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<usize, D::Error> {
        let value = Value::deserialize(d)?;
        let n = match value {
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        Ok(n.unwrap_or(0) as usize)
    }

    /// `null` becomes an empty list
    pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_transaction_lenient_decode() {
        let json = serde_json::json!({
            "collect_id": "65f1a2b3c4d5e6f7a8b9c0d1",
            "school_id": 12345,
            "gateway_name": "UPI",
            "order_amount": 2000,
            "transaction_amount": "2100.50",
            "status": "SUCCESS",
            "payment_time": "2025-04-02T10:15:00.000Z",
            "customOrderId": "ORD-1",
            "phone_number": 9876543210u64,
            "vendor_amount": null
        });
        let txn: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(txn.school_id, "12345");
        assert_eq!(txn.order_amount, Decimal::from(2000));
        assert_eq!(txn.transaction_amount, Decimal::from_str("2100.50").unwrap());
        assert_eq!(txn.status, TransactionStatus::Success);
        assert_eq!(txn.custom_order_id, "ORD-1");
        assert_eq!(txn.phone_number.as_deref(), Some("9876543210"));
        assert!(txn.vendor_amount.is_none());
        assert!(txn.student_name.is_none());
        assert_eq!(txn.datetime_label(), "2025-04-02 10:15:00");
    }

    #[test]
    fn test_transaction_minimal() {
        let txn: Transaction = serde_json::from_str("{}").unwrap();
        assert_eq!(txn.collect_id, "");
        assert_eq!(txn.order_amount, Decimal::ZERO);
        assert_eq!(txn.school_key(), "Unknown");
        assert!(txn.payment_date().is_none());
    }

    #[test]
    fn test_payment_time_formats() {
        let mut txn: Transaction = serde_json::from_str("{}").unwrap();
        txn.payment_time = "2025-04-02T23:30:00+05:30".to_string();
        assert_eq!(txn.payment_date(), NaiveDate::from_ymd_opt(2025, 4, 2));
        txn.payment_time = "2025-01-15 08:00:00".to_string();
        assert_eq!(txn.payment_date(), NaiveDate::from_ymd_opt(2025, 1, 15));
        txn.payment_time = "2025-03-09".to_string();
        assert_eq!(txn.payment_date(), NaiveDate::from_ymd_opt(2025, 3, 9));
        txn.payment_time = "yesterday".to_string();
        assert!(txn.payment_date().is_none());
        assert_eq!(txn.datetime_label(), "yesterday");
    }

    #[test]
    fn test_transaction_page_meta() {
        let json = r#"{"data":[{"collect_id":"a"}],"meta":{"totalEntries":31,"totalPages":4}}"#;
        let page: TransactionPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.meta.total_entries, 31);
        assert_eq!(page.meta.total_pages, 4);

        let page: TransactionPage = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.page_count(), 1);
    }

    #[test]
    fn test_payment_request_body() {
        let request = PaymentRequest {
            school_id: "65b0e6293e9f76a9694d84b4".to_string(),
            amount: Decimal::from_str("1500.5").unwrap(),
            callback_url: "https://example.com/done".to_string(),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["amount"], serde_json::json!(1500.5));
        assert_eq!(body["school_id"], "65b0e6293e9f76a9694d84b4");
    }

    #[test]
    fn test_user_profile_display_name() {
        let profile: UserProfile = serde_json::from_str(r#"{"_id":"u1","email":"a@b.com"}"#).unwrap();
        assert_eq!(profile.id.as_deref(), Some("u1"));
        assert_eq!(profile.display_name(), "a@b.com");
        assert_eq!(UserProfile::default().display_name(), "Admin");
    }
}
