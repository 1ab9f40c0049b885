//! In-memory backend for tests of the dashboard and its HTTP surface

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Mutex;

use super::backend::{BackendApi, Session};
use super::error::{CoreError, CoreResult};
use super::models::{
    AuthSession, Credentials, PageMeta, PaymentLink, PaymentRequest, Registration, Transaction, TransactionPage,
    UserProfile,
};
use super::query::TransactionQuery;
use super::types::TransactionStatus;

pub const VALID_COOKIE: &str = "token=valid-session";
pub const VALID_EMAIL: &str = "admin@edviron.test";
pub const VALID_PASSWORD: &str = "secret123";
pub const PAYMENT_URL: &str = "https://pay.edviron.test/collect/abc";

/// Build a transaction for fixtures
pub fn transaction(collect_id: &str, school_id: &str, status: &str, payment_time: &str, amount: &str) -> Transaction {
    let amount = Decimal::from_str(amount).unwrap_or_default();
    Transaction {
        collect_id: collect_id.to_string(),
        school_id: school_id.to_string(),
        gateway_name: "UPI".to_string(),
        order_amount: amount,
        transaction_amount: amount,
        status: TransactionStatus::from(status),
        payment_time: payment_time.to_string(),
        custom_order_id: format!("ORD-{}", collect_id),
        student_name: None,
        phone_number: None,
        vendor_amount: None,
    }
}

/// Backend double that records every call it receives
#[derive(Default)]
pub struct FakeBackend {
    transactions: Vec<Transaction>,
    total_pages: usize,
    failing: bool,
    calls: Mutex<Vec<String>>,
    queries: Mutex<Vec<TransactionQuery>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(mut self, transactions: Vec<Transaction>) -> Self {
        self.transactions = transactions;
        self
    }

    pub fn with_total_pages(mut self, total_pages: usize) -> Self {
        self.total_pages = total_pages;
        self
    }

    /// Every data call answers 500
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Names of the operations called so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Listing queries received so far
    pub fn queries(&self) -> Vec<TransactionQuery> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }

    /// Calls other than the session check
    pub fn data_calls(&self) -> Vec<String> {
        self.calls().into_iter().filter(|c| c != "current_user").collect()
    }

    fn record(&self, call: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call.to_string());
        }
    }

    fn check(&self, session: &Session) -> CoreResult<()> {
        if session.cookie() != VALID_COOKIE {
            return Err(CoreError::Unauthorized);
        }
        if self.failing {
            return Err(CoreError::Backend {
                status: 500,
                message: "Internal server error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl BackendApi for FakeBackend {
    async fn login(&self, credentials: &Credentials) -> CoreResult<AuthSession> {
        self.record("login");
        if credentials.email == VALID_EMAIL && credentials.password == VALID_PASSWORD {
            Ok(AuthSession {
                cookie: VALID_COOKIE.to_string(),
                message: Some("Logged in successfully".to_string()),
            })
        } else {
            Err(CoreError::Backend {
                status: 401,
                message: "Invalid credentials".to_string(),
            })
        }
    }

    async fn register(&self, registration: &Registration) -> CoreResult<Option<String>> {
        self.record("register");
        if registration.email == VALID_EMAIL {
            return Err(CoreError::Backend {
                status: 409,
                message: "Email already registered".to_string(),
            });
        }
        Ok(Some("User registered".to_string()))
    }

    async fn current_user(&self, session: &Session) -> CoreResult<UserProfile> {
        self.record("current_user");
        if session.cookie() != VALID_COOKIE {
            return Err(CoreError::Unauthorized);
        }
        Ok(UserProfile {
            id: Some("u-1".to_string()),
            name: Some("Admin".to_string()),
            email: Some(VALID_EMAIL.to_string()),
        })
    }

    async fn list_transactions(&self, session: &Session, query: &TransactionQuery) -> CoreResult<TransactionPage> {
        self.record("list_transactions");
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.clone());
        }
        self.check(session)?;
        let data: Vec<Transaction> = self.transactions.iter().take(query.limit).cloned().collect();
        Ok(TransactionPage {
            meta: PageMeta {
                total_entries: self.transactions.len(),
                total_pages: if self.total_pages > 0 {
                    self.total_pages
                } else {
                    (self.transactions.len() + query.limit.max(1) - 1) / query.limit.max(1)
                },
            },
            data,
        })
    }

    async fn school_transactions(&self, session: &Session, school_id: &str) -> CoreResult<Vec<Transaction>> {
        self.record("school_transactions");
        self.check(session)?;
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.school_id == school_id)
            .cloned()
            .collect())
    }

    async fn transaction_status(&self, session: &Session, custom_order_id: &str) -> CoreResult<Vec<Transaction>> {
        self.record("transaction_status");
        self.check(session)?;
        let found: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.custom_order_id == custom_order_id)
            .cloned()
            .collect();
        if found.is_empty() {
            return Err(CoreError::NotFound {
                resource: format!("transaction {}", custom_order_id),
            });
        }
        Ok(found)
    }

    async fn create_payment(&self, session: &Session, _request: &PaymentRequest) -> CoreResult<PaymentLink> {
        self.record("create_payment");
        self.check(session)?;
        Ok(PaymentLink {
            collect_request_url: PAYMENT_URL.to_string(),
        })
    }
}
