//! The seam between the dashboard and the external payments backend

use async_trait::async_trait;
use std::sync::Arc;

use super::error::CoreResult;
use super::models::{
    AuthSession, Credentials, PaymentLink, PaymentRequest, Registration, Transaction, TransactionPage,
    UserProfile,
};
use super::query::TransactionQuery;

/// Backend session: the cookie header value forwarded on every call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    cookie: String,
}

impl Session {
    /// `None` for a blank cookie
    pub fn new(cookie: impl Into<String>) -> Option<Self> {
        let cookie = cookie.into();
        if cookie.trim().is_empty() {
            None
        } else {
            Some(Self { cookie })
        }
    }

    pub fn cookie(&self) -> &str {
        &self.cookie
    }
}

impl AuthSession {
    /// Session to store after a successful login
    pub fn session(&self) -> Option<Session> {
        Session::new(self.cookie.clone())
    }
}

/// Operations of the payments backend API
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, credentials: &Credentials) -> CoreResult<AuthSession>;

    /// `POST /auth/register`; returns the backend message, if any
    async fn register(&self, registration: &Registration) -> CoreResult<Option<String>>;

    /// `GET /users/me`
    async fn current_user(&self, session: &Session) -> CoreResult<UserProfile>;

    /// `GET /transactions?...`
    async fn list_transactions(&self, session: &Session, query: &TransactionQuery) -> CoreResult<TransactionPage>;

    /// `GET /transactions/school/{school_id}`
    async fn school_transactions(&self, session: &Session, school_id: &str) -> CoreResult<Vec<Transaction>>;

    /// `GET /transaction-status/{custom_order_id}`; single objects come back as one-element lists
    async fn transaction_status(&self, session: &Session, custom_order_id: &str) -> CoreResult<Vec<Transaction>>;

    /// `POST /create-payment`
    async fn create_payment(&self, session: &Session, request: &PaymentRequest) -> CoreResult<PaymentLink>;
}

/// Backend reference type
pub type BackendRef = Arc<dyn BackendApi>;
