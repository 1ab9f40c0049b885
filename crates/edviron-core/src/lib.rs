//! Transaction models, query building, validation and analytics for the
//! Edviron dashboard.
//!
//! Nothing here stores transactions. [`Dashboard`] validates user input,
//! forwards it to the payments backend through [`BackendApi`] and
//! aggregates what comes back.

pub mod analytics;
pub mod backend;
pub mod error;
pub mod models;
pub mod query;
pub mod reports;
pub mod time;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

use chrono::NaiveDate;
use edviron_config::Config;
use std::sync::Arc;

pub use backend::{BackendApi, BackendRef, Session};
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorCode, ErrorContext, ErrorLogger, ErrorReport};
pub use models::{
    AuthSession, Credentials, PageMeta, PaymentLink, PaymentRequest, Registration, SchoolTransactions, Transaction,
    TransactionPage, UserProfile,
};
pub use query::{FilterForm, TransactionQuery};
pub use reports::{AnalyticsReport, CountEntry, TransactionSummary};
pub use time::DateRange;
pub use types::{SortField, SortOrder, TransactionStatus};

/// Dashboard operations on top of a backend
#[derive(Clone)]
pub struct Dashboard {
    backend: BackendRef,
    config: Arc<Config>,
    logger: Arc<dyn ErrorLogger>,
}

impl Dashboard {
    pub fn new(config: Config, backend: BackendRef) -> Self {
        Self {
            backend,
            config: Arc::new(config),
            logger: Arc::new(DefaultErrorLogger),
        }
    }

    /// Log a failed operation and pass the result through
    fn report<T>(&self, operation: &str, result: CoreResult<T>) -> CoreResult<T> {
        if let Err(ref error) = result {
            let context = ErrorContext::new(operation).with_request_id(edviron_utils::generate_id());
            self.logger.log_error(error, &context);
        }
        result
    }

    /// Query parsed from a raw query string with the configured limits
    pub fn parse_query(&self, raw: &str) -> TransactionQuery {
        TransactionQuery::from_query_string(raw, &self.config.pagination)
    }

    // ==================== Authentication ====================

    pub async fn login(&self, credentials: &Credentials) -> CoreResult<AuthSession> {
        validation::validate_credentials(credentials)?;
        log::debug!("Logging in {}", credentials.email);
        let result = self.backend.login(credentials).await;
        self.report("login", result)
    }

    pub async fn register(&self, registration: &Registration) -> CoreResult<Option<String>> {
        validation::validate_registration(registration)?;
        log::debug!("Registering {}", registration.email);
        let result = self.backend.register(registration).await;
        self.report("register", result)
    }

    /// Session check; a missing session fails without calling the backend
    pub async fn current_user(&self, session: Option<&Session>) -> CoreResult<UserProfile> {
        let session = session.ok_or(CoreError::Unauthorized)?;
        self.backend.current_user(session).await
    }

    // ==================== Transactions ====================

    /// One page of the transaction listing.
    ///
    /// A malformed collect id is rejected here and no request is made.
    pub async fn list_transactions(&self, session: &Session, query: &TransactionQuery) -> CoreResult<TransactionPage> {
        validation::validate_collect_id(query.collect_id.as_deref())?;
        log::debug!("GET /transactions?{}", query.to_query_string());
        let result = self.backend.list_transactions(session, query).await;
        self.report("list_transactions", result)
    }

    /// School ids seen in the first page of a large unfiltered listing
    pub async fn school_options(&self, session: &Session) -> CoreResult<Vec<String>> {
        let query = TransactionQuery::with_limit(self.config.analytics.sample_limit);
        let result = self.backend.list_transactions(session, &query).await;
        let page = self.report("school_options", result)?;
        Ok(analytics::unique_school_ids(&page.data))
    }

    pub async fn transactions_by_school(&self, session: &Session, school_id: Option<&str>) -> CoreResult<Vec<Transaction>> {
        let school_id = validation::validate_school_id(school_id)?;
        let result = self.backend.school_transactions(session, &school_id).await;
        self.report("transactions_by_school", result)
    }

    pub async fn transaction_status(&self, session: &Session, custom_order_id: Option<&str>) -> CoreResult<Vec<Transaction>> {
        let order_id = validation::validate_custom_order_id(custom_order_id)?;
        let result = self.backend.transaction_status(session, &order_id).await;
        self.report("transaction_status", result)
    }

    pub async fn create_payment(
        &self,
        session: &Session,
        school_id: &str,
        amount: &str,
        callback_url: &str,
    ) -> CoreResult<PaymentLink> {
        let request = validation::validate_payment(school_id, amount, callback_url)?;
        log::info!("Creating payment of {} for school {}", request.amount, request.school_id);
        let result = self.backend.create_payment(session, &request).await;
        self.report("create_payment", result)
    }

    // ==================== Analytics ====================

    pub async fn analytics(&self, session: &Session) -> CoreResult<AnalyticsReport> {
        self.analytics_at(session, time::today()).await
    }

    /// Analytics as of `today`.
    ///
    /// Four bounded listings are fetched in sequence: the chart sample, the
    /// summary sample, the last twelve months and the newest rows.
    pub async fn analytics_at(&self, session: &Session, today: NaiveDate) -> CoreResult<AnalyticsReport> {
        let result = self.collect_analytics(session, today).await;
        self.report("analytics", result)
    }

    async fn collect_analytics(&self, session: &Session, today: NaiveDate) -> CoreResult<AnalyticsReport> {
        let settings = &self.config.analytics;

        let charts_query = TransactionQuery::with_limit(settings.dashboard_limit);
        let charts = self.backend.list_transactions(session, &charts_query).await?;

        let summary_query = TransactionQuery {
            sort_order: SortOrder::Desc,
            ..TransactionQuery::with_limit(settings.sample_limit)
        };
        let sample = self.backend.list_transactions(session, &summary_query).await?;

        let range = DateRange::last_twelve_months(today);
        let yearly_query = TransactionQuery {
            start_date: Some(range.start),
            end_date: Some(range.end),
            ..TransactionQuery::with_limit(settings.sample_limit)
        };
        let yearly = self.backend.list_transactions(session, &yearly_query).await?;

        let recent_query = TransactionQuery {
            sort_order: SortOrder::Desc,
            ..TransactionQuery::with_limit(settings.recent_count)
        };
        let recent = self.backend.list_transactions(session, &recent_query).await?;

        Ok(AnalyticsReport {
            summary: analytics::summary(&sample.data),
            status_summary: analytics::status_summary(&sample.data),
            status_breakdown: analytics::status_breakdown(&charts.data),
            time_series: analytics::time_series(&charts.data),
            payment_modes: analytics::payment_modes(&charts.data),
            pending_by_school: analytics::pending_by_school(&charts.data),
            monthly_volume: analytics::monthly_volume(&yearly.data, &range, today),
            recent: analytics::recent_transactions(&recent.data, settings.recent_count),
            period: range.description(),
        })
    }
}

// ==================== Tests ====================
