//! Status lookup fragment

use axum::extract::Query;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use edviron_core::{CoreError, Session};
use std::collections::HashMap;

use crate::session::{redirect, require_user};
use crate::views::{self, alert, AlertKind};
use crate::AppState;

pub const LOOKUP_FAILED: &str = "Failed to fetch transaction status. Please try again.";

/// HTMX: Result for `?custom_order_id=`
pub async fn htmx_status_lookup(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
    params: Query<HashMap<String, String>>,
) -> Response {
    let (session, _user) = match require_user(&state, &headers).await {
        Ok(found) => found,
        Err(redirect) => return redirect,
    };

    match status_results(&state, &headers, &session, params.get("custom_order_id").map(String::as_str)).await {
        Ok(html) => Html(html).into_response(),
        Err(redirect) => redirect,
    }
}

/// Status table for one order id; single objects and lists render alike
pub async fn status_results(
    state: &AppState,
    headers: &HeaderMap,
    session: &Session,
    custom_order_id: Option<&str>,
) -> Result<String, Response> {
    match state.dashboard.transaction_status(session, custom_order_id).await {
        Ok(transactions) => Ok(views::card(&views::transaction_table(&state.config, &transactions))),
        Err(CoreError::Unauthorized) => Err(redirect(headers, "/login")),
        Err(error @ CoreError::Validation { .. }) => Ok(alert(AlertKind::Error, &error.to_string())),
        Err(error) => {
            log::warn!("Status lookup failed: {}", error);
            Ok(alert(AlertKind::Error, LOOKUP_FAILED))
        }
    }
}
