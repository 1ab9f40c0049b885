//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: One page of transactions (JSON)
//! - htmx_transactions_list: Table for the query string (HTML fragment)
//! - htmx_filter_form: Filter panel with school options (HTML fragment)
//! - htmx_filter_apply: Apply submitted filters, back to page 1 (HTML fragment)

use axum::extract::RawQuery;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use edviron_core::reports::TransactionsResponse;
use edviron_core::{FilterForm, TransactionQuery};

use super::page::{filter_form, state_inputs, transactions_fragment};
use crate::error::ApiResult;
use crate::session::{require_session, require_user};
use crate::AppState;

/// GET /api/transactions
pub async fn api_transactions(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> ApiResult<Json<TransactionsResponse>> {
    let session = require_session(&state, &headers).await?;
    let query = state.dashboard.parse_query(raw.as_deref().unwrap_or(""));
    let page = state.dashboard.list_transactions(&session, &query).await?;
    Ok(Json(TransactionsResponse { query, page }))
}

/// HTMX: Transactions table for the current query string
pub async fn htmx_transactions_list(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Response {
    let query = state.dashboard.parse_query(raw.as_deref().unwrap_or(""));
    list_response(&state, &headers, &query).await
}

/// HTMX: Filter form submission
///
/// The body carries the filter fields plus the sort and page-size state; the
/// result starts again at page 1.
pub async fn htmx_filter_apply(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let query = state.dashboard.parse_query(&body).apply_filters(FilterForm::from_query_string(&body));
    list_response(&state, &headers, &query).await
}

/// HTMX: Filter panel
///
/// School options come from one large unfiltered listing. When that fails
/// the panel still renders with only the already selected schools.
pub async fn htmx_filter_form(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Response {
    let (session, _user) = match require_user(&state, &headers).await {
        Ok(found) => found,
        Err(redirect) => return redirect,
    };
    let query = state.dashboard.parse_query(raw.as_deref().unwrap_or(""));

    let schools = state.dashboard.school_options(&session).await.unwrap_or_else(|error| {
        log::warn!("Could not load school options: {}", error);
        Vec::new()
    });

    Html(filter_form(&query, &schools)).into_response()
}

/// Table fragment with the new URL pushed into the browser history
async fn list_response(state: &AppState, headers: &HeaderMap, query: &TransactionQuery) -> Response {
    let (session, _user) = match require_user(state, headers).await {
        Ok(found) => found,
        Err(redirect) => return redirect,
    };

    let table = match transactions_fragment(state, headers, &session, query).await {
        Ok(html) => html,
        Err(redirect) => return redirect,
    };

    let push_url = format!("/transactions?{}", query.to_query_string());
    (
        [("HX-Push-Url", push_url)],
        Html(format!("{}{}", state_inputs(query, true), table)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;
    use edviron_core::testing::{transaction, FakeBackend};
    use edviron_core::SortOrder;

    fn sample() -> Vec<edviron_core::Transaction> {
        vec![
            transaction("c1", "s1", "success", "2025-04-02T10:00:00Z", "100"),
            transaction("c2", "s2", "pending", "2025-04-01T10:00:00Z", "50"),
            transaction("c3", "s1", "failed", "2025-03-01T10:00:00Z", "75"),
        ]
    }

    #[tokio::test]
    async fn test_list_fragment_pushes_url() {
        let (router, _) = router(FakeBackend::new().with_transactions(sample()));
        let response = get(&router, "/transactions/list?school_id=s1&school_id=s2&page=1", Some(&signed_in())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let pushed = response.headers()["HX-Push-Url"].to_str().unwrap().to_string();
        assert_eq!(
            pushed,
            "/transactions?school_id=s1&school_id=s2&sortBy=payment_time&sortOrder=asc&page=1&limit=10"
        );
        let body = body_text(response).await;
        assert!(body.contains("hx-swap-oob='true'"));
        assert!(body.contains("ORD-c2"));
    }

    #[tokio::test]
    async fn test_filter_apply_resets_page_keeps_sort() {
        let (router, backend) = router(FakeBackend::new().with_transactions(sample()));
        let body = "status=pending&status=Failed&startDate=2025-03-01&collectId=&sortBy=order_amount&sortOrder=desc&limit=20&page=4";
        let response = post_form(&router, "/transactions/filter", Some(&signed_in()), body, true).await;
        assert_eq!(response.status(), StatusCode::OK);

        let queries = backend.queries();
        assert_eq!(queries.len(), 1);
        let query = &queries[0];
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 20);
        assert_eq!(query.sort_order, SortOrder::Desc);
        assert_eq!(query.statuses, vec!["pending", "Failed"]);
        assert!(query.to_query_string().contains("status=Failed"));
        assert_eq!(query.start_date, chrono::NaiveDate::from_ymd_opt(2025, 3, 1));
        assert!(query.collect_id.is_none());
    }

    #[tokio::test]
    async fn test_filter_form_lists_schools() {
        let (router, backend) = router(FakeBackend::new().with_transactions(sample()));
        let response = get(&router, "/transactions/filter?school_id=s1", Some(&signed_in())).await;
        let body = body_text(response).await;

        assert!(body.contains("<option value='s1' selected>s1</option>"));
        assert!(body.contains("<option value='s2'>s2</option>"));
        assert_eq!(backend.queries()[0].limit, 1000);
    }

    #[tokio::test]
    async fn test_fragment_redirects_htmx_when_logged_out() {
        let (router, _) = router(FakeBackend::new());
        let response = post_form(&router, "/transactions/filter", None, "status=success", true).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["HX-Redirect"], "/login");
    }

    #[tokio::test]
    async fn test_api_transactions_json() {
        let (router, _) = router(FakeBackend::new().with_transactions(sample()));
        let response = get(&router, "/api/transactions?limit=2", Some(&signed_in())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["meta"]["total_entries"], 3);
        assert_eq!(json["query"]["limit"], 2);
    }

    #[tokio::test]
    async fn test_api_rejects_bad_collect_id_and_session() {
        let (router, backend) = router(FakeBackend::new());
        let response = get(&router, "/api/transactions?collectId=zz", Some(&signed_in())).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(backend.data_calls().is_empty());

        let response = get(&router, "/api/transactions", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["error"]["code"], "UNAUTHORIZED");
    }
}
