//! School endpoints
//!
//! - api_schools: School ids seen in the transaction listing (JSON)
//! - htmx_school_transactions: Transactions of the selected school (HTML fragment)

use axum::extract::Query;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use edviron_core::reports::SchoolsResponse;
use std::collections::HashMap;

use super::page::school_results;
use crate::error::ApiResult;
use crate::session::{require_session, require_user};
use crate::AppState;

/// GET /api/schools
pub async fn api_schools(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<SchoolsResponse>> {
    let session = require_session(&state, &headers).await?;
    let schools = state.dashboard.school_options(&session).await?;
    Ok(Json(SchoolsResponse {
        total_count: schools.len(),
        schools,
    }))
}

/// HTMX: Results for `?school_id=`
pub async fn htmx_school_transactions(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
    params: Query<HashMap<String, String>>,
) -> Response {
    let (session, _user) = match require_user(&state, &headers).await {
        Ok(found) => found,
        Err(redirect) => return redirect,
    };

    match school_results(&state, &headers, &session, params.get("school_id").map(String::as_str)).await {
        Ok(html) => Html(html).into_response(),
        Err(redirect) => redirect,
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;
    use edviron_core::testing::{transaction, FakeBackend};
    use edviron_core::validation::MSG_SELECT_SCHOOL;

    fn sample() -> Vec<edviron_core::Transaction> {
        vec![
            transaction("c1", "s1", "success", "2025-04-02T10:00:00Z", "100"),
            transaction("c2", "s2", "pending", "2025-04-01T10:00:00Z", "50"),
            transaction("c3", "s1", "failed", "2025-03-01T10:00:00Z", "75"),
        ]
    }

    #[tokio::test]
    async fn test_page_lists_school_options() {
        let (router, _) = router(FakeBackend::new().with_transactions(sample()));
        let response = get(&router, "/transactions-by-school", Some(&signed_in())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("<option value='s1'>s1</option>"));
        assert!(body.contains("<option value='s2'>s2</option>"));
    }

    #[tokio::test]
    async fn test_results_fragment() {
        let (router, backend) = router(FakeBackend::new().with_transactions(sample()));
        let response = get(&router, "/transactions-by-school/list?school_id=s1", Some(&signed_in())).await;
        let body = body_text(response).await;
        assert!(body.contains("ORD-c1"));
        assert!(body.contains("ORD-c3"));
        assert!(!body.contains("ORD-c2"));
        assert_eq!(backend.data_calls(), vec!["school_transactions"]);
    }

    #[tokio::test]
    async fn test_no_school_selected() {
        let (router, backend) = router(FakeBackend::new().with_transactions(sample()));
        let response = get(&router, "/transactions-by-school/list?school_id=", Some(&signed_in())).await;
        assert!(body_text(response).await.contains(MSG_SELECT_SCHOOL));
        assert!(backend.data_calls().is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_message() {
        let (router, _) = router(FakeBackend::new().failing());
        let response = get(&router, "/transactions-by-school/list?school_id=s1", Some(&signed_in())).await;
        assert!(body_text(response).await.contains("Failed to fetch transactions."));
    }

    #[tokio::test]
    async fn test_api_schools() {
        let (router, _) = router(FakeBackend::new().with_transactions(sample()));
        let response = get(&router, "/api/schools", Some(&signed_in())).await;
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["schools"], serde_json::json!(["s1", "s2"]));
        assert_eq!(json["total_count"], 2);
    }
}
