//! Analytics report (JSON API)

use axum::http::HeaderMap;
use axum::Json;
use edviron_core::AnalyticsReport;

use crate::error::ApiResult;
use crate::session::require_session;
use crate::AppState;

/// GET /api/analytics
pub async fn api_analytics(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<AnalyticsReport>> {
    let session = require_session(&state, &headers).await?;
    let report = state.dashboard.analytics(&session).await?;
    Ok(Json(report))
}
