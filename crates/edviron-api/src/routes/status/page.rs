//! Transaction status page

use axum::extract::Query;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use edviron_utils::escape_html;
use std::collections::HashMap;

use super::api::status_results;
use crate::session::require_user;
use crate::views;
use crate::AppState;

pub async fn page_transaction_status(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
    params: Query<HashMap<String, String>>,
) -> Response {
    let (session, _user) = match require_user(&state, &headers).await {
        Ok(found) => found,
        Err(redirect) => return redirect,
    };

    let order_id = params.get("custom_order_id").map(|s| s.trim()).unwrap_or("");
    let results = if order_id.is_empty() {
        String::new()
    } else {
        match status_results(&state, &headers, &session, Some(order_id)).await {
            Ok(html) => html,
            Err(redirect) => return redirect,
        }
    };

    let inner_content = format!(
        r#"{}
        <form hx-get='/transaction-status/check' hx-target='#status-results' class='flex flex-col md:flex-row md:items-end gap-4 mb-6'>
            <div class='flex flex-col'>
                <label class='text-xs font-medium mb-1 text-gray-600 dark:text-gray-300' for='custom_order_id'>Custom Order ID</label>
                <input id='custom_order_id' type='text' name='custom_order_id' value='{}' placeholder='Enter Custom Order ID'
                    class='px-3 py-2 border rounded-lg w-80 dark:bg-gray-700 dark:border-gray-600'>
            </div>
            <button type='submit' class='px-4 py-2 bg-yellow-500 text-white rounded-lg hover:bg-yellow-600'>Check Status</button>
            <span class='htmx-indicator text-sm text-gray-500'>Checking...</span>
        </form>
        <div id='status-results'>{}</div>"#,
        views::page_header("Transaction Status Check", "Check the status of a transaction using a custom order ID."),
        escape_html(order_id),
        results
    );

    Html(crate::page_response(
        &state,
        &headers,
        "Transaction Status",
        "/transaction-status",
        &inner_content,
    ))
    .into_response()
}
