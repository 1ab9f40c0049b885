//! Transactions-by-school page

use axum::extract::Query;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use edviron_core::{CoreError, Session};
use edviron_utils::escape_html;
use std::collections::HashMap;

use crate::session::{redirect, require_user};
use crate::views::{self, alert, empty_state, AlertKind, EMPTY_TRANSACTIONS};
use crate::AppState;

pub const FETCH_FAILED: &str = "Failed to fetch transactions.";

pub async fn page_transactions_by_school(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
    params: Query<HashMap<String, String>>,
) -> Response {
    let (session, _user) = match require_user(&state, &headers).await {
        Ok(found) => found,
        Err(redirect) => return redirect,
    };

    let selected = params.get("school_id").map(|s| s.trim()).filter(|s| !s.is_empty());
    let schools = match state.dashboard.school_options(&session).await {
        Ok(schools) => schools,
        Err(CoreError::Unauthorized) => return redirect(&headers, "/login"),
        Err(error) => {
            log::warn!("Could not load school options: {}", error);
            Vec::new()
        }
    };

    let results = match selected {
        Some(school_id) => match school_results(&state, &headers, &session, Some(school_id)).await {
            Ok(html) => html,
            Err(redirect) => return redirect,
        },
        None => String::new(),
    };

    let options: String = schools
        .iter()
        .map(|id| {
            format!(
                "<option value='{}'{}>{}</option>",
                escape_html(id),
                if Some(id.as_str()) == selected { " selected" } else { "" },
                escape_html(id)
            )
        })
        .collect();

    let inner_content = format!(
        r#"{}
        <form hx-get='/transactions-by-school/list' hx-target='#school-results' hx-push-url='false'
            class='flex flex-col md:flex-row md:items-end gap-4 mb-6'>
            <div class='flex flex-col'>
                <label class='text-xs font-medium mb-1 text-gray-600 dark:text-gray-300' for='school_id'>School ID</label>
                <select id='school_id' name='school_id' class='px-3 py-2 border rounded-lg w-80 dark:bg-gray-700 dark:border-gray-600'>
                    <option value=''>Select a school</option>{}
                </select>
            </div>
            <button type='submit' class='px-4 py-2 bg-emerald-600 text-white rounded-lg hover:bg-emerald-700'>Fetch Transactions</button>
            <span class='htmx-indicator text-sm text-gray-500'>Loading...</span>
        </form>
        <div id='school-results'>{}</div>"#,
        views::page_header("Transactions by School", "Fetch and display transactions for a specific school."),
        options,
        results
    );

    Html(crate::page_response(
        &state,
        &headers,
        "Transactions by School",
        "/transactions-by-school",
        &inner_content,
    ))
    .into_response()
}

/// Table of one school's transactions, or an alert.
///
/// A rejected session escapes as a redirect.
pub async fn school_results(
    state: &AppState,
    headers: &HeaderMap,
    session: &Session,
    school_id: Option<&str>,
) -> Result<String, Response> {
    match state.dashboard.transactions_by_school(session, school_id).await {
        Ok(transactions) if transactions.is_empty() => Ok(empty_state(EMPTY_TRANSACTIONS)),
        Ok(transactions) => Ok(views::card(&views::transaction_table(&state.config, &transactions))),
        Err(CoreError::Unauthorized) => Err(redirect(headers, "/login")),
        Err(error @ CoreError::Validation { .. }) => Ok(alert(AlertKind::Error, &error.to_string())),
        Err(error) => {
            log::warn!("School listing failed: {}", error);
            Ok(alert(AlertKind::Error, FETCH_FAILED))
        }
    }
}
