//! Transactions page rendering
//!
//! - page_transactions: Full page with filter panel and first table render
//! - transactions_fragment: Table, pager and page-size links for one query
//! - filter_form: Filter panel with the school options

use axum::extract::RawQuery;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use edviron_core::{CoreError, Session, SortField, TransactionPage, TransactionQuery, TransactionStatus};
use edviron_utils::escape_html;

use crate::session::{redirect, require_user};
use crate::views::{self, alert, empty_state, AlertKind, EMPTY_TRANSACTIONS};
use crate::AppState;

pub const FETCH_FAILED: &str = "Failed to fetch transactions.";

/// Transactions page - filter panel plus the table for the current URL
pub async fn page_transactions(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Response {
    let (session, _user) = match require_user(&state, &headers).await {
        Ok(found) => found,
        Err(redirect) => return redirect,
    };
    let query = state.dashboard.parse_query(raw.as_deref().unwrap_or(""));

    let list = match transactions_fragment(&state, &headers, &session, &query).await {
        Ok(html) => html,
        Err(redirect) => return redirect,
    };

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-4'>
            <h2 class='text-2xl font-bold'>Transactions Overview</h2>
            <span class='htmx-indicator text-sm text-gray-500'>Loading...</span>
        </div>
        <div id='filter-panel' hx-get='/transactions/filter?{}' hx-trigger='load' class='mb-4'>
            <p class='text-gray-500 text-sm'>Loading filters...</p>
        </div>
        {}
        <div id='transactions-content' class='bg-white dark:bg-gray-800 rounded-xl shadow-sm p-6'>{}</div>"#,
        escape_html(&query.to_query_string()),
        state_inputs(&query, false),
        list
    );

    Html(crate::page_response(&state, &headers, "Transactions", "/transactions", &inner_content)).into_response()
}

/// Table for `query`, or an alert plus the empty state when the fetch failed.
///
/// Only a rejected session escapes as `Err`: a redirect to `/login`.
pub async fn transactions_fragment(
    state: &AppState,
    headers: &HeaderMap,
    session: &Session,
    query: &TransactionQuery,
) -> Result<String, Response> {
    let mut html = String::new();
    match state.dashboard.list_transactions(session, query).await {
        Ok(page) => html.push_str(&render_table(state, query, &page)),
        Err(CoreError::Unauthorized) => return Err(redirect(headers, "/login")),
        Err(error) => {
            log::warn!("Transaction listing failed: {}", error);
            html.push_str(&alert(AlertKind::Error, error.user_message().unwrap_or(FETCH_FAILED)));
            html.push_str(&empty_state(EMPTY_TRANSACTIONS));
        }
    }

    Ok(html)
}

/// Sort and page-size state the filter form submits with its fields.
///
/// Fragments resend it out of band so the form follows sort and page-size clicks.
pub fn state_inputs(query: &TransactionQuery, out_of_band: bool) -> String {
    format!(
        "<div id='tx-state' class='hidden'{}>\
         <input type='hidden' name='sortBy' value='{}'>\
         <input type='hidden' name='sortOrder' value='{}'>\
         <input type='hidden' name='limit' value='{}'></div>",
        if out_of_band { " hx-swap-oob='true'" } else { "" },
        query.sort_by.as_str(),
        query.sort_order.as_str(),
        query.limit
    )
}

/// Link that reloads the list fragment for `target`
fn list_link(target: &TransactionQuery, label: &str, class: &str) -> String {
    let qs = escape_html(&target.to_query_string());
    format!(
        "<a href='/transactions?{}' hx-get='/transactions/list?{}' hx-target='#transactions-content' class='{}'>{}</a>",
        qs, qs, class, label
    )
}

fn sort_header(query: &TransactionQuery, field: SortField) -> String {
    let label = format!("{}{}", escape_html(field.label()), query.sort_indicator(field));
    format!(
        "<th class='px-4 py-3 text-left cursor-pointer select-none'>{}</th>",
        list_link(&query.toggle_sort(field), &label, "hover:underline")
    )
}

fn render_table(state: &AppState, query: &TransactionQuery, page: &TransactionPage) -> String {
    if page.is_empty() {
        let clear = if query.has_filters() {
            "<p class='text-center -mt-8 mb-6'><a href='/transactions' class='text-indigo-600 dark:text-indigo-400 hover:underline'>Clear filters</a></p>"
        } else {
            ""
        };
        return format!("{}{}{}", empty_state(EMPTY_TRANSACTIONS), clear, pager(state, query, page));
    }

    let plain = |label: &str| format!("<th class='px-4 py-3 text-left'>{}</th>", label);
    let head = [
        plain("S No."),
        plain("School ID"),
        sort_header(query, SortField::PaymentTime),
        plain("Collect ID"),
        sort_header(query, SortField::OrderAmount),
        sort_header(query, SortField::TransactionAmount),
        plain("Payment Method"),
        plain("Status"),
        plain("Custom Order ID"),
    ]
    .concat();

    let rows: String = page
        .data
        .iter()
        .enumerate()
        .map(|(idx, tx)| {
            format!(
                "<tr class='hover:bg-gray-50 dark:hover:bg-gray-700'>\
                 <td class='px-4 py-3'>{}</td>\
                 <td class='px-4 py-3'>{}</td>\
                 <td class='px-4 py-3'>{}</td>\
                 <td class='px-4 py-3 font-mono text-xs'>{}</td>\
                 <td class='px-4 py-3'>{}</td>\
                 <td class='px-4 py-3'>{}</td>\
                 <td class='px-4 py-3'>{}</td>\
                 {}\
                 <td class='px-4 py-3'>{}</td></tr>",
                query.serial_number(idx),
                escape_html(&tx.school_id),
                escape_html(&tx.datetime_label()),
                escape_html(&tx.collect_id),
                views::amount(&state.config, tx.order_amount),
                views::amount(&state.config, tx.transaction_amount),
                escape_html(&tx.gateway_name),
                views::status_cell(&tx.status),
                escape_html(&tx.custom_order_id),
            )
        })
        .collect();

    format!(
        r#"<div class='overflow-x-auto'>
    <table class='min-w-full border rounded-lg text-sm dark:border-gray-700'>
        <thead class='bg-gray-50 text-gray-700 font-semibold dark:bg-gray-700 dark:text-gray-100'><tr>{}</tr></thead>
        <tbody class='divide-y divide-gray-200 dark:divide-gray-700'>{}</tbody>
    </table>
</div>
{}"#,
        head,
        rows,
        pager(state, query, page)
    )
}

/// Previous / `Page X of Y` / Next, followed by the page-size choices
fn pager(state: &AppState, query: &TransactionQuery, page: &TransactionPage) -> String {
    const BUTTON: &str = "px-3 py-1 border rounded hover:bg-gray-100 dark:border-gray-600 dark:bg-gray-700 dark:hover:bg-gray-600";
    const DISABLED: &str = "px-3 py-1 border rounded opacity-50 dark:border-gray-600";
    let total_pages = page.page_count();

    let previous = if query.page > 1 {
        list_link(&query.with_page(query.page - 1), "Previous", BUTTON)
    } else {
        format!("<span class='{}'>Previous</span>", DISABLED)
    };
    let next = if query.page < total_pages {
        list_link(&query.with_page(query.page + 1), "Next", BUTTON)
    } else {
        format!("<span class='{}'>Next</span>", DISABLED)
    };

    let sizes: String = state
        .config
        .pagination
        .page_sizes
        .iter()
        .map(|&size| {
            if size == query.limit {
                format!("<span class='px-2 py-1 rounded bg-indigo-600 text-white'>{}</span>", size)
            } else {
                list_link(&query.with_page_size(size), &size.to_string(), "px-2 py-1 rounded hover:bg-gray-100 dark:hover:bg-gray-700")
            }
        })
        .collect();

    format!(
        r#"<div class='flex flex-wrap items-center justify-between mt-6 gap-4'>
    <div class='flex items-center space-x-2'>{}<span class='text-sm py-2'>Page {} of {}</span>{}</div>
    <div class='flex items-center gap-1 text-sm'><span class='text-gray-500 mr-1'>Rows per page:</span>{}</div>
</div>"#,
        previous, query.page, total_pages, next, sizes
    )
}

/// Filter panel; `schools` are the selectable school ids
pub fn filter_form(query: &TransactionQuery, schools: &[String]) -> String {
    let statuses: String = TransactionStatus::FILTERABLE
        .iter()
        .map(|status| {
            let checked = query
                .statuses
                .iter()
                .any(|s| TransactionStatus::from(s.as_str()) == *status);
            format!(
                "<label class='inline-flex items-center gap-1 mr-3'><input type='checkbox' name='status' value='{}'{}> {}</label>",
                status.filter_value(),
                if checked { " checked" } else { "" },
                status.label()
            )
        })
        .collect();

    let mut options: Vec<&str> = schools.iter().map(String::as_str).collect();
    for selected in &query.school_ids {
        if !options.contains(&selected.as_str()) {
            options.push(selected.as_str());
        }
    }
    let school_options: String = options
        .iter()
        .map(|id| {
            let selected = query.school_ids.iter().any(|s| s == id);
            format!(
                "<option value='{}'{}>{}</option>",
                escape_html(id),
                if selected { " selected" } else { "" },
                escape_html(id)
            )
        })
        .collect();

    let date = |d: Option<chrono::NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
    const INPUT: &str = "px-3 py-2 border rounded-lg text-sm dark:bg-gray-700 dark:border-gray-600";

    format!(
        r#"<form hx-post='/transactions/filter' hx-target='#transactions-content' hx-include='#tx-state'
    class='rounded-2xl p-4 shadow bg-gray-50 dark:bg-gray-800 flex flex-col md:flex-row md:items-end gap-4'>
    <div class='flex flex-col'><label class='text-xs font-medium mb-1 text-gray-600 dark:text-gray-300'>School ID</label>
        <select name='school_id' multiple class='{} h-24'>{}</select></div>
    <div class='flex flex-col'><label class='text-xs font-medium mb-1 text-gray-600 dark:text-gray-300'>Status</label>
        <div class='py-2 text-sm'>{}</div></div>
    <div class='flex flex-col'><label class='text-xs font-medium mb-1 text-gray-600 dark:text-gray-300'>Start Date</label>
        <input type='date' name='startDate' value='{}' class='{}'></div>
    <div class='flex flex-col'><label class='text-xs font-medium mb-1 text-gray-600 dark:text-gray-300'>End Date</label>
        <input type='date' name='endDate' value='{}' class='{}'></div>
    <div class='flex flex-col'><label class='text-xs font-medium mb-1 text-gray-600 dark:text-gray-300'>Collect ID</label>
        <input type='text' name='collectId' value='{}' placeholder='24-character id' class='{}'></div>
    <div class='flex gap-2'>
        <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Apply Filters</button>
        <a href='/transactions' class='px-4 py-2 bg-gray-100 dark:bg-gray-700 rounded-lg'>Reset</a>
    </div>
</form>"#,
        INPUT,
        school_options,
        statuses,
        date(query.start_date),
        INPUT,
        date(query.end_date),
        INPUT,
        escape_html(query.collect_id.as_deref().unwrap_or("")),
        INPUT
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use axum::http::StatusCode;
    use edviron_core::testing::{transaction, FakeBackend};

    fn sample() -> Vec<edviron_core::Transaction> {
        (0..30)
            .map(|i| {
                transaction(
                    &format!("c{}", i),
                    if i % 2 == 0 { "s1" } else { "s2" },
                    "success",
                    "2025-04-02T10:00:00Z",
                    "100",
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_page_requires_login() {
        let (router, backend) = router(FakeBackend::new());
        let response = get(&router, "/transactions", None).await;
        assert_login_redirect(&response);
        assert!(backend.data_calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_collect_id_issues_no_request() {
        let (router, backend) = router(FakeBackend::new().with_transactions(sample()));
        let response = get(&router, "/transactions?collectId=not-hex", Some(&signed_in())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains(edviron_core::validation::MSG_INVALID_COLLECT_ID));
        assert!(body.contains(EMPTY_TRANSACTIONS));
        assert!(backend.data_calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_result_renders_empty_state() {
        let (router, _) = router(FakeBackend::new());
        let response = get(&router, "/transactions", Some(&signed_in())).await;
        let body = body_text(response).await;
        assert!(body.to_lowercase().contains("no transactions found"));
        assert!(body.contains("Page 1 of 1"));
        assert!(!body.contains("Clear filters"));

        let response = get(&router, "/transactions?status=pending", Some(&signed_in())).await;
        assert!(body_text(response).await.contains("Clear filters"));
    }

    #[tokio::test]
    async fn test_out_of_range_page_renders() {
        let (router, backend) = router(FakeBackend::new().with_transactions(sample()));
        let response = get(&router, "/transactions?page=18446744073709551615&limit=10", Some(&signed_in())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(backend.queries()[0].page, edviron_core::query::MAX_PAGE);
        assert!(body_text(response).await.contains("9999991"));
    }

    #[tokio::test]
    async fn test_pagination_reflected_in_page() {
        let (router, backend) = router(FakeBackend::new().with_transactions(sample()).with_total_pages(5));
        let response = get(&router, "/transactions?page=2&limit=20&status=success", Some(&signed_in())).await;
        let body = body_text(response).await;

        assert!(body.contains("Page 2 of 5"));
        assert!(body.contains("<td class='px-4 py-3'>21</td>"));
        assert!(body.contains("page=3&amp;limit=20"));

        let queries = backend.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].page, 2);
        assert_eq!(queries[0].limit, 20);
        assert_eq!(queries[0].statuses, vec!["success"]);
    }

    #[tokio::test]
    async fn test_sort_header_links() {
        let (router, _) = router(FakeBackend::new().with_transactions(sample()));
        let response = get(&router, "/transactions?sortBy=order_amount&sortOrder=asc", Some(&signed_in())).await;
        let body = body_text(response).await;

        assert!(body.contains("Order Amt▲"));
        assert!(body.contains("sortBy=order_amount&amp;sortOrder=desc"));
        assert!(body.contains("sortBy=transaction_amount&amp;sortOrder=asc"));
    }

    #[test]
    fn test_filter_form_marks_selection() {
        let query = TransactionQuery {
            statuses: vec!["SUCCESS".to_string()],
            school_ids: vec!["s9".to_string()],
            ..TransactionQuery::default()
        };
        let html = filter_form(&query, &["s1".to_string()]);
        assert!(html.contains("value='success' checked"));
        assert!(html.contains("value='pending'>"));
        assert!(html.contains("value='Failed'>"));
        assert!(html.contains("<option value='s1'>s1</option>"));

        let failed = TransactionQuery {
            statuses: vec!["failed".to_string()],
            ..TransactionQuery::default()
        };
        assert!(filter_form(&failed, &[]).contains("value='Failed' checked"));
        assert!(html.contains("<option value='s9' selected>s9</option>"));
    }
}
