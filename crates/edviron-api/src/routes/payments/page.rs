//! Create-payment page

use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use edviron_utils::escape_html;

use crate::session::require_user;
use crate::views;
use crate::AppState;

/// Values to put back into the form after a failed submission
#[derive(Debug, Default, Clone)]
pub struct PaymentDraft {
    pub school_id: String,
    pub amount: String,
    pub callback_url: String,
}

/// Payment form; `notice` is already-rendered alert HTML
pub fn payment_form(draft: &PaymentDraft, notice: &str) -> String {
    const INPUT: &str = "w-full px-4 py-2 border rounded-lg dark:bg-gray-700 dark:border-gray-600";
    format!(
        r#"<div id='payment-card' class='w-full max-w-md bg-white dark:bg-gray-800 rounded-2xl shadow-lg p-8'>
    {}
    <form hx-post='/payment' hx-target='#payment-card' hx-swap='outerHTML' method='post' action='/payment' class='space-y-4'>
        <div><label class='block text-sm font-medium mb-1' for='school_id'>School ID</label>
            <input id='school_id' type='text' name='school_id' value='{}' class='{}'></div>
        <div><label class='block text-sm font-medium mb-1' for='amount'>Amount</label>
            <input id='amount' type='number' step='0.01' min='0' name='amount' value='{}' class='{}'></div>
        <div><label class='block text-sm font-medium mb-1' for='callback_url'>Callback URL</label>
            <input id='callback_url' type='url' name='callback_url' value='{}' placeholder='https://' class='{}'></div>
        <button type='submit' class='w-full py-2 bg-sky-600 text-white rounded-lg hover:bg-sky-700'>
            Create Payment <span class='htmx-indicator'>...</span>
        </button>
    </form>
</div>"#,
        notice,
        escape_html(&draft.school_id),
        INPUT,
        escape_html(&draft.amount),
        INPUT,
        escape_html(&draft.callback_url),
        INPUT
    )
}

pub async fn page_payment(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
) -> Response {
    if let Err(redirect) = require_user(&state, &headers).await {
        return redirect;
    }

    let inner_content = format!(
        "{}{}",
        views::page_header("Create Payment", "Generate a payment link and continue to the gateway."),
        payment_form(&PaymentDraft::default(), "")
    );
    Html(crate::page_response(&state, &headers, "Create Payment", "/payment", &inner_content)).into_response()
}
