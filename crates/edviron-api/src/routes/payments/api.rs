//! Payment form submission
//!
//! Success sends the browser to the gateway's collect URL. Failures
//! re-render the form (the fragment for HTMX, the page otherwise).

use axum::extract::Form;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use edviron_core::CoreError;
use serde::Deserialize;

use super::page::{payment_form, PaymentDraft};
use crate::session::{redirect, require_user};
use crate::views::{self, alert, AlertKind};
use crate::{is_htmx_request, AppState};

pub const PAYMENT_FAILED: &str = "Failed to create payment. Please try again.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaymentForm {
    pub school_id: String,
    pub amount: String,
    pub callback_url: String,
}

/// POST /payment
pub async fn payment_submit(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
    Form(form): Form<PaymentForm>,
) -> Response {
    let (session, _user) = match require_user(&state, &headers).await {
        Ok(found) => found,
        Err(redirect) => return redirect,
    };

    let result = state
        .dashboard
        .create_payment(&session, &form.school_id, &form.amount, &form.callback_url)
        .await;

    let message = match result {
        Ok(link) => {
            log::info!("Payment link created for school {}", form.school_id.trim());
            return redirect(&headers, &link.collect_request_url);
        }
        Err(CoreError::Unauthorized) => return redirect(&headers, "/login"),
        Err(error) => error.user_message().unwrap_or(PAYMENT_FAILED).to_string(),
    };

    let draft = PaymentDraft {
        school_id: form.school_id,
        amount: form.amount,
        callback_url: form.callback_url,
    };
    let card = payment_form(&draft, &alert(AlertKind::Error, &message));

    if is_htmx_request(&headers) {
        Html(card).into_response()
    } else {
        let inner_content = format!(
            "{}{}",
            views::page_header("Create Payment", "Generate a payment link and continue to the gateway."),
            card
        );
        Html(crate::page_response(&state, &headers, "Create Payment", "/payment", &inner_content)).into_response()
    }
}
