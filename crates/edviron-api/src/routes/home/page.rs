//! Landing page and the dashboard of sections

use axum::response::{Html, IntoResponse, Response};
use edviron_utils::escape_html;

use crate::session::require_user;
use crate::AppState;

/// Public landing page
pub async fn index_page(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Html<String> {
    let inner_content = r#"<div class='text-center max-w-2xl'>
        <h1 class='text-5xl font-extrabold mb-6'>Welcome to the Transactions Dashboard</h1>
        <p class='text-gray-600 dark:text-gray-300 text-lg mb-10'>Manage and review your transactions effortlessly. Click "Get Started" to log in and begin exploring transaction overviews, school-specific details and status checks.</p>
        <a href='/dashboard' class='bg-indigo-600 text-white px-8 py-4 rounded-lg shadow-lg hover:bg-indigo-700 text-lg font-semibold'>Get Started</a>
    </div>"#;

    Html(crate::standalone_response(&state, &headers, "Welcome", inner_content))
}

/// Dashboard page - one card per section
pub async fn page_dashboard(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    let (_session, user) = match require_user(&state, &headers).await {
        Ok(found) => found,
        Err(redirect) => return redirect,
    };

    let sections = [
        ("/transactions", "Transactions Overview", "View and manage all transactions with filters, sorting, and more.", "bg-indigo-600 hover:bg-indigo-700"),
        ("/transactions-by-school", "Transactions by School", "Fetch and display transactions for a specific school.", "bg-emerald-600 hover:bg-emerald-700"),
        ("/transaction-status", "Transaction Status Check", "Check the status of a transaction using a custom order ID.", "bg-yellow-500 hover:bg-yellow-600"),
        ("/payment", "Create Payment", "Generate a payment link for a school fee collection.", "bg-sky-600 hover:bg-sky-700"),
        ("/analytics", "Analytics", "Status breakdown, payment modes and monthly volume.", "bg-rose-600 hover:bg-rose-700"),
    ];

    let cards: String = sections
        .iter()
        .map(|(path, title, text, colors)| {
            format!(
                "<a href='{}' class='block text-white p-8 rounded-2xl shadow-lg {}'><h3 class='text-2xl font-semibold mb-3'>{}</h3><p class='text-sm opacity-90'>{}</p></a>",
                path, colors, title, text
            )
        })
        .collect();

    let inner_content = format!(
        r#"<div class='mb-8'>
            <h2 class='text-3xl font-extrabold mb-2'>Dashboard</h2>
            <p class='text-gray-600 dark:text-gray-300'>Welcome, {}. Navigate to different sections to manage and review transactions.</p>
        </div>
        <div class='grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-8'>{}</div>"#,
        escape_html(user.display_name()),
        cards
    );

    Html(crate::page_response(&state, &headers, "Dashboard", "/dashboard", &inner_content)).into_response()
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;
    use edviron_core::testing::FakeBackend;

    #[tokio::test]
    async fn test_home_is_public() {
        let (router, backend) = router(FakeBackend::new());
        let response = get(&router, "/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Get Started"));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_requires_login() {
        let (router, _) = router(FakeBackend::new());
        let response = get(&router, "/dashboard", None).await;
        assert_login_redirect(&response);

        let response = get(&router, "/dashboard", Some("edviron_session=token%3Dstale")).await;
        assert_login_redirect(&response);
    }

    #[tokio::test]
    async fn test_dashboard_greets_user() {
        let (router, backend) = router(FakeBackend::new());
        let response = get(&router, "/dashboard", Some(&signed_in())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Welcome, Admin"));
        assert!(body.contains("href='/analytics'"));
        assert_eq!(backend.calls(), vec!["current_user"]);
    }
}
