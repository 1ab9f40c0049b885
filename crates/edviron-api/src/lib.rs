//! HTTP server with HTMX support for the Edviron dashboard
//!
//! Routes are organized into modules:
//! - routes::auth: Login, registration, logout
//! - routes::home: Landing page and section dashboard
//! - routes::transactions: Filterable, sortable, paginated listing
//! - routes::schools: Transactions of one school
//! - routes::status: Status lookup by custom order id
//! - routes::payments: Payment collection requests
//! - routes::analytics: Charts and summary totals
//! - routes::theme: Dark mode toggle

pub mod error;
pub mod routes;
pub mod session;
pub mod views;

use axum::{
    routing::{get, post},
    Router,
};
use edviron_config::Config;
use edviron_core::{BackendRef, Dashboard};
use std::sync::Arc;
use tokio::net::TcpListener;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Dashboard,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, backend: BackendRef) -> Self {
        Self {
            dashboard: Dashboard::new(config.clone(), backend),
            config: Arc::new(config),
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::analytics::{api_analytics, page_analytics};
    use routes::auth::{login_submit, logout, page_login, page_register, register_submit};
    use routes::home::{index_page, page_dashboard};
    use routes::payments::{page_payment, payment_submit};
    use routes::schools::{api_schools, htmx_school_transactions, page_transactions_by_school};
    use routes::status::{htmx_status_lookup, page_transaction_status};
    use routes::theme::toggle_theme;
    use routes::transactions::{
        api_transactions, htmx_filter_apply, htmx_filter_form, htmx_transactions_list, page_transactions,
    };

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        .route("/api/schools", get(api_schools))
        .route("/api/analytics", get(api_analytics))
        // Authentication
        .route("/login", get(page_login).post(login_submit))
        .route("/register", get(page_register).post(register_submit))
        .route("/logout", get(logout).post(logout))
        // HTMX page routes
        .route("/", get(index_page))
        .route("/dashboard", get(page_dashboard))
        .route("/transactions", get(page_transactions))
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/transactions/filter", get(htmx_filter_form).post(htmx_filter_apply))
        .route("/transactions-by-school", get(page_transactions_by_school))
        .route("/transactions-by-school/list", get(htmx_school_transactions))
        .route("/transaction-status", get(page_transaction_status))
        .route("/transaction-status/check", get(htmx_status_lookup))
        .route("/payment", get(page_payment).post(payment_submit))
        .route("/analytics", get(page_analytics))
        .route("/theme/toggle", post(toggle_theme))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str, dark: bool) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en" class="{}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Edviron</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <script>tailwind.config = {{ darkMode: 'class' }}</script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900 dark:bg-gray-900 dark:text-gray-100">
    {}
</body>
</html>"#,
        if dark { "dark" } else { "" },
        title,
        content
    )
}

/// Navigation sidebar with theme toggle and logout
pub fn nav_sidebar(current_path: &str, dark: bool) -> String {
    let links = [
        ("/dashboard", "Dashboard", "dashboard"),
        ("/transactions", "Transactions", "transactions"),
        ("/transactions-by-school", "By School", "schools"),
        ("/transaction-status", "Status Check", "status"),
        ("/payment", "Create Payment", "payment"),
        ("/analytics", "Analytics", "analytics"),
    ];

    let mut nav = String::from(
        "<div class='bg-white dark:bg-gray-800 border-r dark:border-gray-700 h-screen flex flex-col'>\
         <div class='p-4 border-b dark:border-gray-700'><h1 class='text-xl font-bold text-indigo-600 dark:text-indigo-400'>Edviron</h1></div>\
         <ul class='flex-1 py-2 space-y-1 px-2'>",
    );

    for (path, label, id) in &links {
        // "/transactions" must not light up on "/transactions-by-school"
        let is_active = current_path == *path || current_path.starts_with(&format!("{}/", path));
        let active_class = if is_active {
            "bg-indigo-50 text-indigo-600 dark:bg-gray-700 dark:text-indigo-300"
        } else {
            "text-gray-600 hover:bg-gray-50 dark:text-gray-300 dark:hover:bg-gray-700"
        };
        let icon = match *id {
            "dashboard" => "🏠",
            "transactions" => "📋",
            "schools" => "🏫",
            "status" => "🔍",
            "payment" => "💳",
            "analytics" => "📈",
            _ => "📄",
        };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }

    nav.push_str(&format!(
        r#"</ul>
<div class='p-2 border-t dark:border-gray-700 space-y-1'>
    <button hx-post='/theme/toggle' hx-swap='none' class='w-full flex items-center gap-2 px-3 py-2 rounded-lg text-gray-600 hover:bg-gray-50 dark:text-gray-300 dark:hover:bg-gray-700'>{}</button>
    <a href='/logout' class='flex items-center gap-2 px-3 py-2 rounded-lg text-gray-600 hover:bg-gray-50 dark:text-gray-300 dark:hover:bg-gray-700'>🚪<span>Logout</span></a>
</div></div>"#,
        if dark { "☀️<span>Light mode</span>" } else { "🌙<span>Dark mode</span>" }
    ));
    nav
}

/// Check if request is from HTMX (partial page update)
pub fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(
    state: &AppState,
    headers: &axum::http::HeaderMap,
    title: &str,
    current_path: &str,
    inner_content: &str,
) -> String {
    if is_htmx_request(headers) {
        format!(
            r#"<main class='flex-1 overflow-auto p-6'>{}</main>"#,
            inner_content
        )
    } else {
        let dark = session::dark_mode(headers, state.config.theme.default_dark);
        base_html(
            title,
            &format!(
                r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto p-6'>{}</main>
    </div>
</div>"#,
                nav_sidebar(current_path, dark),
                inner_content
            ),
            dark,
        )
    }
}

/// Page without navigation, for the landing and sign-in screens
pub fn standalone_response(state: &AppState, headers: &axum::http::HeaderMap, title: &str, inner_content: &str) -> String {
    let dark = session::dark_mode(headers, state.config.theme.default_dark);
    base_html(
        title,
        &format!(
            "<div class='min-h-screen flex flex-col items-center justify-center px-4 py-10'>{}</div>",
            inner_content
        ),
        dark,
    )
}

/// Start the HTTP server
///
/// Binds `server.host:server.port` and serves until the process stops.
pub async fn start_server(config: Config, backend: BackendRef) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    log::info!("Backend API at {}", config.api_base());
    let state = AppState::new(config, backend);

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Edviron dashboard on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Home)");
    log::info!("  - /transactions (Transaction list)");
    log::info!("  - /transactions-by-school (Per-school transactions)");
    log::info!("  - /transaction-status (Status lookup)");
    log::info!("  - /payment (Create payment)");
    log::info!("  - /analytics (Charts)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}
