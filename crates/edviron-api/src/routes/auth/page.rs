//! Login and registration screens

use axum::extract::Query;
use axum::response::Html;
use edviron_utils::escape_html;
use std::collections::HashMap;

use crate::views::{alert, AlertKind};
use crate::AppState;

const INPUT_CLASS: &str = "w-full px-4 py-2 border rounded-lg dark:bg-gray-700 dark:border-gray-600";

/// Login card; `notice` is already-rendered alert HTML
pub fn login_form(email: &str, notice: &str) -> String {
    format!(
        r#"<div class='w-full max-w-md bg-white dark:bg-gray-800 rounded-2xl shadow-lg p-8'>
    <h2 class='text-2xl font-bold mb-6 text-center'>Login</h2>
    {}
    <form method='post' action='/login' class='space-y-4'>
        <div><label class='block text-sm font-medium mb-1' for='email'>Email</label>
            <input id='email' type='email' name='email' value='{}' class='{}'></div>
        <div><label class='block text-sm font-medium mb-1' for='password'>Password</label>
            <input id='password' type='password' name='password' class='{}'></div>
        <button type='submit' class='w-full py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Login</button>
    </form>
    <p class='mt-4 text-sm text-center'>Don't have an account? <a href='/register' class='text-indigo-600 dark:text-indigo-400'>Register</a></p>
</div>"#,
        notice,
        escape_html(email),
        INPUT_CLASS,
        INPUT_CLASS
    )
}

/// Registration card; `notice` is already-rendered alert HTML
pub fn register_form(name: &str, email: &str, notice: &str) -> String {
    format!(
        r#"<div class='w-full max-w-md bg-white dark:bg-gray-800 rounded-2xl shadow-lg p-8'>
    <h2 class='text-2xl font-bold mb-6 text-center'>Register</h2>
    {}
    <form method='post' action='/register' class='space-y-4'>
        <div><label class='block text-sm font-medium mb-1' for='name'>Name</label>
            <input id='name' type='text' name='name' value='{}' class='{}'></div>
        <div><label class='block text-sm font-medium mb-1' for='email'>Email</label>
            <input id='email' type='email' name='email' value='{}' class='{}'></div>
        <div><label class='block text-sm font-medium mb-1' for='password'>Password</label>
            <input id='password' type='password' name='password' minlength='6' maxlength='20' class='{}'></div>
        <button type='submit' class='w-full py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Register</button>
    </form>
    <p class='mt-4 text-sm text-center'>Already registered? <a href='/login' class='text-indigo-600 dark:text-indigo-400'>Login</a></p>
</div>"#,
        notice,
        escape_html(name),
        INPUT_CLASS,
        escape_html(email),
        INPUT_CLASS,
        INPUT_CLASS
    )
}

pub async fn page_login(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    params: Query<HashMap<String, String>>,
) -> Html<String> {
    let notice = if params.contains_key("registered") {
        alert(AlertKind::Success, "Registration successful! Please log in.")
    } else {
        String::new()
    };
    Html(crate::standalone_response(&state, &headers, "Login", &login_form("", &notice)))
}

pub async fn page_register(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Html<String> {
    Html(crate::standalone_response(&state, &headers, "Register", &register_form("", "", "")))
}
