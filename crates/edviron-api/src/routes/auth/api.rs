//! Login, registration and logout submissions
//!
//! Failures re-render the form with the backend's message, or a generic
//! one when the backend gave none.

use axum::extract::Form;
use axum::response::{Html, IntoResponse, Response};
use edviron_core::{Credentials, Registration};
use serde::Deserialize;

use super::page::{login_form, register_form};
use crate::session::{clear_session_cookie, redirect_with_cookie, session_cookie};
use crate::views::{alert, AlertKind};
use crate::AppState;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// POST /login
pub async fn login_submit(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let credentials = Credentials {
        email: form.email.trim().to_string(),
        password: form.password,
    };

    let message = match state.dashboard.login(&credentials).await {
        Ok(auth) => match auth.session() {
            Some(session) => {
                log::info!("{} logged in", credentials.email);
                return redirect_with_cookie(&headers, "/dashboard", Some(session_cookie(&session)));
            }
            None => LOGIN_FAILED.to_string(),
        },
        Err(error) => error.user_message().unwrap_or(LOGIN_FAILED).to_string(),
    };

    let notice = alert(AlertKind::Error, &message);
    Html(crate::standalone_response(
        &state,
        &headers,
        "Login",
        &login_form(&credentials.email, &notice),
    ))
    .into_response()
}

/// POST /register
pub async fn register_submit(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    Form(form): Form<RegisterForm>,
) -> Response {
    let registration = Registration {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password,
    };

    let message = match state.dashboard.register(&registration).await {
        Ok(_) => {
            log::info!("Registered {}", registration.email);
            return crate::session::redirect(&headers, "/login?registered=1");
        }
        Err(error) => error.user_message().unwrap_or(REGISTRATION_FAILED).to_string(),
    };

    let notice = alert(AlertKind::Error, &message);
    Html(crate::standalone_response(
        &state,
        &headers,
        "Register",
        &register_form(&registration.name, &registration.email, &notice),
    ))
    .into_response()
}

/// GET or POST /logout
pub async fn logout(headers: axum::http::HeaderMap) -> Response {
    redirect_with_cookie(&headers, "/login", Some(clear_session_cookie()))
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;
    use edviron_core::testing::{FakeBackend, VALID_EMAIL, VALID_PASSWORD};
    use edviron_core::validation::MSG_PASSWORD_LENGTH;

    #[tokio::test]
    async fn test_login_sets_session_cookie() {
        let (router, _) = router(FakeBackend::new());
        let body = format!("email={}&password={}", urlencoding::encode(VALID_EMAIL), VALID_PASSWORD);
        let response = post_form(&router, "/login", None, &body, false).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/dashboard");
        let cookie = response.headers()["set-cookie"].to_str().unwrap();
        assert!(cookie.starts_with(&signed_in()));
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_login_failure_shows_backend_message() {
        let (router, _) = router(FakeBackend::new());
        let body = format!("email={}&password=wrong", urlencoding::encode(VALID_EMAIL));
        let response = post_form(&router, "/login", None, &body, false).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("set-cookie").is_none());
        assert!(body_text(response).await.contains("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_register_validates_before_request() {
        let (router, backend) = router(FakeBackend::new());
        let response = post_form(&router, "/register", None, "name=Ravi&email=ravi%40example.com&password=123", false).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(MSG_PASSWORD_LENGTH));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_register_success_redirects_to_login() {
        let (router, _) = router(FakeBackend::new());
        let response = post_form(
            &router,
            "/register",
            None,
            "name=Ravi&email=ravi%40example.com&password=secret99",
            false,
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/login?registered=1");

        let page = get(&router, "/login?registered=1", None).await;
        assert!(body_text(page).await.contains("Registration successful"));
    }

    #[tokio::test]
    async fn test_register_conflict_message() {
        let (router, _) = router(FakeBackend::new());
        let body = format!("name=Admin&email={}&password=secret99", urlencoding::encode(VALID_EMAIL));
        let response = post_form(&router, "/register", None, &body, false).await;
        assert!(body_text(response).await.contains("Email already registered"));
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let (router, _) = router(FakeBackend::new());
        let response = get(&router, "/logout", Some(&signed_in())).await;
        assert_login_redirect(&response);
        let cookie = response.headers()["set-cookie"].to_str().unwrap();
        assert!(cookie.contains("Max-Age=0"));
    }
}
