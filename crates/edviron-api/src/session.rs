//! Browser cookies and the login gate
//!
//! The backend's own session cookie is kept URL-encoded inside
//! `edviron_session`, an HttpOnly cookie scoped to this server. Every
//! protected page checks `GET /users/me` with it before rendering.

use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use edviron_core::{CoreError, Session, UserProfile};

use crate::error::ApiError;
use crate::{is_htmx_request, AppState};

pub const SESSION_COOKIE: &str = "edviron_session";
pub const THEME_COOKIE: &str = "edviron_theme";

/// One year
pub const THEME_MAX_AGE: u64 = 31_536_000;

/// Value of cookie `name` from the request, if present
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .map(|pair| pair.trim())
        .find_map(|pair| pair.strip_prefix(prefix.as_str()))
        .map(|value| value.to_string())
}

/// Backend session carried by the request
pub fn session_from_headers(headers: &HeaderMap) -> Option<Session> {
    let raw = read_cookie(headers, SESSION_COOKIE)?;
    let cookie = urlencoding::decode(&raw).ok()?;
    Session::new(cookie.into_owned())
}

/// Theme of the request; `default_dark` when no cookie was set
pub fn dark_mode(headers: &HeaderMap, default_dark: bool) -> bool {
    match read_cookie(headers, THEME_COOKIE).as_deref() {
        Some("dark") => true,
        Some("light") => false,
        _ => default_dark,
    }
}

pub fn session_cookie(session: &Session) -> String {
    format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax",
        SESSION_COOKIE,
        urlencoding::encode(session.cookie())
    )
}

pub fn clear_session_cookie() -> String {
    format!("{}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax", SESSION_COOKIE)
}

pub fn theme_cookie(dark: bool) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        THEME_COOKIE,
        if dark { "dark" } else { "light" },
        THEME_MAX_AGE
    )
}

/// Send the browser to `location`.
///
/// HTMX requests get `HX-Redirect` so the whole page navigates instead of
/// swapping the target into a fragment.
pub fn redirect(headers: &HeaderMap, location: &str) -> Response {
    redirect_with_cookie(headers, location, None)
}

pub fn redirect_with_cookie(headers: &HeaderMap, location: &str, cookie: Option<String>) -> Response {
    let mut response = if is_htmx_request(headers) {
        (StatusCode::OK, [("HX-Redirect", location.to_string())]).into_response()
    } else {
        (StatusCode::SEE_OTHER, [(LOCATION, location.to_string())]).into_response()
    };
    if let Some(cookie) = cookie {
        if let Ok(value) = cookie.parse() {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

/// Gate for protected pages: the session and its user, or a redirect to `/login`
pub async fn require_user(state: &AppState, headers: &HeaderMap) -> Result<(Session, UserProfile), Response> {
    let session = session_from_headers(headers);
    match state.dashboard.current_user(session.as_ref()).await {
        Ok(user) => match session {
            Some(session) => Ok((session, user)),
            None => Err(redirect(headers, "/login")),
        },
        Err(error) => {
            log::debug!("Session check failed: {}", error);
            Err(redirect(headers, "/login"))
        }
    }
}

/// Gate for JSON endpoints: answers 401 instead of redirecting
pub async fn require_session(state: &AppState, headers: &HeaderMap) -> Result<Session, ApiError> {
    let session = session_from_headers(headers).ok_or(CoreError::Unauthorized)?;
    state.dashboard.current_user(Some(&session)).await.map_err(|error| {
        log::debug!("Session check failed: {}", error);
        ApiError::from(CoreError::Unauthorized)
    })?;
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie.parse().unwrap());
        headers
    }

    #[test]
    fn test_read_cookie() {
        let headers = headers("a=1; edviron_theme=dark;b=2");
        assert_eq!(read_cookie(&headers, THEME_COOKIE).as_deref(), Some("dark"));
        assert_eq!(read_cookie(&headers, "b").as_deref(), Some("2"));
        assert!(read_cookie(&headers, "missing").is_none());
    }

    #[test]
    fn test_session_cookie_round_trip() {
        let session = Session::new("connect.sid=s%3Aabc; token=xyz").unwrap();
        let set_cookie = session_cookie(&session);
        let value = set_cookie.split(';').next().unwrap();

        let parsed = session_from_headers(&headers(value)).unwrap();
        assert_eq!(parsed, session);
    }

    #[test]
    fn test_dark_mode_default() {
        assert!(dark_mode(&HeaderMap::new(), true));
        assert!(!dark_mode(&headers("edviron_theme=light"), true));
        assert!(dark_mode(&headers("edviron_theme=dark"), false));
    }

    #[test]
    fn test_redirect_kinds() {
        let response = redirect(&HeaderMap::new(), "/login");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/login");

        let mut htmx = HeaderMap::new();
        htmx.insert("hx-request", "true".parse().unwrap());
        let response = redirect(&htmx, "/login");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["HX-Redirect"], "/login");
    }
}
