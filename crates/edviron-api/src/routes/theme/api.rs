//! Dark mode toggle

use axum::http::header::{REFERER, SET_COOKIE};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};

use crate::session::{dark_mode, redirect_with_cookie, theme_cookie};
use crate::{is_htmx_request, AppState};

/// POST /theme/toggle
///
/// HTMX callers get `HX-Refresh` so the page re-renders in the new theme;
/// plain form posts go back to where they came from.
pub async fn toggle_theme(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
) -> Response {
    let dark = !dark_mode(&headers, state.config.theme.default_dark);
    log::debug!("Theme switched to {}", if dark { "dark" } else { "light" });

    if is_htmx_request(&headers) {
        [(SET_COOKIE.as_str(), theme_cookie(dark)), ("HX-Refresh", "true".to_string())].into_response()
    } else {
        let back = headers
            .get(REFERER)
            .and_then(|value| value.to_str().ok())
            .and_then(local_path)
            .unwrap_or_else(|| "/dashboard".to_string());
        redirect_with_cookie(&headers, &back, Some(theme_cookie(dark)))
    }
}

/// Path and query of `referer`, or `None` when following it could leave
/// this site (`//host` and `/\host` are read as other hosts by browsers)
fn local_path(referer: &str) -> Option<String> {
    let rest = &referer[referer.find("://")? + 3..];
    let path = &rest[rest.find('/')?..];
    if path.starts_with("//") || path.starts_with("/\\") {
        return None;
    }
    Some(path.to_string())
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use edviron_core::testing::FakeBackend;

    fn toggle(cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/theme/toggle")
            .header("hx-request", "true");
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_toggle_sets_year_long_cookie() {
        let (router, _) = router(FakeBackend::new());
        let response = send(&router, toggle(None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["HX-Refresh"], "true");
        let cookie = response.headers()["set-cookie"].to_str().unwrap();
        assert!(cookie.starts_with("edviron_theme=dark"));
        assert!(cookie.contains("Max-Age=31536000"));
    }

    #[tokio::test]
    async fn test_toggle_flips_back() {
        let (router, _) = router(FakeBackend::new());
        let response = send(&router, toggle(Some("edviron_theme=dark"))).await;
        let cookie = response.headers()["set-cookie"].to_str().unwrap();
        assert!(cookie.starts_with("edviron_theme=light"));
    }

    #[tokio::test]
    async fn test_pages_follow_cookie() {
        let (router, _) = router(FakeBackend::new());
        let dark = body_text(get(&router, "/", Some("edviron_theme=dark")).await).await;
        assert!(dark.contains(r#"<html lang="en" class="dark">"#));

        let light = body_text(get(&router, "/", None).await).await;
        assert!(light.contains(r#"<html lang="en" class="">"#));
    }

    #[tokio::test]
    async fn test_plain_post_returns_to_referer() {
        let (router, _) = router(FakeBackend::new());
        let request = Request::builder()
            .method("POST")
            .uri("/theme/toggle")
            .header("referer", "http://localhost:8082/analytics")
            .body(Body::empty())
            .unwrap();
        let response = send(&router, request).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/analytics");
    }

    #[tokio::test]
    async fn test_plain_post_stays_on_site() {
        let (router, _) = router(FakeBackend::new());
        let request = Request::builder()
            .method("POST")
            .uri("/theme/toggle")
            .header("referer", "https://x.test//evil.example/")
            .body(Body::empty())
            .unwrap();
        let response = send(&router, request).await;
        assert_eq!(response.headers()["location"], "/dashboard");
    }

    #[test]
    fn test_local_path() {
        assert_eq!(super::local_path("http://h/transactions?page=2").as_deref(), Some("/transactions?page=2"));
        assert!(super::local_path("http://h//evil.example").is_none());
        assert!(super::local_path("http://h/\\evil.example").is_none());
        assert!(super::local_path("http://h").is_none());
        assert!(super::local_path("/analytics").is_none());
    }
}
