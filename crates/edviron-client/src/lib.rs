//! HTTP client for the Edviron payments backend
//!
//! [`HttpBackend`] implements [`BackendApi`] with one shared `reqwest`
//! client. The browser's backend session travels as a `Cookie` header on
//! every call.

pub mod error;

use async_trait::async_trait;
use edviron_config::Config;
use edviron_core::{
    AuthSession, BackendApi, CoreError, CoreResult, Credentials, PaymentLink, PaymentRequest, Registration,
    SchoolTransactions, Session, Transaction, TransactionPage, TransactionQuery, UserProfile,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE, SET_COOKIE};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

pub use error::ClientError;

/// Backend API client
#[derive(Clone)]
pub struct HttpBackend {
    http_client: HttpClient,
    base_url: String,
}

impl HttpBackend {
    /// Create a client from configuration
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        Self::with_base_url(config.api_base(), Duration::from_secs(config.backend.timeout_secs))
    }

    /// Create a client for an explicit base URL
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::RequestError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Default headers, with the session cookie when there is one
    fn create_headers(session: Option<&Session>) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(session) = session {
            let cookie = HeaderValue::from_str(session.cookie())
                .map_err(|e| ClientError::InvalidHeader(format!("Failed to create cookie header: {}", e)))?;
            headers.insert(COOKIE, cookie);
        }
        Ok(headers)
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(status: reqwest::StatusCode, response: reqwest::Response) -> ClientError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();
        let message = extract_message(&body_text).unwrap_or_else(|| body_text.trim().to_string());

        match status_code {
            401 | 403 => ClientError::Unauthorized(message),
            404 => ClientError::NotFound(message),
            400..=499 => ClientError::BadRequest {
                status: status_code,
                message,
            },
            500..=599 => {
                log::warn!("Backend error {}: {}", status_code, body_text);
                ClientError::ServerError(status_code, message)
            }
            _ => ClientError::HttpError(status_code, message),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }
        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, session: &Session) -> Result<T, ClientError> {
        let url = self.url(path);
        log::debug!("GET {}", url);
        let headers = Self::create_headers(Some(session))?;
        let response = self.send(self.http_client.get(&url).headers(headers)).await?;
        Self::read_json(response).await
    }
}

/// `message` of a JSON error body; arrays of messages are joined with ", "
pub fn extract_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("message")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}

/// `name=value` pairs of every `Set-Cookie` header, joined for a `Cookie` header
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let pairs: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::trim)
        .filter(|pair| pair.contains('=') && !pair.ends_with('='))
        .collect();
    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}

/// Status lookups answer with a list, a single object or a wrapped list
fn status_rows(value: Value) -> Result<Vec<Transaction>, ClientError> {
    let rows = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let wrapped = map.remove("data").or_else(|| map.remove("transactions"));
            match wrapped {
                Some(Value::Array(items)) => items,
                Some(single @ Value::Object(_)) => vec![single],
                _ => vec![Value::Object(map)],
            }
        }
        Value::Null => vec![],
        other => {
            return Err(ClientError::DeserializationError(format!(
                "Unexpected status reply: {}",
                other
            )))
        }
    };
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row)
                .map_err(|e| ClientError::DeserializationError(format!("Failed to parse transaction: {}", e)))
        })
        .collect()
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> CoreResult<AuthSession> {
        let url = self.url("/auth/login");
        log::debug!("POST {}", url);
        let headers = Self::create_headers(None)?;
        let body = serde_json::json!({ "email": credentials.email, "password": credentials.password });

        let response = self
            .send(self.http_client.post(&url).headers(headers).json(&body))
            .await
            .map_err(|e| match e {
                // A rejected login carries a message for the form, it is not an expired session
                ClientError::Unauthorized(message) => CoreError::Backend { status: 401, message },
                other => other.into(),
            })?;

        let cookie = session_cookie(response.headers());
        let body: Value = Self::read_json(response).await.unwrap_or(Value::Null);
        let message = body.get("message").and_then(Value::as_str).map(str::to_string);

        let cookie = cookie.or_else(|| {
            body.get("token")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .map(|t| format!("token={}", t))
        });

        match cookie {
            Some(cookie) => Ok(AuthSession { cookie, message }),
            None => Err(CoreError::InvalidResponse {
                message: "Login succeeded but no session was returned".to_string(),
            }),
        }
    }

    async fn register(&self, registration: &Registration) -> CoreResult<Option<String>> {
        let url = self.url("/auth/register");
        log::debug!("POST {}", url);
        let headers = Self::create_headers(None)?;
        let response = self
            .send(self.http_client.post(&url).headers(headers).json(registration))
            .await?;
        let body: Value = Self::read_json(response).await.unwrap_or(Value::Null);
        Ok(body.get("message").and_then(Value::as_str).map(str::to_string))
    }

    async fn current_user(&self, session: &Session) -> CoreResult<UserProfile> {
        Ok(self.get_json("/users/me", session).await?)
    }

    async fn list_transactions(&self, session: &Session, query: &TransactionQuery) -> CoreResult<TransactionPage> {
        let path = format!("/transactions?{}", query.to_query_string());
        Ok(self.get_json(&path, session).await?)
    }

    async fn school_transactions(&self, session: &Session, school_id: &str) -> CoreResult<Vec<Transaction>> {
        let path = format!("/transactions/school/{}", urlencoding::encode(school_id));
        let reply: SchoolTransactions = self.get_json(&path, session).await?;
        Ok(reply.transactions)
    }

    async fn transaction_status(&self, session: &Session, custom_order_id: &str) -> CoreResult<Vec<Transaction>> {
        let path = format!("/transaction-status/{}", urlencoding::encode(custom_order_id));
        let reply: Value = self.get_json(&path, session).await?;
        Ok(status_rows(reply)?)
    }

    async fn create_payment(&self, session: &Session, request: &PaymentRequest) -> CoreResult<PaymentLink> {
        let url = self.url("/create-payment");
        log::debug!("POST {}", url);
        let headers = Self::create_headers(Some(session))?;
        let response = self
            .send(self.http_client.post(&url).headers(headers).json(request))
            .await?;
        Ok(Self::read_json(response).await?)
    }
}

// ==================== Tests ====================
