// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP transport for the IssueHub API.
//!
//! Handles:
//! - Credential exchange (login, refresh, logout)
//! - Bearer-authenticated requests to protected endpoints
//! - Error classification from response status and body
//!
//! The refresh credential is an HttpOnly cookie scoped to the API origin.
//! It lives in this client's cookie jar and never enters session state.

use crate::error::{extract_detail, normalize_detail, ApiError, Result};
use crate::models::{RegisterUser, UserProfile};
use reqwest::{Method, StatusCode};
use serde::Deserialize;

/// IssueHub API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL.
    ///
    /// The cookie store is enabled so the refresh cookie set by `POST /token`
    /// rides along on later refresh calls.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Exchange credentials for an access token.
    ///
    /// The server also sets the refresh cookie on this response.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse> {
        let response = self
            .http
            .post(self.url("/token"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("Login request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Mint a new access token from the refresh cookie.
    ///
    /// The server rotates the cookie on every call. Any rejection means the
    /// session cannot be recovered, so every non-2xx maps to `SessionExpired`.
    pub async fn refresh(&self) -> Result<TokenResponse> {
        let response = self
            .http
            .post(self.url("/token/refresh"))
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("Refresh request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::SessionExpired(normalize_detail(
                status.as_u16(),
                &body,
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Network(format!("JSON parse error: {}", e)))
    }

    /// Create a new account. Does not authenticate.
    pub async fn register(&self, payload: &RegisterUser) -> Result<UserProfile> {
        let response = self
            .http
            .post(self.url("/users"))
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("Register request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Tell the server to drop the refresh cookie.
    pub async fn logout(&self) -> Result<()> {
        let response = self
            .http
            .post(self.url("/logout"))
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("Logout request failed: {}", e)))?;

        Self::check_response(response).await?;
        Ok(())
    }

    /// Service liveness probe.
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self
            .http
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("Health request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Send one bearer-authenticated request and return the raw response.
    ///
    /// Status handling is the caller's job; the session layer needs to see
    /// 401s before they are classified so it can refresh and retry.
    pub(crate) async fn send_authed(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&serde_json::Value>,
        access_token: &str,
    ) -> Result<reqwest::Response> {
        let mut request = self
            .http
            .request(method, self.url(path))
            .bearer_auth(access_token);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        request
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("Request to {} failed: {}", path, e)))
    }

    /// Check response status and return the response for body reads.
    pub(crate) async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let body = response.text().await.unwrap_or_default();

        Err(classify(status, retry_after.as_deref(), &body))
    }

    /// Check response status and parse the JSON body.
    pub(crate) async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let response = Self::check_response(response).await?;

        response
            .json()
            .await
            .map_err(|e| ApiError::Network(format!("JSON parse error: {}", e)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map a non-2xx response to the error taxonomy.
fn classify(status: StatusCode, retry_after: Option<&str>, body: &str) -> ApiError {
    match status.as_u16() {
        401 => ApiError::Auth(normalize_detail(401, body)),
        // Rate limited - the message must tell the user when to retry
        429 => {
            tracing::warn!("IssueHub rate limit hit (429)");
            let detail = extract_detail(body).unwrap_or_else(|| match retry_after {
                Some(secs) => format!("Rate limited, retry in {} seconds", secs),
                None => ApiError::RATE_LIMITED.to_string(),
            });
            ApiError::RateLimited(detail)
        }
        400 | 422 => ApiError::Validation(normalize_detail(status.as_u16(), body)),
        404 => ApiError::NotFound(normalize_detail(404, body)),
        _ => ApiError::Fetch(normalize_detail(status.as_u16(), body)),
    }
}

/// Serialize a write payload for the request body.
pub(crate) fn json_body<B: serde::Serialize>(payload: &B) -> Result<serde_json::Value> {
    serde_json::to_value(payload)
        .map_err(|e| ApiError::Network(format!("JSON encode error: {}", e)))
}

/// Token grant response from login and refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Acknowledgement body for endpoints that return no record.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
