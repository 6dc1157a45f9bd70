// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types and server error body normalization.

use serde::{Deserialize, Serialize};

/// Error type for every fallible operation in the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    // The 429 detail is already a full sentence with the retry timing.
    #[error("{0}")]
    RateLimited(String),

    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Request failed: {0}")]
    Fetch(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Fallback detail when a 429 response carries no usable body.
    pub const RATE_LIMITED: &'static str =
        "Too many login attempts, please wait a minute and try again";

    /// The single display string carried by this error.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Auth(msg)
            | ApiError::RateLimited(msg)
            | ApiError::SessionExpired(msg)
            | ApiError::Validation(msg)
            | ApiError::NotFound(msg)
            | ApiError::Fetch(msg)
            | ApiError::Network(msg) => msg.clone(),
            ApiError::Internal(err) => err.to_string(),
        }
    }

    /// True when credentials were rejected (bad login or missing token).
    /// Throttling is not a credential rejection and stays out.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }

    /// True when the refresh credential was rejected and the session is dead.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired(_))
    }
}

/// Normalized error payload kept in session state for UI banners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl From<&ApiError> for ErrorDetail {
    fn from(err: &ApiError) -> Self {
        ErrorDetail {
            detail: err.detail(),
        }
    }
}

/// Pull the display string out of an IssueHub error body, if it has one.
///
/// The API reports failures as `{"detail": ...}` where the payload is either
/// a plain string or an array of per-field validation objects carrying `msg`.
/// The first message is surfaced.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;

    match value.get("detail") {
        Some(serde_json::Value::String(s)) => return Some(s.clone()),
        Some(serde_json::Value::Array(items)) => {
            if let Some(msg) = items
                .iter()
                .find_map(|item| item.get("msg").and_then(|m| m.as_str()))
            {
                return Some(msg.to_string());
            }
        }
        _ => {}
    }

    if let serde_json::Value::String(s) = value {
        return Some(s);
    }

    None
}

/// Collapse an error body to one display string, falling back to the raw
/// body or the bare status line when no `detail` is present.
pub(crate) fn normalize_detail(status: u16, body: &str) -> String {
    if let Some(detail) = extract_detail(body) {
        return detail;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, trimmed)
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ApiError>;
