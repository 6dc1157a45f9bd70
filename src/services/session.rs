// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session store owning the authentication lifecycle.
//!
//! Handles:
//! - Login, registration, and silent session restore
//! - Access token refresh with single-flight coordination
//! - The bearer-authenticated request primitive with one retry after refresh
//! - Logout, including the durable token slot and collection reset hooks
//!
//! The access token is mirrored into durable storage and is the sole
//! authority for "is logged in". The refresh credential never appears here;
//! it lives in the transport's cookie jar.

use crate::error::{ApiError, ErrorDetail, Result};
use crate::models::{ProfileUpdate, RegisterUser, UserProfile};
use crate::services::api::{self, ApiClient, MessageResponse};
use crate::storage::TokenStore;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;

/// Authentication state snapshot.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Current bearer credential; present iff logged in
    pub access_token: Option<String>,
    /// Profile from the last `/users/me` fetch
    pub current_user: Option<UserProfile>,
    /// True while a login/register/restore call is in flight
    pub authenticating: bool,
    /// Most recent store-level error, for the global banner
    pub last_error: Option<ErrorDetail>,
}

/// Lifecycle phase derived from session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Anonymous,
    Authenticating,
    Authenticated,
}

impl Session {
    /// Current phase: `Anonymous -> Authenticating -> Authenticated` and
    /// back to `Anonymous` on logout or an unrecoverable refresh failure.
    pub fn phase(&self) -> AuthPhase {
        if self.authenticating {
            AuthPhase::Authenticating
        } else if self.access_token.is_some() {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Anonymous
        }
    }
}

/// Hook run when the session is torn down, so dependent caches can clear.
pub type ResetHook = Box<dyn Fn() + Send + Sync>;

/// Service owning the session and the authenticated-request primitive.
///
/// Login and refresh share one mutex so concurrent authentication attempts
/// are serialized; a task that waited on the mutex re-checks whether the
/// token it saw fail is already stale and reuses the winner's token instead
/// of refreshing again.
pub struct SessionStore {
    api: ApiClient,
    storage: Arc<dyn TokenStore>,
    state: RwLock<Session>,
    /// Serializes login and refresh. Never taken by `logout`, which makes it
    /// safe for a failed refresh to force a logout while holding this lock.
    auth_lock: Mutex<()>,
    reset_hooks: RwLock<Vec<ResetHook>>,
}

impl SessionStore {
    /// Create a session store over the given transport and token slot.
    pub fn new(api: ApiClient, storage: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            storage,
            state: RwLock::new(Session::default()),
            auth_lock: Mutex::new(()),
            reset_hooks: RwLock::new(Vec::new()),
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────────

    /// Snapshot of the full session state.
    pub fn session(&self) -> Session {
        self.read_state(|s| s.clone())
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> AuthPhase {
        self.read_state(|s| s.phase())
    }

    /// Current bearer token, if any.
    pub fn access_token(&self) -> Option<String> {
        self.read_state(|s| s.access_token.clone())
    }

    /// Profile of the logged-in user, if fetched.
    pub fn current_user(&self) -> Option<UserProfile> {
        self.read_state(|s| s.current_user.clone())
    }

    /// Most recent store-level error.
    pub fn last_error(&self) -> Option<ErrorDetail> {
        self.read_state(|s| s.last_error.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state(|s| s.access_token.is_some())
    }

    /// Dismiss the global error banner.
    pub fn clear_error(&self) {
        self.with_state(|s| s.last_error = None);
    }

    /// Register a hook run on every logout (collection caches clear here).
    pub fn register_reset_hook(&self, hook: ResetHook) {
        self.reset_hooks.write().unwrap().push(hook);
    }

    // ─── Lifecycle operations ────────────────────────────────────────────────

    /// Restore the session from the durable token slot.
    ///
    /// Returns `Ok(true)` when a stored token was accepted (one transparent
    /// refresh may have happened along the way). A missing token is a no-op
    /// with no network calls; a rejected token clears the slot and leaves the
    /// session anonymous. Neither path surfaces an error to the user.
    pub async fn restore(&self) -> Result<bool> {
        let stored = self.storage.load().map_err(ApiError::Internal)?;
        let Some(token) = stored else {
            tracing::debug!("No stored access token, staying anonymous");
            return Ok(false);
        };

        self.with_state(|s| {
            s.access_token = Some(token);
            s.authenticating = true;
        });

        match self.fetch_current_user().await {
            Ok(user) => {
                self.with_state(|s| s.authenticating = false);
                tracing::info!(username = %user.username, "Session restored from stored token");
                Ok(true)
            }
            Err(err) => {
                // A rejected refresh along the way has already run the full
                // logout; either way the restore itself only resets locally.
                tracing::info!(error = %err, "Stored token rejected, clearing session");
                self.clear_local_session();
                Ok(false)
            }
        }
    }

    /// Authenticate with username and password.
    ///
    /// On success the access token is stored durably and in memory and the
    /// current user is fetched. Failures are recorded in `last_error` and
    /// returned. `authenticating` is set for exactly the duration of the
    /// call on every exit path.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        self.with_state(|s| {
            s.authenticating = true;
            s.last_error = None;
        });

        let result = self.login_inner(username, password).await;

        if let Err(err) = &result {
            self.record_error(err);
        }
        self.with_state(|s| s.authenticating = false);
        result
    }

    async fn login_inner(&self, username: &str, password: &str) -> Result<()> {
        {
            let _guard = self.auth_lock.lock().await;
            let grant = self.api.login(username, password).await?;
            self.storage
                .store(&grant.access_token)
                .map_err(ApiError::Internal)?;
            self.with_state(|s| s.access_token = Some(grant.access_token));
            tracing::info!(username, "Login succeeded");
        }

        // The profile fetch may itself refresh, which takes the auth lock,
        // so it runs after the guard is released.
        self.fetch_current_user().await?;
        Ok(())
    }

    /// Create a new account. Does not authenticate; callers log in after.
    pub async fn register(&self, payload: &RegisterUser) -> Result<UserProfile> {
        self.with_state(|s| {
            s.authenticating = true;
            s.last_error = None;
        });

        let result = self.api.register(payload).await;

        match &result {
            Ok(user) => tracing::info!(username = %user.username, "Account registered"),
            Err(err) => self.record_error(err),
        }
        self.with_state(|s| s.authenticating = false);
        result
    }

    /// Mint a new access token from the refresh cookie.
    ///
    /// A server rejection is fatal: the session is torn down before the
    /// error is returned, and the call is never retried.
    pub async fn refresh_access_token(&self) -> Result<String> {
        let _guard = self.auth_lock.lock().await;
        self.refresh_locked().await
    }

    /// Refresh with the auth lock already held.
    async fn refresh_locked(&self) -> Result<String> {
        match self.api.refresh().await {
            Ok(grant) => {
                self.storage
                    .store(&grant.access_token)
                    .map_err(ApiError::Internal)?;
                self.with_state(|s| s.access_token = Some(grant.access_token.clone()));
                tracing::debug!("Access token refreshed");
                Ok(grant.access_token)
            }
            Err(err) => {
                if err.is_session_expired() {
                    tracing::info!(error = %err, "Refresh rejected, ending session");
                    self.logout().await;
                }
                Err(err)
            }
        }
    }

    /// Refresh unless another task already did while we waited on the lock.
    async fn refresh_if_stale(&self, stale_token: &str) -> Result<String> {
        let _guard = self.auth_lock.lock().await;

        if let Some(current) = self.access_token() {
            if current != stale_token {
                return Ok(current);
            }
        }

        self.refresh_locked().await
    }

    /// The gateway for every protected endpoint.
    ///
    /// Attaches the bearer token; on a 401 performs exactly one refresh and
    /// one retry with the new token. A second 401 classifies like any other
    /// failure and is returned to the caller. This is the only retry policy
    /// in the client.
    pub async fn auth_fetch<T: for<'de> Deserialize<'de>>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let token = self
            .access_token()
            .ok_or_else(|| ApiError::Auth("Not authenticated".to_string()))?;

        let response = self
            .api
            .send_authed(method.clone(), path, query, body.as_ref(), &token)
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return self.api.check_response_json(response).await;
        }

        tracing::debug!(path, "Got 401, refreshing access token and retrying once");
        let fresh = self.refresh_if_stale(&token).await?;

        let response = self
            .api
            .send_authed(method, path, query, body.as_ref(), &fresh)
            .await?;

        self.api.check_response_json(response).await
    }

    /// Tear down the session. Infallible.
    ///
    /// Ordering: durable slot first (so a crash cannot resurrect the
    /// session), then in-memory state and dependent caches, then a
    /// best-effort server notification whose failure is only logged.
    pub async fn logout(&self) {
        let had_session = self.clear_local_session();

        if let Err(e) = self.api.logout().await {
            tracing::warn!(error = %e, "Server logout failed, continuing anyway");
        }

        if had_session {
            tracing::info!("Logged out");
        }
    }

    /// Clear the durable slot, the in-memory session, and dependent caches.
    /// Returns whether a token was held. Idempotent.
    fn clear_local_session(&self) -> bool {
        if let Err(e) = self.storage.clear() {
            tracing::warn!(error = %e, "Failed to clear stored token, continuing anyway");
        }

        let had_session = self.with_state(|s| {
            let had = s.access_token.is_some();
            *s = Session::default();
            had
        });

        for hook in self.reset_hooks.read().unwrap().iter() {
            hook();
        }

        had_session
    }

    // ─── Profile ─────────────────────────────────────────────────────────────

    /// Fetch `/users/me` and cache the profile in the session.
    pub async fn fetch_current_user(&self) -> Result<UserProfile> {
        let user: UserProfile = self
            .auth_fetch(Method::GET, "/users/me", &[], None)
            .await?;
        self.with_state(|s| s.current_user = Some(user.clone()));
        Ok(user)
    }

    /// Partial profile update.
    ///
    /// The server acknowledges without echoing the record, so the supplied
    /// fields are merged into the cached profile on success. Failures are
    /// recorded and returned.
    pub async fn update_profile(&self, patch: &ProfileUpdate) -> Result<()> {
        let body = api::json_body(patch)?;
        let result: Result<MessageResponse> = self
            .auth_fetch(Method::PUT, "/users/update", &[], Some(body))
            .await;

        match result {
            Ok(ack) => {
                self.with_state(|s| {
                    if let Some(user) = s.current_user.as_mut() {
                        if let Some(username) = &patch.username {
                            user.username = username.clone();
                        }
                        if let Some(full_name) = &patch.full_name {
                            user.full_name = Some(full_name.clone());
                        }
                        if let Some(email) = &patch.email {
                            user.email = Some(email.clone());
                        }
                    }
                    s.last_error = None;
                });
                tracing::debug!(message = %ack.message, "Profile updated");
                Ok(())
            }
            Err(err) => {
                self.record_error(&err);
                Err(err)
            }
        }
    }

    // ─── State helpers (guards never cross an await) ─────────────────────────

    fn read_state<T>(&self, f: impl FnOnce(&Session) -> T) -> T {
        f(&self.state.read().unwrap())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        f(&mut self.state.write().unwrap())
    }

    /// Store an error for the global banner. Collections record here too;
    /// there is one error slot for the whole client.
    pub(crate) fn record_error(&self, err: &ApiError) {
        self.with_state(|s| s.last_error = Some(ErrorDetail::from(err)));
    }
}
