// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! IssueHub client: session and data access for the IssueHub admin API
//!
//! This crate provides the client-side core for an IssueHub deployment:
//! token lifecycle with transparent refresh, and paginated project/ticket
//! collections that stay reconciled with the server.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod time_utils;

pub use config::Config;
pub use error::{ApiError, ErrorDetail, Result};
pub use services::{AuthPhase, ProjectCollection, Session, SessionStore, TicketCollection};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};

// Callers pass HTTP methods straight through to `SessionStore::auth_fetch`.
pub use reqwest::Method;

use services::view::{self, DashboardCounts};
use services::ApiClient;
use std::sync::Arc;

/// The assembled client: one session plus the collections that depend on it.
///
/// Wiring is one-way. Collections read the session for tokens and report
/// errors into it; the session only reaches back through reset hooks
/// registered here, so logging out empties every cached page.
pub struct IssueHub {
    api: ApiClient,
    session: Arc<SessionStore>,
    projects: ProjectCollection,
    tickets: TicketCollection,
}

impl IssueHub {
    /// Assemble a client against `config.api_url` with the given token storage.
    pub fn new(config: &Config, storage: Arc<dyn TokenStore>) -> Result<Self> {
        let api = ApiClient::new(&config.api_url)?;
        let session = Arc::new(SessionStore::new(api.clone(), storage));

        let projects = ProjectCollection::new(Arc::clone(&session));
        let tickets = TicketCollection::new(Arc::clone(&session));

        let hook = projects.clone();
        session.register_reset_hook(Box::new(move || hook.clear()));
        let hook = tickets.clone();
        session.register_reset_hook(Box::new(move || hook.clear()));

        Ok(Self {
            api,
            session,
            projects,
            tickets,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn projects(&self) -> &ProjectCollection {
        &self.projects
    }

    pub fn tickets(&self) -> &TicketCollection {
        &self.tickets
    }

    /// Restore a previous session from durable storage, then load the
    /// default page of each collection. Returns whether a session was
    /// restored; a stored token the server rejects yields `Ok(false)`.
    pub async fn restore(&self) -> Result<bool> {
        let restored = self.session.restore().await?;
        if restored {
            self.load_initial_pages().await;
        }
        Ok(restored)
    }

    /// Log in and load the default page of each collection.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        self.session.login(username, password).await?;
        self.load_initial_pages().await;
        Ok(())
    }

    /// Log out. Cached pages empty via the reset hooks.
    pub async fn logout(&self) {
        self.session.logout().await;
    }

    /// Check API liveness without credentials.
    pub async fn health(&self) -> Result<services::HealthStatus> {
        self.api.health().await
    }

    /// Stat-card numbers over the currently cached pages.
    pub fn dashboard_counts(&self) -> DashboardCounts {
        view::dashboard_counts(&self.projects.items(), &self.tickets.items())
    }

    // A failed initial load is not a failed login; the error is already
    // recorded on the session for display.
    async fn load_initial_pages(&self) {
        // The futures borrow the queries across the join, so the queries
        // need homes that outlive it.
        let project_query = self.projects.last_query();
        let ticket_query = self.tickets.last_query();
        let (projects, tickets) = tokio::join!(
            self.projects.fetch(&project_query),
            self.tickets.fetch(&ticket_query),
        );
        if let Err(err) = projects {
            tracing::warn!(error = %err, "Initial project load failed");
        }
        if let Err(err) = tickets {
            tracing::warn!(error = %err, "Initial ticket load failed");
        }
    }
}
