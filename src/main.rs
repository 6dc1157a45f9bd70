// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! IssueHub smoke client
//!
//! Signs in against a running IssueHub API (restoring a stored session when
//! one exists), loads the default project and ticket pages, and logs a
//! dashboard summary. Useful for checking a deployment end to end.

use issuehub_client::{
    config::Config,
    storage::{FileTokenStore, TokenStore},
    IssueHub,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(api_url = %config.api_url, "Starting IssueHub client");

    // Durable token storage, next to the user's other config by default
    let storage: Arc<dyn TokenStore> = match &config.token_file {
        Some(path) => Arc::new(FileTokenStore::with_path(path.clone())),
        None => Arc::new(FileTokenStore::new().expect("Failed to resolve token path")),
    };

    let hub = IssueHub::new(&config, storage).expect("Failed to build API client");

    let health = hub.health().await?;
    tracing::info!(status = %health.status, "API reachable");

    // Prefer the stored session; fall back to configured credentials
    if hub.restore().await? {
        tracing::info!("Restored previous session");
    } else if let Some((username, password)) = config.credentials() {
        hub.login(username, password).await?;
        tracing::info!(username, "Logged in");
    } else {
        tracing::warn!("No stored session and no credentials configured");
        return Ok(());
    }

    if let Some(user) = hub.session().current_user() {
        tracing::info!(user = %user.display_name(), "Signed in");
    }

    let counts = hub.dashboard_counts();
    tracing::info!(
        projects_on_page = counts.total_projects,
        tickets_on_page = counts.total_tickets,
        open_tickets = counts.open_tickets,
        project_total = hub.projects().total(),
        ticket_total = hub.tickets().total(),
        "Dashboard summary"
    );

    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("issuehub_client=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
