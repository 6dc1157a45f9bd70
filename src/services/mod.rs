// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - session, data access, and page shaping.

pub mod api;
pub mod collection;
pub mod session;
pub mod view;

pub use api::{ApiClient, HealthStatus, TokenResponse};
pub use collection::{ProjectCollection, Resource, ResourceCollection, TicketCollection};
pub use session::{AuthPhase, ResetHook, Session, SessionStore};
pub use view::{
    dashboard_counts, filter_projects, filter_tickets, sort_projects, sort_tickets,
    DashboardCounts, ProjectSortField, TicketSortField,
};
