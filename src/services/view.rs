// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side filtering, sorting, and dashboard summaries for cached pages.
//!
//! These helpers shape a page that has already been fetched. They never
//! talk to the server; authoritative pagination, sorting, and search belong
//! to [`QuerySpec`](crate::models::QuerySpec).

use crate::models::{Project, SortDirection, Ticket, TicketStatus};
use crate::time_utils::timestamp_millis;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Column a project table can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectSortField {
    #[default]
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

/// Column a ticket table can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TicketSortField {
    #[default]
    Id,
    Title,
    Project,
    Status,
    Priority,
}

/// Headline numbers for the dashboard, computed over the cached pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub total_projects: usize,
    pub total_tickets: usize,
    pub open_tickets: usize,
}

/// Projects whose name or description contains `query`, case-insensitively.
///
/// A blank query keeps every row.
pub fn filter_projects<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return projects.iter().collect();
    }
    projects
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&q)
                || p.description
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(&q)
        })
        .collect()
}

/// Tickets whose title, description, or project name contains `query`,
/// case-insensitively. Project names are resolved against `projects`;
/// a ticket whose project is not cached matches on its own fields only.
pub fn filter_tickets<'a>(
    tickets: &'a [Ticket],
    projects: &[Project],
    query: &str,
) -> Vec<&'a Ticket> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return tickets.iter().collect();
    }
    tickets
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&q)
                || t.description
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(&q)
                || project_name(projects, t.project_id)
                    .to_lowercase()
                    .contains(&q)
        })
        .collect()
}

/// Sort a page of projects in place.
///
/// Timestamp columns compare parsed milliseconds, so rows with a missing
/// timestamp sort as the epoch.
pub fn sort_projects<P: Borrow<Project>>(
    rows: &mut [P],
    field: ProjectSortField,
    direction: SortDirection,
) {
    rows.sort_by(|a, b| {
        let (a, b) = (a.borrow(), b.borrow());
        let ord = match field {
            ProjectSortField::Id => a.id.cmp(&b.id),
            ProjectSortField::Name => a.name.cmp(&b.name),
            ProjectSortField::CreatedAt => timestamp_millis(a.created_at.as_deref())
                .cmp(&timestamp_millis(b.created_at.as_deref())),
            ProjectSortField::UpdatedAt => timestamp_millis(a.updated_at.as_deref())
                .cmp(&timestamp_millis(b.updated_at.as_deref())),
        };
        apply_direction(ord, direction)
    });
}

/// Sort a page of tickets in place.
///
/// The project column compares resolved project names; priority compares
/// ordinal weight rather than the label text.
pub fn sort_tickets<T: Borrow<Ticket>>(
    rows: &mut [T],
    projects: &[Project],
    field: TicketSortField,
    direction: SortDirection,
) {
    rows.sort_by(|a, b| {
        let (a, b) = (a.borrow(), b.borrow());
        let ord = match field {
            TicketSortField::Id => a.id.cmp(&b.id),
            TicketSortField::Title => a.title.cmp(&b.title),
            TicketSortField::Project => {
                project_name(projects, a.project_id).cmp(project_name(projects, b.project_id))
            }
            TicketSortField::Status => a.status.as_str().cmp(b.status.as_str()),
            TicketSortField::Priority => a.priority.weight().cmp(&b.priority.weight()),
        };
        apply_direction(ord, direction)
    });
}

/// Stat-card numbers over whatever pages are currently cached.
pub fn dashboard_counts(projects: &[Project], tickets: &[Ticket]) -> DashboardCounts {
    DashboardCounts {
        total_projects: projects.len(),
        total_tickets: tickets.len(),
        open_tickets: tickets
            .iter()
            .filter(|t| t.status == TicketStatus::Open)
            .count(),
    }
}

fn apply_direction(ord: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

fn project_name<'a>(projects: &'a [Project], id: i64) -> &'a str {
    projects
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.name.as_str())
        .unwrap_or("")
}
