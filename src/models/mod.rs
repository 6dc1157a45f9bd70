// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the IssueHub API.

pub mod project;
pub mod query;
pub mod ticket;
pub mod user;

pub use project::{NewProject, Project, ProjectPatch};
pub use query::{PagedResult, QuerySpec, SortDirection};
pub use ticket::{NewTicket, Ticket, TicketPatch, TicketPriority, TicketStatus};
pub use user::{ProfileUpdate, RegisterUser, UserProfile};
