// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Ticket model, workflow enums, and write payloads.

use serde::{Deserialize, Serialize};

/// Ticket record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Server-assigned ticket ID
    pub id: i64,
    /// Creating user ID
    pub owner_id: i64,
    /// Short summary line
    pub title: String,
    /// Free-form description
    pub description: Option<String>,
    /// Workflow state
    pub status: TicketStatus,
    /// Triage priority
    pub priority: TicketPriority,
    /// Parent project ID
    pub project_id: i64,
    /// Assignee user ID, if assigned
    pub assigned_to_id: Option<i64>,
    /// Creation time (ISO 8601)
    pub created_at: Option<String>,
    /// Last modification time (ISO 8601)
    pub updated_at: Option<String>,
}

/// Ticket workflow state.
///
/// `Unknown` absorbs values outside the current vocabulary (legacy rows)
/// so a list fetch never fails on one odd record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Pending,
    Closed,
    #[serde(other)]
    Unknown,
}

impl TicketStatus {
    /// Wire string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Pending => "pending",
            Self::Closed => "closed",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket triage priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

impl TicketPriority {
    /// Wire string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unknown => "unknown",
        }
    }

    /// Ordinal weight for sorting: high outranks medium outranks low.
    /// Unrecognized values sort last.
    pub fn weight(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Unknown => 0,
        }
    }
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creation payload for `POST /tickets`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTicket {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    pub project_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<i64>,
}

/// Partial update payload for `PUT /tickets/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<i64>,
}
