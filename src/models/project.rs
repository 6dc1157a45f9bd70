// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Project model and write payloads.

use serde::{Deserialize, Serialize};

/// Project record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Server-assigned project ID
    pub id: i64,
    /// Owning user ID
    pub owner_id: i64,
    /// Unique project name
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Creation time (ISO 8601)
    pub created_at: Option<String>,
    /// Last modification time (ISO 8601)
    pub updated_at: Option<String>,
}

/// Creation payload for `POST /projects`.
#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update payload for `PUT /projects/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
