//! List query parameters and paged responses.

use serde::{Deserialize, Serialize};

use super::{TicketPriority, TicketStatus};

/// Sort order for list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Wire string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pagination, sort, and filter parameters for one list request.
///
/// Rebuilt per request; the active filters live in UI state, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    /// Zero-based page index
    pub page: u32,
    /// Page size (server caps at 100)
    pub limit: u32,
    /// Column to sort by, from the server's whitelist
    pub sort_field: String,
    pub sort_direction: SortDirection,
    /// Substring search; empty means no filter
    pub search: Option<String>,
    /// Ticket status filter; `None` means "all"
    pub status: Option<TicketStatus>,
    /// Ticket priority filter; `None` means "all"
    pub priority: Option<TicketPriority>,
    /// Restrict tickets to one project
    pub project_id: Option<i64>,
}

impl QuerySpec {
    /// Default projects listing: first page of five, oldest first.
    pub fn projects() -> Self {
        Self {
            page: 0,
            limit: 5,
            sort_field: "id".to_string(),
            sort_direction: SortDirection::Asc,
            search: None,
            status: None,
            priority: None,
            project_id: None,
        }
    }

    /// Default tickets listing: first page of ten, newest first.
    pub fn tickets() -> Self {
        Self {
            page: 0,
            limit: 10,
            sort_field: "id".to_string(),
            sort_direction: SortDirection::Desc,
            search: None,
            status: None,
            priority: None,
            project_id: None,
        }
    }

    /// Build the query string pairs, omitting empty search and "all" filters.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("sort_field", self.sort_field.clone()),
            ("sort_direction", self.sort_direction.to_string()),
        ];

        if let Some(search) = self.search.as_deref() {
            if !search.is_empty() {
                params.push(("search", search.to_string()));
            }
        }
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        if let Some(priority) = self.priority {
            params.push(("priority", priority.to_string()));
        }
        if let Some(project_id) = self.project_id {
            params.push(("project_id", project_id.to_string()));
        }

        params
    }
}

/// One page of records plus the total across the full filtered set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    /// Current page only, never cumulative
    pub items: Vec<T>,
    /// Server-reported count over all pages
    pub total: u64,
}

// Not derived: the empty page must not require `T: Default`.
impl<T> Default for PagedResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}
