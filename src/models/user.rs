//! User profile and account payloads.

use serde::{Deserialize, Serialize};

/// Current user as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Server-assigned user ID
    pub id: i64,
    /// Unique login name
    pub username: String,
    /// Display name (may be absent)
    pub full_name: Option<String>,
    /// Contact email (may be absent)
    pub email: Option<String>,
    /// Whether the account is enabled
    pub is_active: bool,
}

impl UserProfile {
    /// Name shown in the top bar: full name when set, username otherwise.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

/// Registration payload for `POST /users`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterUser {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Partial profile update for `PUT /users/update`.
///
/// Unset fields are omitted from the body and left untouched server-side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
