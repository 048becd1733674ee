//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lamore_core::{Email, UserId, UserRole};

/// A registered user (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Role gating the admin procedures.
    pub role: UserRole,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// Last successful login, if any.
    pub last_signed_in: Option<DateTime<Utc>>,
}

/// The caller identity kept in the session.
///
/// A trimmed copy of [`User`]; re-read from the session on every request by
/// the auth extractors, never from the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: UserRole,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}
