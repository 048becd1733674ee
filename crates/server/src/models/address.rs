//! Address domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use lamore_core::{AddressId, UserId};

/// A delivery address owned by a single user.
///
/// At most one address per user has `is_default` set; the repository clears
/// the others whenever a default is written.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub recipient_name: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

impl Address {
    /// Whether the address belongs to the given user.
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}
