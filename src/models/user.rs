use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// The public view of a registered account.
///
/// The credential hash lives beside this record inside the store and is never
/// part of anything that gets serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}
