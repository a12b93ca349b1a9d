use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered person.
///
/// Instances are only minted by [`crate::store::UserStore::create`]; the
/// identifier and creation timestamp never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}
