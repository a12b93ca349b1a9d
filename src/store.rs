//! In-memory user store.
//!
//! The store owns every [`User`] for the lifetime of the process. The map and
//! the next-identifier counter live behind one mutex so a `create` can never
//! interleave with another `create`, and readers always see a consistent
//! snapshot.

use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;
use tracing::{error, info};

use crate::models::User;
use crate::validator::{is_valid_email, is_valid_name, MAX_NAME_CHARS, MIN_NAME_CHARS};

/// Why a `create` call was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Name length is outside the accepted character range.
    InvalidName,
    /// Email does not have the `local@domain.tld` shape.
    InvalidEmail,
}

impl ValidationError {
    /// Name of the rejected field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidName => "name",
            ValidationError::InvalidEmail => "email",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidName => write!(
                f,
                "invalid name: must be between {MIN_NAME_CHARS} and {MAX_NAME_CHARS} characters"
            ),
            ValidationError::InvalidEmail => write!(f, "invalid email format"),
        }
    }
}

impl std::error::Error for ValidationError {}

struct Inner {
    users: HashMap<u64, User>,
    next_id: u64,
}

/// Identifier-keyed collection of users with validated creation.
pub struct UserStore {
    inner: Mutex<Inner>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    /// Create an empty store whose first identifier will be `1`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                users: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Validate and insert a new user.
    ///
    /// The name is checked before the email. On failure nothing is mutated
    /// and the counter does not advance.
    pub fn create(&self, name: &str, email: &str) -> Result<User, ValidationError> {
        if !is_valid_name(name) {
            error!(name = %name, "Invalid name provided");
            return Err(ValidationError::InvalidName);
        }
        if !is_valid_email(email) {
            error!(email = %email, "Invalid email provided");
            return Err(ValidationError::InvalidEmail);
        }

        let user = {
            let mut inner = self.inner.lock();
            let id = inner.next_id;
            let user = User::new(id, name, email);
            inner.users.insert(id, user.clone());
            inner.next_id += 1;
            user
        };

        info!(user_id = user.id, "User created successfully");
        Ok(user)
    }

    /// Look up a user by identifier.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<User> {
        self.inner.lock().users.get(&id).cloned()
    }

    /// All stored users, ordered by identifier.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        let mut users: Vec<User> = self.inner.lock().users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        users
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
