//! User Entity
//!
//! Identity record backing registration, login, and the admin gate.
//! Users are immutable after creation in this system: there is no
//! profile edit or deletion flow.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier (also the public-facing id)
    pub user_id: UserId,
    /// Display name
    pub name: DisplayName,
    /// Unique, case-normalized email
    pub email: Email,
    /// Argon2id PHC hash; the plaintext never reaches this entity
    pub password_hash: UserPassword,
    /// Privilege marker for catalog management
    pub is_admin: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user; `is_admin` always starts false
    pub fn new(name: DisplayName, email: Email, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            password_hash,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }
}
