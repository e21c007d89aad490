//! Display Name Value Object

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum display name length
const NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayNameError {
    #[error("Name is required")]
    Empty,

    #[error("Name must be at most {NAME_MAX_LENGTH} characters")]
    TooLong,
}

/// A user's display name: trimmed, non-empty free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: impl Into<String>) -> Result<Self, DisplayNameError> {
        let name = name.into().trim().to_string();

        if name.is_empty() {
            return Err(DisplayNameError::Empty);
        }

        if name.chars().count() > NAME_MAX_LENGTH {
            return Err(DisplayNameError::TooLong);
        }

        Ok(Self(name))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
