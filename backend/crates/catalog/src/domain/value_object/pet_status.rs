//! Pet Status Value Object
//!
//! The transition available → adopted is monotonic; nothing in this
//! system moves a pet back.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum PetStatus {
    #[default]
    Available = 0,
    Adopted = 1,
}

impl PetStatus {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            PetStatus::Available => "available",
            PetStatus::Adopted => "adopted",
        }
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(PetStatus::Available),
            1 => Some(PetStatus::Adopted),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_available(&self) -> bool {
        matches!(self, PetStatus::Available)
    }
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
