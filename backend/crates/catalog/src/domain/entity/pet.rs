//! Pet Entity
//!
//! A catalog listing. Created by an admin, mutated exactly once: when a
//! user adopts it. Status never moves back from adopted.

use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};
use kernel::id::PetId;

use crate::domain::value_object::{pet_status::PetStatus, pet_type::PetType};

/// Attributes accepted at listing creation
///
/// Deliberately has no status field: a new listing is always available.
#[derive(Debug, Clone)]
pub struct NewPet {
    pub name: String,
    pub pet_type: PetType,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<f64>,
    pub behavior: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// Pet entity
#[derive(Debug, Clone)]
pub struct Pet {
    pub pet_id: PetId,
    pub name: String,
    pub pet_type: PetType,
    pub species: Option<String>,
    pub breed: Option<String>,
    /// Age in years; fractional values represent sub-year ages
    pub age: Option<f64>,
    pub behavior: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub status: PetStatus,
    /// Back-reference to the adopting user, set exactly once
    pub adopted_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// Create a new listing; status is forced to available
    pub fn new(attrs: NewPet) -> Self {
        let now = Utc::now();

        Self {
            pet_id: PetId::new(),
            name: attrs.name,
            pet_type: attrs.pet_type,
            species: attrs.species,
            breed: attrs.breed,
            age: attrs.age,
            behavior: attrs.behavior,
            image: attrs.image,
            description: attrs.description,
            status: PetStatus::Available,
            adopted_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }

    /// Record the adoption; callers must have checked availability under
    /// whatever atomicity the store provides
    pub fn mark_adopted(&mut self, adopter: UserId, at: DateTime<Utc>) {
        self.status = PetStatus::Adopted;
        self.adopted_by = Some(adopter);
        self.updated_at = at;
    }
}
