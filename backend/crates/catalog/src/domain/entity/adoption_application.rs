//! Adoption Application Entity
//!
//! A user's request to adopt a specific pet. The record is fully
//! modeled and persisted, but no HTTP operation creates or reviews one;
//! the approve/reject workflow is reserved for future extension.

use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};
use kernel::id::{AdoptionApplicationId, PetId};

use crate::domain::value_object::application_status::ApplicationStatus;

/// Adoption application entity
#[derive(Debug, Clone)]
pub struct AdoptionApplication {
    pub application_id: AdoptionApplicationId,
    /// Applicant; must reference an existing user
    pub user_id: UserId,
    /// Requested pet; must reference an existing pet
    pub pet_id: PetId,
    pub status: ApplicationStatus,
    pub message: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdoptionApplication {
    /// Create a new pending application
    pub fn new(user_id: UserId, pet_id: PetId, message: Option<String>) -> Self {
        let now = Utc::now();

        Self {
            application_id: AdoptionApplicationId::new(),
            user_id,
            pet_id,
            status: ApplicationStatus::Pending,
            message,
            applied_at: now,
            approved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }

    /// Approve the application and stamp the approval time
    pub fn approve(&mut self) {
        let now = Utc::now();
        self.status = ApplicationStatus::Approved;
        self.approved_at = Some(now);
        self.updated_at = now;
    }

    /// Reject the application
    pub fn reject(&mut self) {
        self.status = ApplicationStatus::Rejected;
        self.updated_at = Utc::now();
    }
}
