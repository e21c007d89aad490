//! Adopt Pet Use Case
//!
//! The one multi-step business transition: available → adopted, tied to
//! the authenticated caller. Adoption is not idempotent; a second
//! attempt by anyone, including the original adopter, is rejected.

use std::sync::Arc;

use auth::domain::value_object::user_id::UserId;
use chrono::Utc;
use kernel::id::PetId;

use crate::domain::entity::pet::Pet;
use crate::domain::repository::PetRepository;
use crate::error::{CatalogError, CatalogResult};

/// Adopt pet use case
pub struct AdoptPetUseCase<P>
where
    P: PetRepository,
{
    repo: Arc<P>,
}

impl<P> AdoptPetUseCase<P>
where
    P: PetRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, pet_id: PetId, adopter: UserId) -> CatalogResult<Pet> {
        // The conditional update is the whole concurrency story: under
        // two racing requests for the same pet, the store lets exactly
        // one through.
        if let Some(pet) = self
            .repo
            .adopt_if_available(&pet_id, &adopter, Utc::now())
            .await?
        {
            tracing::info!(
                pet_id = %pet.pet_id,
                adopter = %adopter,
                "Pet adopted"
            );
            return Ok(pet);
        }

        // Nothing changed: the pet is either absent or already taken.
        match self.repo.find_by_id(&pet_id).await? {
            None => Err(CatalogError::PetNotFound),
            Some(_) => Err(CatalogError::AlreadyAdopted),
        }
    }
}
