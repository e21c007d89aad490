//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};
use kernel::id::{AdoptionApplicationId, PetId};

use crate::domain::entity::{adoption_application::AdoptionApplication, pet::Pet};
use crate::error::CatalogResult;

/// Catalog store: persists pet listings
#[trait_variant::make(PetRepository: Send)]
pub trait LocalPetRepository {
    /// Create a new listing
    async fn create(&self, pet: &Pet) -> CatalogResult<()>;

    /// Find a pet by ID
    async fn find_by_id(&self, pet_id: &PetId) -> CatalogResult<Option<Pet>>;

    /// The full collection, unfiltered and unpaginated
    async fn list_all(&self) -> CatalogResult<Vec<Pet>>;

    /// Atomically adopt the pet if it is still available
    ///
    /// A single conditional check-and-set: returns the updated record,
    /// or `None` when the pet is absent or no longer available. Under
    /// concurrent calls for the same pet, at most one caller gets
    /// `Some`. Must never be implemented as a plain read followed by an
    /// unconditional write.
    async fn adopt_if_available(
        &self,
        pet_id: &PetId,
        adopter: &UserId,
        at: DateTime<Utc>,
    ) -> CatalogResult<Option<Pet>>;
}

/// Application store: persists adoption applications
///
/// Write-mostly today; the review workflow is not exposed over HTTP.
#[trait_variant::make(AdoptionApplicationRepository: Send)]
pub trait LocalAdoptionApplicationRepository {
    /// Create a new application
    async fn create(&self, application: &AdoptionApplication) -> CatalogResult<()>;

    /// Find an application by ID
    async fn find_by_id(
        &self,
        application_id: &AdoptionApplicationId,
    ) -> CatalogResult<Option<AdoptionApplication>>;

    /// All applications submitted by a user, newest first
    async fn list_by_user(&self, user_id: &UserId) -> CatalogResult<Vec<AdoptionApplication>>;
}
