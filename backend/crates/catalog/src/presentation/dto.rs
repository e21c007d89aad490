//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::pet::Pet;
use crate::domain::value_object::pet_status::PetStatus;

// ============================================================================
// Create pet
// ============================================================================

/// Create pet request
///
/// Carries no status field; new listings are always available.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub pet_type: String,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<f64>,
    pub behavior: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// Create pet response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetResponse {
    pub message: String,
    pub pet_id: String,
}

// ============================================================================
// Pet projection
// ============================================================================

/// Pet record as returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<f64>,
    pub behavior: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub status: PetStatus,
    pub adopted_by: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Pet> for PetResponse {
    fn from(pet: &Pet) -> Self {
        Self {
            id: *pet.pet_id.as_uuid(),
            name: pet.name.clone(),
            pet_type: pet.pet_type.code().to_string(),
            species: pet.species.clone(),
            breed: pet.breed.clone(),
            age: pet.age,
            behavior: pet.behavior.clone(),
            image: pet.image.clone(),
            description: pet.description.clone(),
            status: pet.status,
            adopted_by: pet.adopted_by.as_ref().map(|id| *id.as_uuid()),
            created_at: pet.created_at,
            updated_at: pet.updated_at,
        }
    }
}

// ============================================================================
// Adopt
// ============================================================================

/// Adopt response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptResponse {
    pub message: String,
    pub pet: PetResponse,
}
