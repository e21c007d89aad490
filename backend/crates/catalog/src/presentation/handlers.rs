//! HTTP Handlers
//!
//! The auth and role gates run as route middleware (see the router);
//! handlers read the identity they attached to the request extensions.

use axum::Json;
use axum::extract::{Extension, Path, State};
use std::sync::Arc;

use auth::application::token::TokenClaims;
use auth::domain::value_object::user_id::UserId;
use auth::presentation::middleware::CurrentUser;
use kernel::id::PetId;

use crate::application::{AdoptPetUseCase, CreatePetInput, CreatePetUseCase, ListPetsUseCase};
use crate::domain::repository::PetRepository;
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{AdoptResponse, CreatePetRequest, CreatePetResponse, PetResponse};

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<P>
where
    P: PetRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<P>,
}

// ============================================================================
// List pets
// ============================================================================

/// GET /api/pets
pub async fn list_pets<P>(
    State(state): State<CatalogAppState<P>>,
) -> CatalogResult<Json<Vec<PetResponse>>>
where
    P: PetRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListPetsUseCase::new(state.repo.clone());
    let pets = use_case.execute().await?;

    Ok(Json(pets.iter().map(PetResponse::from).collect()))
}

// ============================================================================
// Create pet (admin)
// ============================================================================

/// POST /api/pets
pub async fn create_pet<P>(
    State(state): State<CatalogAppState<P>>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    Json(req): Json<CreatePetRequest>,
) -> CatalogResult<Json<CreatePetResponse>>
where
    P: PetRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreatePetUseCase::new(state.repo.clone());

    let input = CreatePetInput {
        name: req.name,
        pet_type: req.pet_type,
        species: req.species,
        breed: req.breed,
        age: req.age,
        behavior: req.behavior,
        image: req.image,
        description: req.description,
    };

    let output = use_case.execute(input).await?;

    tracing::debug!(admin = %admin.user_id, pet_id = %output.pet_id, "Listing created by admin");

    Ok(Json(CreatePetResponse {
        message: "Pet created successfully".to_string(),
        pet_id: output.pet_id,
    }))
}

// ============================================================================
// Adopt pet
// ============================================================================

/// POST /api/pets/{id}/adopt
pub async fn adopt_pet<P>(
    State(state): State<CatalogAppState<P>>,
    Extension(claims): Extension<TokenClaims>,
    Path(id): Path<String>,
) -> CatalogResult<Json<AdoptResponse>>
where
    P: PetRepository + Clone + Send + Sync + 'static,
{
    // An unparsable id cannot reference any record.
    let pet_id = PetId::parse(&id).map_err(|_| CatalogError::PetNotFound)?;
    let adopter = UserId::from_uuid(claims.id);

    let use_case = AdoptPetUseCase::new(state.repo.clone());
    let pet = use_case.execute(pet_id, adopter).await?;

    Ok(Json(AdoptResponse {
        message: "Pet adopted successfully!".to_string(),
        pet: PetResponse::from(&pet),
    }))
}
