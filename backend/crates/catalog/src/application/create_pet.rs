//! Create Pet Use Case
//!
//! Admin-only listing creation. Every violated field constraint is
//! reported, and the new listing is always created available.

use std::sync::Arc;

use kernel::validation::Violations;

use crate::domain::entity::pet::{NewPet, Pet};
use crate::domain::repository::PetRepository;
use crate::domain::value_object::pet_type::PetType;
use crate::error::{CatalogError, CatalogResult};

/// Create pet input
pub struct CreatePetInput {
    pub name: String,
    /// Type code; must be one of [`PetType::CODES`]
    pub pet_type: String,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<f64>,
    pub behavior: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// Create pet output
#[derive(Debug)]
pub struct CreatePetOutput {
    pub pet_id: String,
}

/// Create pet use case
pub struct CreatePetUseCase<P>
where
    P: PetRepository,
{
    repo: Arc<P>,
}

impl<P> CreatePetUseCase<P>
where
    P: PetRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreatePetInput) -> CatalogResult<CreatePetOutput> {
        let mut violations = Violations::new();

        let name = input.name.trim().to_string();
        if name.is_empty() {
            violations.add("name", "Name is required");
        }

        let pet_type = PetType::from_code(&input.pet_type);
        if pet_type.is_none() {
            violations.add("type", "Invalid pet type");
        }

        // The data model permits fractional ages, but the creation API
        // accepts whole years only.
        if let Some(age) = input.age {
            if !age.is_finite() || age < 0.0 || age.fract() != 0.0 {
                violations.add("age", "Age must be a non-negative integer");
            }
        }

        violations.into_result(CatalogError::Validation)?;

        let Some(pet_type) = pet_type else {
            return Err(CatalogError::Internal(
                "Pet type missing after validation".to_string(),
            ));
        };

        // Pet::new forces status to available; a caller-supplied status
        // never reaches this point.
        let pet = Pet::new(NewPet {
            name,
            pet_type,
            species: input.species,
            breed: input.breed,
            age: input.age,
            behavior: input.behavior,
            image: input.image,
            description: input.description,
        });

        self.repo.create(&pet).await?;

        tracing::info!(
            pet_id = %pet.pet_id,
            pet_type = %pet.pet_type,
            "Pet listing created"
        );

        Ok(CreatePetOutput {
            pet_id: pet.pet_id.to_string(),
        })
    }
}
