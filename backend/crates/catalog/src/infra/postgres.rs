//! PostgreSQL Repository Implementations

use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};
use kernel::id::{AdoptionApplicationId, PetId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{adoption_application::AdoptionApplication, pet::Pet};
use crate::domain::repository::{AdoptionApplicationRepository, PetRepository};
use crate::domain::value_object::{
    application_status::ApplicationStatus, pet_status::PetStatus, pet_type::PetType,
};
use crate::error::{CatalogError, CatalogResult};

/// PostgreSQL-backed catalog and application store
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Pet Repository Implementation
// ============================================================================

impl PetRepository for PgCatalogRepository {
    async fn create(&self, pet: &Pet) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO pets (
                pet_id,
                name,
                pet_type,
                species,
                breed,
                age,
                behavior,
                image,
                description,
                status,
                adopted_by,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(pet.pet_id.as_uuid())
        .bind(&pet.name)
        .bind(pet.pet_type.id())
        .bind(&pet.species)
        .bind(&pet.breed)
        .bind(pet.age)
        .bind(&pet.behavior)
        .bind(&pet.image)
        .bind(&pet.description)
        .bind(pet.status.id())
        .bind(pet.adopted_by.as_ref().map(|id| *id.as_uuid()))
        .bind(pet.created_at)
        .bind(pet.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, pet_id: &PetId) -> CatalogResult<Option<Pet>> {
        let row = sqlx::query_as::<_, PetRow>(
            r#"
            SELECT
                pet_id,
                name,
                pet_type,
                species,
                breed,
                age,
                behavior,
                image,
                description,
                status,
                adopted_by,
                created_at,
                updated_at
            FROM pets
            WHERE pet_id = $1
            "#,
        )
        .bind(pet_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_pet()).transpose()
    }

    async fn list_all(&self) -> CatalogResult<Vec<Pet>> {
        let rows = sqlx::query_as::<_, PetRow>(
            r#"
            SELECT
                pet_id,
                name,
                pet_type,
                species,
                breed,
                age,
                behavior,
                image,
                description,
                status,
                adopted_by,
                created_at,
                updated_at
            FROM pets
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_pet()).collect()
    }

    async fn adopt_if_available(
        &self,
        pet_id: &PetId,
        adopter: &UserId,
        at: DateTime<Utc>,
    ) -> CatalogResult<Option<Pet>> {
        // Single-statement check-and-set: the WHERE clause only matches
        // while the pet is still available, so concurrent callers race
        // on the row lock and exactly one sees a returned row.
        let row = sqlx::query_as::<_, PetRow>(
            r#"
            UPDATE pets SET
                status = $3,
                adopted_by = $4,
                updated_at = $5
            WHERE pet_id = $1 AND status = $2
            RETURNING
                pet_id,
                name,
                pet_type,
                species,
                breed,
                age,
                behavior,
                image,
                description,
                status,
                adopted_by,
                created_at,
                updated_at
            "#,
        )
        .bind(pet_id.as_uuid())
        .bind(PetStatus::Available.id())
        .bind(PetStatus::Adopted.id())
        .bind(adopter.as_uuid())
        .bind(at)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_pet()).transpose()
    }
}

// ============================================================================
// Adoption Application Repository Implementation
// ============================================================================

impl AdoptionApplicationRepository for PgCatalogRepository {
    async fn create(&self, application: &AdoptionApplication) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO adoption_applications (
                application_id,
                user_id,
                pet_id,
                status,
                message,
                applied_at,
                approved_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(application.application_id.as_uuid())
        .bind(application.user_id.as_uuid())
        .bind(application.pet_id.as_uuid())
        .bind(application.status.id())
        .bind(&application.message)
        .bind(application.applied_at)
        .bind(application.approved_at)
        .bind(application.created_at)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        application_id: &AdoptionApplicationId,
    ) -> CatalogResult<Option<AdoptionApplication>> {
        let row = sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT
                application_id,
                user_id,
                pet_id,
                status,
                message,
                applied_at,
                approved_at,
                created_at,
                updated_at
            FROM adoption_applications
            WHERE application_id = $1
            "#,
        )
        .bind(application_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_application()).transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> CatalogResult<Vec<AdoptionApplication>> {
        let rows = sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT
                application_id,
                user_id,
                pet_id,
                status,
                message,
                applied_at,
                approved_at,
                created_at,
                updated_at
            FROM adoption_applications
            WHERE user_id = $1
            ORDER BY applied_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_application()).collect()
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PetRow {
    pet_id: Uuid,
    name: String,
    pet_type: i16,
    species: Option<String>,
    breed: Option<String>,
    age: Option<f64>,
    behavior: Option<String>,
    image: Option<String>,
    description: Option<String>,
    status: i16,
    adopted_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PetRow {
    fn into_pet(self) -> CatalogResult<Pet> {
        let pet_type = PetType::from_id(self.pet_type)
            .ok_or_else(|| CatalogError::Internal(format!("Invalid pet type: {}", self.pet_type)))?;
        let status = PetStatus::from_id(self.status)
            .ok_or_else(|| CatalogError::Internal(format!("Invalid pet status: {}", self.status)))?;

        Ok(Pet {
            pet_id: PetId::from_uuid(self.pet_id),
            name: self.name,
            pet_type,
            species: self.species,
            breed: self.breed,
            age: self.age,
            behavior: self.behavior,
            image: self.image,
            description: self.description,
            status,
            adopted_by: self.adopted_by.map(UserId::from_uuid),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ApplicationRow {
    application_id: Uuid,
    user_id: Uuid,
    pet_id: Uuid,
    status: i16,
    message: Option<String>,
    applied_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ApplicationRow {
    fn into_application(self) -> CatalogResult<AdoptionApplication> {
        let status = ApplicationStatus::from_id(self.status).ok_or_else(|| {
            CatalogError::Internal(format!("Invalid application status: {}", self.status))
        })?;

        Ok(AdoptionApplication {
            application_id: AdoptionApplicationId::from_uuid(self.application_id),
            user_id: UserId::from_uuid(self.user_id),
            pet_id: PetId::from_uuid(self.pet_id),
            status,
            message: self.message,
            applied_at: self.applied_at,
            approved_at: self.approved_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
