//! List Pets Use Case
//!
//! Public, unfiltered, unpaginated. Acceptable for small catalogs;
//! server-side pagination is a known scalability gap.

use std::sync::Arc;

use crate::domain::entity::pet::Pet;
use crate::domain::repository::PetRepository;
use crate::error::CatalogResult;

/// List pets use case
pub struct ListPetsUseCase<P>
where
    P: PetRepository,
{
    repo: Arc<P>,
}

impl<P> ListPetsUseCase<P>
where
    P: PetRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> CatalogResult<Vec<Pet>> {
        self.repo.list_all().await
    }
}
