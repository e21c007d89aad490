//! Catalog Router
//!
//! Route-level middleware composition: the auth gate is layered last so
//! it runs first, and the role gate (admin routes only) runs inside it.

use axum::middleware::from_fn_with_state;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use auth::application::config::AuthConfig;
use auth::domain::repository::UserRepository;
use auth::infra::postgres::PgAuthRepository;
use auth::presentation::middleware::{AuthGateState, RoleGateState, require_admin, require_auth};

use crate::domain::repository::PetRepository;
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the catalog router with PostgreSQL repositories
pub fn catalog_router(
    repo: PgCatalogRepository,
    auth_repo: PgAuthRepository,
    config: AuthConfig,
) -> Router {
    catalog_router_generic(repo, auth_repo, config)
}

/// Create a generic catalog router for any repository implementation
pub fn catalog_router_generic<P, R>(repo: P, auth_repo: R, config: AuthConfig) -> Router
where
    P: PetRepository + Clone + Send + Sync + 'static,
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
    };
    let auth_state = AuthGateState {
        config: Arc::new(config),
    };
    let role_state = RoleGateState {
        repo: Arc::new(auth_repo),
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_pets::<P>).merge(
                post(handlers::create_pet::<P>)
                    .layer(from_fn_with_state(role_state, require_admin::<R>))
                    .layer(from_fn_with_state(auth_state.clone(), require_auth)),
            ),
        )
        .route(
            "/{id}/adopt",
            post(handlers::adopt_pet::<P>)
                .layer(from_fn_with_state(auth_state, require_auth)),
        )
        .with_state(state)
}
