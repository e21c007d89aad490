//! Auth Middleware
//!
//! The two request-pipeline gates:
//! - `require_auth` - verifies the bearer token and attaches the decoded
//!   claims to the request extensions
//! - `require_admin` - re-reads the live user record and requires the
//!   admin flag; must run after `require_auth`
//!
//! Compose per route with `axum::middleware::from_fn_with_state`; the
//! auth gate must be the outer layer so the role gate always finds
//! claims in the extensions.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenClaims, TokenGate};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthError;

/// State for the auth gate (token verification is stateless)
#[derive(Clone)]
pub struct AuthGateState {
    pub config: Arc<AuthConfig>,
}

/// State for the role gate
#[derive(Clone)]
pub struct RoleGateState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// The full, live user record of an admin caller
///
/// Inserted by `require_admin` in place of the token claims so that
/// handlers observe the current admin status, not the one captured at
/// token issuance.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware that requires a valid bearer token
pub async fn require_auth(
    State(state): State<AuthGateState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let Some(token) = bearer_token(&req) else {
        return Err(AuthError::MissingToken.into_response());
    };

    let gate = TokenGate::new(state.config.clone());
    let claims = match gate.verify(&token) {
        Ok(claims) => claims,
        Err(e) => return Err(e.into_response()),
    };

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Middleware that requires the caller to be an admin
///
/// Re-fetches the user record so that revoking admin rights takes
/// effect on the next request even while the token stays valid.
pub async fn require_admin<R>(
    State(state): State<RoleGateState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    // Claims must have been attached by require_auth; their absence
    // means the pipeline was miscomposed.
    let Some(claims) = req.extensions().get::<TokenClaims>().cloned() else {
        tracing::error!("Role gate reached without authenticated claims");
        return Err(AuthError::MissingToken.into_response());
    };

    let user_id = UserId::from_uuid(claims.id);
    let user = match state.repo.find_by_id(&user_id).await {
        Ok(user) => user,
        Err(e) => return Err(e.into_response()),
    };

    match user {
        Some(user) if user.is_admin => {
            req.extensions_mut().insert(CurrentUser(user));
            Ok(next.run(req).await)
        }
        _ => {
            tracing::warn!(user_id = %claims.id, "Admin access denied");
            Err(AuthError::Forbidden.into_response())
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn bearer_token(req: &Request<Body>) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
