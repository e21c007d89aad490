//! Register Use Case
//!
//! Creates a new user account. Every violated field constraint is
//! reported, not just the first one.

use std::sync::Arc;

use kernel::validation::Violations;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        // Validate all fields before touching the store, collecting
        // every violation for the response.
        let name = DisplayName::new(input.name);
        let email = Email::new(input.email);
        let password = RawPassword::new(input.password);

        let mut violations = Violations::new();
        if let Err(e) = &name {
            violations.add_error("name", e);
        }
        if let Err(e) = &email {
            violations.add_error("email", e);
        }
        if let Err(e) = &password {
            violations.add_error("password", e);
        }

        let (Ok(name), Ok(email), Ok(password)) = (name, email, password) else {
            return Err(AuthError::Validation(violations));
        };

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        // Deliberately slow: Argon2id with a fresh random salt.
        let password_hash = UserPassword::from_raw(&password, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = User::new(name, email, password_hash);

        // The store's unique constraint closes the check-then-insert race.
        self.repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            "User registered"
        );

        Ok(RegisterOutput {
            user_id: user.user_id.to_string(),
        })
    }
}
