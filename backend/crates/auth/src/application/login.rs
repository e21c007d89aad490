//! Login Use Case
//!
//! Authenticates a user and issues a bearer token. "No such user" and
//! "wrong password" are deliberately indistinguishable so the endpoint
//! cannot be used as an account-existence oracle.

use std::sync::Arc;

use kernel::validation::Violations;

use crate::application::config::AuthConfig;
use crate::application::token::TokenGate;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed bearer token (24h validity)
    pub token: String,
    /// The authenticated user record; handlers must project it to a
    /// public-safe shape before echoing it.
    pub user: User,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::new(input.email);

        let mut violations = Violations::new();
        if let Err(e) = &email {
            violations.add_error("email", e);
        }
        if input.password.trim().is_empty() {
            violations.add("password", "Password is required");
        }
        violations.into_result(AuthError::Validation)?;

        let Ok(email) = email else {
            return Err(AuthError::InvalidCredentials);
        };

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // A password that cannot pass the storage policy cannot match
        // any stored hash either.
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = TokenGate::new(self.config.clone()).issue(&user)?;

        tracing::info!(
            user_id = %user.user_id,
            "User logged in"
        );

        Ok(LoginOutput { token, user })
    }
}
