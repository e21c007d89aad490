//! Unit tests for the auth crate
//!
//! Use-case and middleware tests run against an in-memory credential
//! store so no database is required.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_id::UserId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// In-memory credential store mirroring the PostgreSQL semantics,
/// including the unique-email constraint.
#[derive(Clone, Default)]
struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn insert(&self, user: User) {
        self.users
            .lock()
            .unwrap()
            .insert(*user.user_id.as_uuid(), user);
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        users.insert(*user.user_id.as_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(user_id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| &u.email == email))
    }
}

fn test_config() -> Arc<AuthConfig> {
    Arc::new(AuthConfig {
        token_secret: [7u8; 32],
        ..Default::default()
    })
}

fn make_user(email: &str, password: &str, is_admin: bool) -> User {
    let raw = RawPassword::new(password.to_string()).unwrap();
    let mut user = User::new(
        DisplayName::new("Ann").unwrap(),
        Email::new(email).unwrap(),
        UserPassword::from_raw(&raw, None).unwrap(),
    );
    user.is_admin = is_admin;
    user
}

// ============================================================================
// Token gate
// ============================================================================

mod token_tests {
    use super::*;
    use crate::application::token::{TokenClaims, TokenGate};
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::Utc;

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let gate = TokenGate::new(test_config());
        let user = make_user("ann@x.com", "secret1", false);

        let token = gate.issue(&user).unwrap();
        let claims = gate.verify(&token).unwrap();

        assert_eq!(claims.id, *user.user_id.as_uuid());
        assert_eq!(claims.email, "ann@x.com");
        assert!(!claims.is_admin);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let gate = TokenGate::new(test_config());
        let other = TokenGate::new(Arc::new(AuthConfig {
            token_secret: [8u8; 32],
            ..Default::default()
        }));

        let token = gate.issue(&make_user("ann@x.com", "secret1", false)).unwrap();
        assert!(matches!(
            other.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_rejects_forged_claims() {
        let gate = TokenGate::new(test_config());
        let token = gate.issue(&make_user("ann@x.com", "secret1", false)).unwrap();

        // Rewrite the payload to claim admin rights, keeping the old
        // signature. The signature check must catch it.
        let (payload_b64, signature_b64) = token.split_once('.').unwrap();
        let payload = URL_SAFE_NO_PAD.decode(payload_b64).unwrap();
        let mut claims: TokenClaims = serde_json::from_slice(&payload).unwrap();
        claims.is_admin = true;
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        let forged = format!("{forged_payload}.{signature_b64}");

        assert!(matches!(gate.verify(&forged), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_verify_rejects_malformed_tokens() {
        let gate = TokenGate::new(test_config());

        for token in ["", "garbage", "no-signature.", ".no-payload", "a.b.c"] {
            assert!(
                matches!(gate.verify(token), Err(AuthError::InvalidToken)),
                "token {token:?} was accepted"
            );
        }
    }

    #[test]
    fn test_expiry_boundary() {
        let gate = TokenGate::new(test_config());
        let issued_around = Utc::now().timestamp_millis();
        let token = gate.issue(&make_user("ann@x.com", "secret1", false)).unwrap();

        let day_ms = 24 * 3600 * 1000;
        let minute_ms = 60 * 1000;

        // Accepted just before the 24h window closes...
        assert!(gate.verify_at(&token, issued_around + day_ms - minute_ms).is_ok());
        // ...rejected just after.
        assert!(matches!(
            gate.verify_at(&token, issued_around + day_ms + minute_ms),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_claims_expiry_check() {
        let claims = TokenClaims {
            id: Uuid::new_v4(),
            email: "ann@x.com".to_string(),
            is_admin: false,
            exp: 1_000,
        };
        assert!(!claims.is_expired_at(999));
        assert!(claims.is_expired_at(1_000));
        assert!(claims.is_expired_at(1_001));
    }
}

// ============================================================================
// Registration
// ============================================================================

mod register_tests {
    use super::*;
    use crate::application::register::{RegisterInput, RegisterUseCase};

    fn use_case(repo: &InMemoryUserRepository) -> RegisterUseCase<InMemoryUserRepository> {
        RegisterUseCase::new(Arc::new(repo.clone()), test_config())
    }

    fn input(name: &str, email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let repo = InMemoryUserRepository::default();
        let output = use_case(&repo)
            .execute(input("Ann", "ann@x.com", "secret1"))
            .await
            .unwrap();

        assert!(Uuid::parse_str(&output.user_id).is_ok());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_register_defaults_to_non_admin() {
        let repo = InMemoryUserRepository::default();
        use_case(&repo)
            .execute(input("Ann", "ann@x.com", "secret1"))
            .await
            .unwrap();

        let user = repo
            .find_by_email(&Email::new("ann@x.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(!user.is_admin);
    }

    #[tokio::test]
    async fn test_register_never_stores_plaintext() {
        let repo = InMemoryUserRepository::default();
        use_case(&repo)
            .execute(input("Ann", "ann@x.com", "secret1"))
            .await
            .unwrap();

        let user = repo
            .find_by_email(&Email::new("ann@x.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_ne!(user.password_hash.as_phc_string(), "secret1");
        assert!(!user.password_hash.as_phc_string().contains("secret1"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::default();
        let use_case = use_case(&repo);

        use_case
            .execute(input("Ann", "ann@x.com", "secret1"))
            .await
            .unwrap();
        let err = use_case
            .execute(input("Another Ann", "ann@x.com", "other-password"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_case_insensitive() {
        let repo = InMemoryUserRepository::default();
        let use_case = use_case(&repo);

        use_case
            .execute(input("Ann", "ann@x.com", "secret1"))
            .await
            .unwrap();
        let err = use_case
            .execute(input("Ann", "ANN@X.COM", "secret1"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_register_reports_every_violation() {
        let repo = InMemoryUserRepository::default();
        let err = use_case(&repo)
            .execute(input("", "not-an-email", "12345"))
            .await
            .unwrap_err();

        let AuthError::Validation(violations) = err else {
            panic!("expected validation error, got {err:?}");
        };
        let fields: Vec<&str> = violations
            .as_slice()
            .iter()
            .map(|v| v.field.as_str())
            .collect();
        assert_eq!(fields, ["name", "email", "password"]);
        assert_eq!(repo.len(), 0);
    }
}

// ============================================================================
// Login
// ============================================================================

mod login_tests {
    use super::*;
    use crate::application::login::{LoginInput, LoginUseCase};
    use crate::application::token::TokenGate;

    fn use_case(repo: &InMemoryUserRepository) -> LoginUseCase<InMemoryUserRepository> {
        LoginUseCase::new(Arc::new(repo.clone()), test_config())
    }

    fn input(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_success_issues_valid_token() {
        let repo = InMemoryUserRepository::default();
        repo.insert(make_user("ann@x.com", "secret1", false));

        let output = use_case(&repo)
            .execute(input("ann@x.com", "secret1"))
            .await
            .unwrap();

        let claims = TokenGate::new(test_config()).verify(&output.token).unwrap();
        assert_eq!(claims.email, "ann@x.com");
        assert_eq!(claims.id, *output.user.user_id.as_uuid());
    }

    #[tokio::test]
    async fn test_login_normalizes_email_case() {
        let repo = InMemoryUserRepository::default();
        repo.insert(make_user("ann@x.com", "secret1", false));

        assert!(use_case(&repo)
            .execute(input("ANN@X.com", "secret1"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let repo = InMemoryUserRepository::default();
        repo.insert(make_user("ann@x.com", "secret1", false));
        let use_case = use_case(&repo);

        let unknown_user = use_case
            .execute(input("nobody@x.com", "secret1"))
            .await
            .unwrap_err();
        let wrong_password = use_case
            .execute(input("ann@x.com", "secret2"))
            .await
            .unwrap_err();

        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert_eq!(unknown_user.to_string(), wrong_password.to_string());
    }

    #[tokio::test]
    async fn test_login_single_character_variant_fails() {
        let repo = InMemoryUserRepository::default();
        repo.insert(make_user("ann@x.com", "secret1", false));
        let use_case = use_case(&repo);

        for variant in ["Secret1", "secret2", "secret1 "] {
            let err = use_case
                .execute(input("ann@x.com", variant))
                .await
                .unwrap_err();
            assert!(
                matches!(err, AuthError::InvalidCredentials),
                "variant {variant:?} did not fail as invalid credentials"
            );
        }
    }

    #[tokio::test]
    async fn test_login_validates_input() {
        let repo = InMemoryUserRepository::default();
        let use_case = use_case(&repo);

        let err = use_case
            .execute(input("not-an-email", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        let err = use_case.execute(input("ann@x.com", "")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }
}

// ============================================================================
// Error mapping
// ============================================================================

mod error_tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use kernel::validation::Violations;

    #[test]
    fn test_error_into_response_status_codes() {
        let mut violations = Violations::new();
        violations.add("email", "Invalid email format");

        let cases = [
            (AuthError::Validation(violations), StatusCode::BAD_REQUEST),
            (AuthError::EmailTaken, StatusCode::BAD_REQUEST),
            (AuthError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (AuthError::MissingToken, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidToken, StatusCode::UNAUTHORIZED),
            (AuthError::Forbidden, StatusCode::FORBIDDEN),
            (
                AuthError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected);
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_internal_detail_is_not_echoed() {
        let response = AuthError::Internal("connection string leaked".to_string());
        let app_error = response.to_app_error();
        assert_eq!(app_error.message(), "Internal server error");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(AuthError::EmailTaken.to_string(), "Email already registered");
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
        assert_eq!(AuthError::MissingToken.to_string(), "No token provided");
    }
}

// ============================================================================
// Middleware pipeline (auth gate + role gate)
// ============================================================================

mod middleware_tests {
    use super::*;
    use crate::application::token::{TokenClaims, TokenGate};
    use crate::presentation::middleware::{
        AuthGateState, CurrentUser, RoleGateState, require_admin, require_auth,
    };
    use axum::body::Body;
    use axum::extract::Extension;
    use axum::http::{Request, StatusCode, header};
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    async fn whoami(Extension(claims): Extension<TokenClaims>) -> String {
        claims.email
    }

    async fn admin_only(Extension(CurrentUser(user)): Extension<CurrentUser>) -> String {
        user.email.as_str().to_string()
    }

    /// Routes composed the way the API composes them: the auth gate is
    /// the outer layer, the role gate the inner one.
    fn app(repo: InMemoryUserRepository, config: Arc<AuthConfig>) -> Router {
        let auth_state = AuthGateState {
            config: config.clone(),
        };
        let role_state = RoleGateState {
            repo: Arc::new(repo),
        };

        Router::new()
            .route(
                "/whoami",
                get(whoami).layer(from_fn_with_state(auth_state.clone(), require_auth)),
            )
            .route(
                "/admin",
                get(admin_only)
                    .layer(from_fn_with_state(
                        role_state,
                        require_admin::<InMemoryUserRepository>,
                    ))
                    .layer(from_fn_with_state(auth_state, require_auth)),
            )
    }

    fn get_request(path: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let app = app(InMemoryUserRepository::default(), test_config());
        let response = app.oneshot(get_request("/whoami", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthorized() {
        let app = app(InMemoryUserRepository::default(), test_config());
        let response = app
            .oneshot(get_request("/whoami", Some("not-a-token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler_with_claims() {
        let config = test_config();
        let repo = InMemoryUserRepository::default();
        let user = make_user("ann@x.com", "secret1", false);
        let token = TokenGate::new(config.clone()).issue(&user).unwrap();
        repo.insert(user);

        let response = app(repo, config)
            .oneshot(get_request("/whoami", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"ann@x.com");
    }

    #[tokio::test]
    async fn test_admin_route_allows_admin() {
        let config = test_config();
        let repo = InMemoryUserRepository::default();
        let admin = make_user("root@x.com", "secret1", true);
        let token = TokenGate::new(config.clone()).issue(&admin).unwrap();
        repo.insert(admin);

        let response = app(repo, config)
            .oneshot(get_request("/admin", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_admin_route_rejects_non_admin() {
        let config = test_config();
        let repo = InMemoryUserRepository::default();
        let user = make_user("ann@x.com", "secret1", false);
        let token = TokenGate::new(config.clone()).issue(&user).unwrap();
        repo.insert(user);

        let response = app(repo, config)
            .oneshot(get_request("/admin", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_route_uses_live_record_not_token_claim() {
        let config = test_config();
        let repo = InMemoryUserRepository::default();

        // Token claims admin rights, but the stored record says otherwise:
        // the role gate must trust the store.
        let mut user = make_user("ann@x.com", "secret1", false);
        user.is_admin = true;
        let token = TokenGate::new(config.clone()).issue(&user).unwrap();
        user.is_admin = false;
        repo.insert(user);

        let response = app(repo, config)
            .oneshot(get_request("/admin", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_route_rejects_deleted_account() {
        let config = test_config();
        let user = make_user("ghost@x.com", "secret1", true);
        let token = TokenGate::new(config.clone()).issue(&user).unwrap();

        // Record never stored: authenticated but gone from the store.
        let response = app(InMemoryUserRepository::default(), config)
            .oneshot(get_request("/admin", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
