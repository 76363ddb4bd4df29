//! Authentication service - credential checks and token issuance.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{normalize_email, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// A real Argon2 hash checked when the email is unknown, so a miss costs
/// the same as a wrong password.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| {
    Password::new("usermgmt-timing-equalizer")
        .ok()
        .map(Password::into_string)
});

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token issued after a successful login
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication backend trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Return the active user owning these credentials, or `None`.
    ///
    /// Unknown email, wrong password, and inactive account are
    /// indistinguishable to the caller.
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>>;

    /// Record the login and issue a token for an authenticated user.
    async fn login(&self, user: User) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of AuthService over the user repository.
pub struct Authenticator {
    repo: Arc<dyn UserRepository>,
    config: Config,
}

impl Authenticator {
    pub fn new(repo: Arc<dyn UserRepository>, config: Config) -> Self {
        Self { repo, config }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let user = self.repo.find_by_email(&normalize_email(email)).await?;

        let Some(user) = user else {
            if let Some(hash) = DUMMY_HASH.as_ref() {
                let _ = Password::from_hash(hash.clone()).verify(password);
            }
            tracing::debug!("Authentication failed: unknown email");
            return Ok(None);
        };

        if !Password::from_hash(user.password_hash.clone()).verify(password) {
            tracing::debug!(user_id = %user.id, "Authentication failed: wrong password");
            return Ok(None);
        }

        if !user.is_active {
            tracing::debug!(user_id = %user.id, "Authentication failed: inactive user");
            return Ok(None);
        }

        Ok(Some(user))
    }

    async fn login(&self, mut user: User) -> AppResult<TokenResponse> {
        user.touch_last_login();
        let user = self.repo.save(&user).await?;
        tracing::info!(user_id = %user.id, "User logged in");

        generate_token(&user, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )
        .map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            AppError::Unauthorized
        })?;

        Ok(token_data.claims)
    }
}
