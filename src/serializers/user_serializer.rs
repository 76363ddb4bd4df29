//! Wire representations of the user entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::USERNAME_RE;
use crate::domain::{User, UserType};
use crate::errors::{AppError, AppResult};
use crate::services::{AuthService, CompleteUser, TokenResponse, UserService};

/// Registration payload. The password is write-only: it is accepted here
/// and never appears in any response type.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Letters, digits and `. @ + -` only
    #[validate(
        length(min = 1, max = 255, message = "Username must be 1 to 255 characters"),
        regex(
            path = *USERNAME_RE,
            message = "name must be Alphanumeric or contain any of the following: \". @ + -\" "
        )
    )]
    #[schema(example = "asha.k")]
    pub username: String,
    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    #[schema(example = "asha@example.com")]
    pub email: String,
    #[validate(length(min = 1, max = 10, message = "Phone must be 1 to 10 characters"))]
    #[schema(example = "9876543210")]
    pub phone: String,
    #[validate(length(min = 1, max = 255, message = "Password is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
    /// 1 = admin, 2 = candidate, 3 = hr
    #[serde(default)]
    #[schema(value_type = i16, example = 2)]
    pub user_type: UserType,
    #[validate(length(min = 1, max = 30, message = "Location must be 1 to 30 characters"))]
    #[schema(example = "Bengaluru")]
    pub location: String,
    #[validate(length(max = 50, message = "Team name must be at most 50 characters"))]
    pub team_name: Option<String>,
    #[validate(length(max = 200, message = "Skill must be at most 200 characters"))]
    pub skill: Option<String>,
}

impl RegisterRequest {
    /// Create the user through the complete factory. Expects a payload
    /// that has already passed `validate`.
    pub async fn save(self, users: &dyn UserService) -> AppResult<User> {
        users
            .create_complete_user(CompleteUser {
                username: self.username,
                email: self.email,
                phone: self.phone,
                user_type: self.user_type,
                location: self.location,
                team_name: self.team_name,
                skill: self.skill,
                password: Some(self.password),
            })
            .await
    }
}

/// What a successful registration echoes back.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisteredUser {
    pub username: String,
    pub email: String,
    pub phone: String,
    #[schema(value_type = i16, example = 2)]
    pub user_type: UserType,
    pub location: String,
    pub team_name: Option<String>,
    pub skill: Option<String>,
}

impl From<&User> for RegisteredUser {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            user_type: user.user_type,
            location: user.location.clone(),
            team_name: user.team_name.clone(),
            skill: user.skill.clone(),
        }
    }
}

/// Login credentials
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    #[schema(example = "asha@example.com")]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "Password is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

impl LoginRequest {
    /// Resolve the credentials to a user. Every failure is reported as
    /// the same generic error.
    pub async fn authenticate(&self, auth: &dyn AuthService) -> AppResult<User> {
        auth.authenticate(&self.email, &self.password)
            .await?
            .ok_or(AppError::InvalidCredentials)
    }
}

/// Read-only profile projection. Carries no password and no access flags.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserDetail {
    #[schema(example = "asha@example.com")]
    pub email: String,
    #[schema(example = "asha.k")]
    pub username: String,
    #[schema(example = "9876543210")]
    pub phone: String,
    #[schema(example = "Bengaluru")]
    pub location: String,
    pub team_name: Option<String>,
    pub skill: Option<String>,
}

impl From<&User> for UserDetail {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            username: user.username.clone(),
            phone: user.phone.clone(),
            location: user.location.clone(),
            team_name: user.team_name.clone(),
            skill: user.skill.clone(),
        }
    }
}

/// Token plus the profile of the user it was issued to.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserDetail,
}

impl LoginResponse {
    pub fn new(token: TokenResponse, user: &User) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user: UserDetail::from(user),
        }
    }
}
