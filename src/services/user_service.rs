//! User manager - validated construction of user entities.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{normalize_email, NewUser, Password, User, UserType};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;

/// Every field accepted by the complete factory. The password is plain text
/// and is hashed before anything is persisted.
#[derive(Debug, Clone, Default)]
pub struct CompleteUser {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub user_type: UserType,
    pub location: String,
    pub team_name: Option<String>,
    pub skill: Option<String>,
    pub password: Option<String>,
}

/// User factory trait for dependency injection.
///
/// Any validation failure aborts the call before the store is touched.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user from the minimal field set. Fails if `email` is empty.
    async fn create_user(
        &self,
        username: String,
        email: String,
        password: Option<String>,
    ) -> AppResult<User>;

    /// Create a user with its full profile. Fails if `phone` or `email` is empty.
    async fn create_complete_user(&self, input: CompleteUser) -> AppResult<User>;

    /// Create a user, then grant admin and staff status.
    async fn create_superuser(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<User>;

    async fn get_user(&self, id: Uuid) -> AppResult<User>;
}

/// Concrete implementation of UserService over a repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Reject the insert up front when a unique column is already taken,
    /// so the caller learns which field collided.
    async fn ensure_unique(&self, new_user: &NewUser) -> AppResult<()> {
        if self.repo.find_by_username(&new_user.username).await?.is_some() {
            return Err(AppError::conflict("username"));
        }
        if self.repo.find_by_email(&new_user.email).await?.is_some() {
            return Err(AppError::conflict("email"));
        }
        if self.repo.find_by_phone(&new_user.phone).await?.is_some() {
            return Err(AppError::conflict("phone"));
        }
        Ok(())
    }

    async fn insert(&self, new_user: NewUser) -> AppResult<User> {
        self.ensure_unique(&new_user).await?;
        let user = self.repo.create(new_user).await?;
        tracing::info!(user_id = %user.id, username = %user, "User created");
        Ok(user)
    }
}

fn require_email(email: &str) -> AppResult<()> {
    if email.trim().is_empty() {
        return Err(AppError::validation("Users must have an email address"));
    }
    Ok(())
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(
        &self,
        username: String,
        email: String,
        password: Option<String>,
    ) -> AppResult<User> {
        require_email(&email)?;

        let password_hash = Password::from_optional(password.as_deref())?.into_string();
        self.insert(NewUser {
            username,
            email: normalize_email(&email),
            password_hash,
            ..NewUser::default()
        })
        .await
    }

    async fn create_complete_user(&self, input: CompleteUser) -> AppResult<User> {
        if input.phone.trim().is_empty() {
            return Err(AppError::validation("Users must have a phone"));
        }
        require_email(&input.email)?;

        let password_hash = Password::from_optional(input.password.as_deref())?.into_string();
        self.insert(NewUser {
            username: input.username,
            email: normalize_email(&input.email),
            phone: input.phone,
            user_type: input.user_type,
            team_name: input.team_name,
            skill: input.skill,
            location: input.location,
            password_hash,
        })
        .await
    }

    async fn create_superuser(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<User> {
        let mut user = self.create_user(username, email, Some(password)).await?;
        user.promote_to_superuser();

        let user = self.repo.save(&user).await?;
        tracing::info!(user_id = %user.id, "User promoted to superuser");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }
}
