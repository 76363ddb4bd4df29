//! User repository: the only code that talks to the `users` table.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Exact match on the stored (already normalized) email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<User>>;

    /// Insert a new user with default flags (active, not staff, not admin).
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Persist every mutable column of an existing user.
    async fn save(&self, user: &User) -> AppResult<User>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_one(&self, filter: SimpleExpr) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(filter)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.find_one(user::Column::Email.eq(email)).await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.find_one(user::Column::Username.eq(username)).await
    }

    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<User>> {
        self.find_one(user::Column::Phone.eq(phone)).await
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(new_user.username),
            email: Set(new_user.email),
            phone: Set(new_user.phone),
            user_type: Set(new_user.user_type.code()),
            team_name: Set(new_user.team_name),
            skill: Set(new_user.skill),
            location: Set(new_user.location),
            is_active: Set(true),
            is_staff: Set(false),
            is_admin: Set(false),
            password_hash: Set(new_user.password_hash),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn save(&self, user: &User) -> AppResult<User> {
        let existing = UserEntity::find_by_id(user.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.username = Set(user.username.clone());
        active.email = Set(user.email.clone());
        active.phone = Set(user.phone.clone());
        active.user_type = Set(user.user_type.code());
        active.team_name = Set(user.team_name.clone());
        active.skill = Set(user.skill.clone());
        active.location = Set(user.location.clone());
        active.is_active = Set(user.is_active);
        active.is_staff = Set(user.is_staff);
        active.is_admin = Set(user.is_admin);
        active.password_hash = Set(user.password_hash.clone());
        active.last_login = Set(user.last_login);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }
}
