//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{User, UserType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub phone: String,
    pub user_type: i16,
    pub team_name: Option<String>,
    pub skill: Option<String>,
    pub location: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_admin: bool,
    pub password_hash: String,
    pub last_login: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            username: model.username,
            email: model.email,
            phone: model.phone,
            user_type: UserType::try_from(model.user_type).unwrap_or_default(),
            team_name: model.team_name,
            skill: model.skill,
            location: model.location,
            is_active: model.is_active,
            is_staff: model.is_staff,
            is_admin: model.is_admin,
            password_hash: model.password_hash,
            last_login: model.last_login,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
