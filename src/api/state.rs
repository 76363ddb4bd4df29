//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, UserRepository, UserStore};
use crate::services::{AuthService, Authenticator, UserManager, UserService};

/// Shared by every handler; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the SeaORM-backed repository into both services.
    pub fn from_database(database: Arc<Database>, config: Config) -> Self {
        let repo: Arc<dyn UserRepository> = Arc::new(UserStore::new(database.get_connection()));

        Self {
            auth_service: Arc::new(Authenticator::new(repo.clone(), config)),
            user_service: Arc::new(UserManager::new(repo)),
            database,
        }
    }
}
