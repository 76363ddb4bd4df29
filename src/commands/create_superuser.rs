//! Createsuperuser command - Bootstraps an administrator account.

use std::sync::Arc;

use crate::cli::args::CreateSuperuserArgs;
use crate::config::Config;
use crate::domain::{validate_username, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, UserRepository, UserStore};
use crate::services::{UserManager, UserService};

/// Execute the createsuperuser command
pub async fn execute(args: CreateSuperuserArgs, config: Config) -> AppResult<()> {
    let db = Database::open_migrated(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;
    let repo: Arc<dyn UserRepository> = Arc::new(UserStore::new(db.get_connection()));

    let user = create(&UserManager::new(repo), args).await?;
    println!("Superuser {} created ({})", user.email, user.id);

    Ok(())
}

/// Validate the arguments and hand them to the user factory.
pub async fn create(users: &dyn UserService, args: CreateSuperuserArgs) -> AppResult<User> {
    validate_username(&args.username)?;
    users
        .create_superuser(args.username, args.email, args.password)
        .await
}
