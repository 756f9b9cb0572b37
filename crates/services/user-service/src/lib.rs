//! User Service Library
//!
//! User management use cases backed by a SeaORM store: the repository,
//! the validator, the service layer and the schema migrations.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;
pub mod validator;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::info;

use domain::ValidationPolicy;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::{UserManager, UserService};

/// Wire the store-backed service over an open connection.
pub fn build_user_service(
    connection: DatabaseConnection,
    policy: ValidationPolicy,
) -> Arc<dyn UserService> {
    let user_repo = Arc::new(UserStore::new(connection));
    Arc::new(UserManager::new(user_repo, policy))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &UserServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.database.is_in_memory() {
        tracing::warn!("In-memory store is discarded when this command exits");
    }

    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
