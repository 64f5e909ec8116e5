pub mod clinic;
pub mod memory;
pub mod orchard;
pub mod seed;
pub mod store;

pub use memory::MemoryStore;
pub use store::{ClinicStore, OrchardStore};

use sqlx::{PgPool, migrate::Migrator, postgres::PgPoolOptions};

use crate::{config::Config, errors::AppError};

pub async fn connect(config: &Config) -> Result<PgPool, AppError> {
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| AppError::EnvError("DATABASE_URL must be set".into()))?;

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to connect to database: {}", e)))
}

pub async fn migrate_clinic(postgres: &PgPool) -> Result<(), AppError> {
    run_migrations(sqlx::migrate!("./migrations/clinic"), postgres).await
}

pub async fn migrate_orchard(postgres: &PgPool) -> Result<(), AppError> {
    run_migrations(sqlx::migrate!("./migrations/orchard"), postgres).await
}

// Both apps may share one database, so the other app's recorded migrations
// must not count as missing.
async fn run_migrations(mut migrator: Migrator, postgres: &PgPool) -> Result<(), AppError> {
    migrator.set_ignore_missing(true);

    migrator
        .run(postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to run migrations: {}", e)))?;

    tracing::info!("Database migrations applied");

    Ok(())
}
