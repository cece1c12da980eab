//! Database connection management

use pulse_core::{ServiceError, ServiceResult};
use pulse_migrations::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub type DbConnection = DatabaseConnection;

const MAX_CONNECT_ATTEMPTS: u32 = 10;
const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Connect to the event store and bring the schema up to date.
///
/// Startup readiness gate: the connection is retried a fixed number of
/// times with a fixed delay before giving up.
pub async fn establish_connection(database_url: &str) -> ServiceResult<Arc<DbConnection>> {
    let db = connect_with_retry(database_url, MAX_CONNECT_ATTEMPTS, CONNECT_RETRY_DELAY).await?;

    // Run migrations
    Migrator::up(&db, None)
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))?;

    Ok(Arc::new(db))
}

/// Bounded connection retry loop. One attempt per `delay` tick, at most
/// `max_attempts` total; the last connection error is surfaced on failure.
pub async fn connect_with_retry(
    database_url: &str,
    max_attempts: u32,
    delay: Duration,
) -> ServiceResult<DbConnection> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(100).min_connections(5);

    let mut last_error = String::new();
    for attempt in 1..=max_attempts {
        // The pool connects lazily, so ping to prove the store is reachable
        match Database::connect(opt.clone()).await {
            Ok(db) => match db.ping().await {
                Ok(()) => {
                    info!("Database is available");
                    return Ok(db);
                }
                Err(e) => last_error = e.to_string(),
            },
            Err(e) => last_error = e.to_string(),
        }

        warn!(
            "Waiting for database... attempt {}/{}",
            attempt, max_attempts
        );
        if attempt < max_attempts {
            tokio::time::sleep(delay).await;
        }
    }

    Err(ServiceError::Database(format!(
        "could not connect to the database after {} attempts: {}",
        max_attempts, last_error
    )))
}
