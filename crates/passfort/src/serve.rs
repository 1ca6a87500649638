// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `passfort serve` command implementation.
//!
//! Opens the database, seeds the bootstrap account on a fresh install, and
//! runs the API gateway until the process is stopped.

use passfort_config::PassfortConfig;
use passfort_core::PassfortError;
use passfort_crypto::hash_password;
use passfort_gateway::{start_server, AppState};
use passfort_storage::models::User;
use passfort_storage::queries::users;
use passfort_storage::Database;
use secrecy::SecretString;
use tracing::{info, warn};

/// Runs the `passfort serve` command.
pub async fn run_serve(config: PassfortConfig) -> Result<(), PassfortError> {
    init_tracing(&config.server.log_level);

    info!("starting passfort serve");

    let db = Database::open(&config.storage.database_path).await?;
    seed_bootstrap_user(&db, &config).await?;

    let state = AppState::from_config(&config, db)?;
    start_server(
        &config.server.host,
        config.server.port,
        state,
        &config.server.cors_origins,
    )
    .await
}

/// Create the configured initial account when the user table is empty.
///
/// Runs only on a fresh database; once any user exists the configured
/// bootstrap credentials are ignored.
async fn seed_bootstrap_user(db: &Database, config: &PassfortConfig) -> Result<(), PassfortError> {
    if users::count_users(db).await? > 0 {
        return Ok(());
    }

    let username = &config.bootstrap.initial_username;
    let password = SecretString::from(config.bootstrap.initial_password.clone());
    let user = User::new(username, hash_password(&password)?);
    users::create_user(db, &user).await?;

    info!(username = %username, "bootstrap user created");
    warn!("bootstrap user is using the configured initial password; change it");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("passfort={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bootstrap_user_is_seeded_once() {
        let db = Database::open_in_memory().await.unwrap();
        let config = PassfortConfig::default();

        seed_bootstrap_user(&db, &config).await.unwrap();
        let first = users::get_user_by_username(&db, &config.bootstrap.initial_username)
            .await
            .unwrap()
            .unwrap();

        // A second run must not replace the existing account.
        seed_bootstrap_user(&db, &config).await.unwrap();
        assert_eq!(users::count_users(&db).await.unwrap(), 1);
        let second = users::get_user_by_username(&db, &config.bootstrap.initial_username)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn existing_users_suppress_seeding() {
        let db = Database::open_in_memory().await.unwrap();
        users::create_user(&db, &User::new("alice", "hash".to_string()))
            .await
            .unwrap();

        seed_bootstrap_user(&db, &PassfortConfig::default())
            .await
            .unwrap();
        assert_eq!(users::count_users(&db).await.unwrap(), 1);
    }
}
