// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state. The state is immutable
//! after startup: the master key, token service, and database handle are
//! the only process-wide resources, and all of them are safe to share
//! across any number of concurrent requests without coordination.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, post, put};
use axum::Router;
use passfort_config::PassfortConfig;
use passfort_core::PassfortError;
use passfort_crypto::{MasterKey, TokenService};
use passfort_storage::Database;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle (serialized through one background thread).
    pub db: Database,
    /// Session token issue/verify service.
    pub tokens: Arc<TokenService>,
    /// Vault master key, read-only for the process lifetime.
    pub master_key: Arc<MasterKey>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("master_key", &"[redacted]")
            .finish()
    }
}

impl AppState {
    /// Build application state from validated configuration.
    ///
    /// Assumes `passfort_config::validation` already ran, but re-checks the
    /// key material anyway since this is the last point before requests.
    pub fn from_config(config: &PassfortConfig, db: Database) -> Result<Self, PassfortError> {
        let secret_key = config
            .security
            .secret_key
            .as_deref()
            .ok_or_else(|| PassfortError::Config("security.secret_key is required".to_string()))?;
        let tokens = TokenService::new(
            secret_key,
            &config.security.algorithm,
            config.security.token_ttl_minutes,
        )?;

        let master_key_b64 = config
            .vault
            .master_key
            .as_deref()
            .ok_or_else(|| PassfortError::Config("vault.master_key is required".to_string()))?;
        let master_key = MasterKey::from_base64(master_key_b64)?;

        Ok(Self {
            db,
            tokens: Arc::new(tokens),
            master_key: Arc::new(master_key),
        })
    }
}

/// Assemble the full application router.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/me", get(handlers::auth::me));

    let vault_routes = Router::new()
        .route("/", get(handlers::vault::list_items))
        .route("/", post(handlers::vault::create_item))
        .route("/{id}", put(handlers::vault::update_item))
        .route("/{id}", delete(handlers::vault::delete_item))
        .route("/{id}/reveal", post(handlers::vault::reveal_item));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/vault", vault_routes)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the CORS layer from configured origins. No origins, no CORS.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    if parsed.is_empty() {
        return CorsLayer::new();
    }
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Bind and serve until the process is stopped.
pub async fn start_server(
    host: &str,
    port: u16,
    state: AppState,
    cors_origins: &[String],
) -> Result<(), PassfortError> {
    let app = build_router(state, cors_origins);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PassfortError::Internal(format!("failed to bind to {addr}: {e}")))?;

    tracing::info!("passfort listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| PassfortError::Internal(format!("server error: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn app_state_from_minimal_config() {
        let mut config = PassfortConfig::default();
        config.security.secret_key = Some("secret".to_string());
        config.vault.master_key = Some(MasterKey::from_bytes([0u8; 32]).to_base64());

        let db = Database::open_in_memory().await.unwrap();
        let state = AppState::from_config(&config, db).unwrap();
        let debug = format!("{state:?}");
        assert!(debug.contains("[redacted]"));
    }

    #[tokio::test]
    async fn app_state_requires_secrets() {
        let db = Database::open_in_memory().await.unwrap();
        let err = AppState::from_config(&PassfortConfig::default(), db).unwrap_err();
        assert!(matches!(err, PassfortError::Config(_)));
    }
}
