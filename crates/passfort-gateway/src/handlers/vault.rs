// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault item handlers: list, create, update, delete, reveal.
//!
//! Encryption and decryption always key off the identifier produced by the
//! identity resolver for *this* request. The per-user key is derived
//! inside each handler, used once, and dropped -- nothing caches it.
//!
//! List and item responses never include secret material; only the reveal
//! endpoint returns a decrypted password, and only for a record the caller
//! owns.

use axum::extract::{Path, Query, State};
use axum::Json;
use passfort_core::PassfortError;
use passfort_crypto::{cipher, kdf};
use passfort_storage::models::VaultItem;
use passfort_storage::queries::vault_items;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auth::MessageResponse;
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::server::AppState;

/// Request body for creating a vault item.
#[derive(Debug, Deserialize)]
pub struct VaultItemCreate {
    /// Display label for the account.
    pub account_name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
    /// The secret to store, encrypted before it touches storage.
    pub password: SecretString,
}

/// Request body for updating a vault item. Absent fields keep their
/// current values, an explicit `null` clears `url` or `login`, and a
/// present `password` replaces ciphertext and nonce together.
#[derive(Debug, Default, Deserialize)]
pub struct VaultItemUpdate {
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub login: Option<Option<String>>,
    #[serde(default)]
    pub password: Option<SecretString>,
}

/// Maps an absent field to `None` (via `default`) and a present field,
/// null included, to `Some`.
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Vault item metadata response. The stored secret is never included.
#[derive(Debug, Serialize)]
pub struct VaultItemResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub account_name: String,
    pub url: Option<String>,
    pub login: Option<String>,
    /// Always true: the password exists but is not in this response.
    pub password_masked: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<VaultItem> for VaultItemResponse {
    fn from(item: VaultItem) -> Self {
        Self {
            id: item.id,
            user_id: item.user_id,
            account_name: item.account_name,
            url: item.url,
            login: item.login,
            password_masked: true,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Response body for the reveal endpoint.
#[derive(Debug, Serialize)]
pub struct VaultItemReveal {
    /// The decrypted password.
    pub password: String,
}

/// Query parameters for listing items.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Optional case-insensitive substring filter on the account name.
    #[serde(default)]
    pub query: Option<String>,
}

/// GET /api/v1/vault
pub async fn list_items(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<VaultItemResponse>>, ApiError> {
    let items = vault_items::list_items(&state.db, user_id, params.query.as_deref()).await?;
    Ok(Json(items.into_iter().map(VaultItemResponse::from).collect()))
}

/// POST /api/v1/vault
pub async fn create_item(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(body): Json<VaultItemCreate>,
) -> Result<Json<VaultItemResponse>, ApiError> {
    let user_key = kdf::derive_user_key(&state.master_key, &user_id.to_string())?;
    let secret = cipher::encrypt_secret(body.password.expose_secret(), &user_key)?;

    let item = VaultItem::new(user_id, &body.account_name, body.url, body.login, secret);
    vault_items::create_item(&state.db, &item).await?;

    tracing::debug!(item_id = %item.id, "vault item created");
    Ok(Json(item.into()))
}

/// PUT /api/v1/vault/{id}
pub async fn update_item(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<VaultItemUpdate>,
) -> Result<Json<VaultItemResponse>, ApiError> {
    let existing = vault_items::get_item(&state.db, id, user_id)
        .await?
        .ok_or(PassfortError::NotFound("vault item"))?;

    let new_secret = match &body.password {
        Some(password) => {
            let user_key = kdf::derive_user_key(&state.master_key, &user_id.to_string())?;
            Some(cipher::encrypt_secret(password.expose_secret(), &user_key)?)
        }
        None => None,
    };

    let account_name = body.account_name.unwrap_or(existing.account_name);
    let url = body.url.unwrap_or(existing.url);
    let login = body.login.unwrap_or(existing.login);

    vault_items::update_item(
        &state.db,
        id,
        user_id,
        account_name,
        url,
        login,
        new_secret,
    )
    .await?;

    let updated = vault_items::get_item(&state.db, id, user_id)
        .await?
        .ok_or(PassfortError::NotFound("vault item"))?;
    Ok(Json(updated.into()))
}

/// DELETE /api/v1/vault/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = vault_items::delete_item(&state.db, id, user_id).await?;
    if !deleted {
        return Err(PassfortError::NotFound("vault item").into());
    }
    Ok(Json(MessageResponse {
        msg: "item deleted".to_string(),
    }))
}

/// POST /api/v1/vault/{id}/reveal
///
/// Decrypts under the key derived for the authenticated caller. A record
/// whose ciphertext cannot be verified surfaces as 422, never as a
/// placeholder value.
pub async fn reveal_item(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<VaultItemReveal>, ApiError> {
    let item = vault_items::get_item(&state.db, id, user_id)
        .await?
        .ok_or(PassfortError::NotFound("vault item"))?;

    let user_key = kdf::derive_user_key(&state.master_key, &user_id.to_string())?;
    let password = cipher::decrypt_secret(&item.secret, &user_key)?;

    Ok(Json(VaultItemReveal { password }))
}
