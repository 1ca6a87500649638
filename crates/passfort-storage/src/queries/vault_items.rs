// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault item CRUD operations.
//!
//! Every query is scoped by owner id: a record is only visible to the user
//! it belongs to, so "someone else's item" and "no such item" are the same
//! empty result.

use passfort_core::{EncryptedSecret, PassfortError};
use rusqlite::params;
use uuid::Uuid;

use crate::database::{map_tr_err, Database};
use crate::models::VaultItem;

const ITEM_COLUMNS: &str = "id, user_id, account_name, url, login, \
                            password_encrypted, password_nonce, created_at, updated_at";

fn row_to_item(row: &rusqlite::Row<'_>) -> Result<VaultItem, rusqlite::Error> {
    let parse = |idx: usize, value: String| {
        Uuid::parse_str(&value).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
    };
    let id: String = row.get(0)?;
    let user_id: String = row.get(1)?;
    Ok(VaultItem {
        id: parse(0, id)?,
        user_id: parse(1, user_id)?,
        account_name: row.get(2)?,
        url: row.get(3)?,
        login: row.get(4)?,
        secret: EncryptedSecret {
            ciphertext: row.get(5)?,
            nonce: row.get(6)?,
        },
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

/// Insert a new vault item.
pub async fn create_item(db: &Database, item: &VaultItem) -> Result<(), PassfortError> {
    let item = item.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO vault_items (id, user_id, account_name, url, login,
                                          password_encrypted, password_nonce,
                                          created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    item.id.to_string(),
                    item.user_id.to_string(),
                    item.account_name,
                    item.url,
                    item.login,
                    item.secret.ciphertext,
                    item.secret.nonce,
                    item.created_at,
                    item.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Get one item by id, scoped to its owner.
pub async fn get_item(
    db: &Database,
    id: Uuid,
    owner_id: Uuid,
) -> Result<Option<VaultItem>, PassfortError> {
    let id = id.to_string();
    let owner_id = owner_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ITEM_COLUMNS} FROM vault_items WHERE id = ?1 AND user_id = ?2"
            ))?;
            let result = stmt.query_row(params![id, owner_id], row_to_item);
            match result {
                Ok(item) => Ok(Some(item)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// List a user's items, optionally filtered by a case-insensitive
/// substring of the account name.
pub async fn list_items(
    db: &Database,
    owner_id: Uuid,
    query: Option<&str>,
) -> Result<Vec<VaultItem>, PassfortError> {
    let owner_id = owner_id.to_string();
    let query = query.map(|q| q.to_string());
    db.connection()
        .call(move |conn| {
            let mut items = Vec::new();
            match &query {
                Some(fragment) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {ITEM_COLUMNS} FROM vault_items
                         WHERE user_id = ?1 AND account_name LIKE ?2
                         ORDER BY created_at DESC"
                    ))?;
                    let pattern = format!("%{fragment}%");
                    let rows = stmt.query_map(params![owner_id, pattern], row_to_item)?;
                    for row in rows {
                        items.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {ITEM_COLUMNS} FROM vault_items
                         WHERE user_id = ?1 ORDER BY created_at DESC"
                    ))?;
                    let rows = stmt.query_map(params![owner_id], row_to_item)?;
                    for row in rows {
                        items.push(row?);
                    }
                }
            }
            Ok(items)
        })
        .await
        .map_err(map_tr_err)
}

/// Update an item's metadata and, when `secret` is `Some`, replace the
/// ciphertext and nonce together. Returns false when no owned row matched.
pub async fn update_item(
    db: &Database,
    id: Uuid,
    owner_id: Uuid,
    account_name: String,
    url: Option<String>,
    login: Option<String>,
    secret: Option<EncryptedSecret>,
) -> Result<bool, PassfortError> {
    let id = id.to_string();
    let owner_id = owner_id.to_string();
    let updated_at = chrono::Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| {
            let changed = match secret {
                Some(secret) => conn.execute(
                    "UPDATE vault_items
                     SET account_name = ?3, url = ?4, login = ?5,
                         password_encrypted = ?6, password_nonce = ?7, updated_at = ?8
                     WHERE id = ?1 AND user_id = ?2",
                    params![
                        id,
                        owner_id,
                        account_name,
                        url,
                        login,
                        secret.ciphertext,
                        secret.nonce,
                        updated_at,
                    ],
                )?,
                None => conn.execute(
                    "UPDATE vault_items
                     SET account_name = ?3, url = ?4, login = ?5, updated_at = ?6
                     WHERE id = ?1 AND user_id = ?2",
                    params![id, owner_id, account_name, url, login, updated_at],
                )?,
            };
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete an item. Returns false when no owned row matched.
pub async fn delete_item(db: &Database, id: Uuid, owner_id: Uuid) -> Result<bool, PassfortError> {
    let id = id.to_string();
    let owner_id = owner_id.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "DELETE FROM vault_items WHERE id = ?1 AND user_id = ?2",
                params![id, owner_id],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}
