// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User CRUD operations.

use passfort_core::PassfortError;
use rusqlite::params;
use uuid::Uuid;

use crate::database::{map_tr_err, Database};
use crate::models::User;

fn row_to_user(row: &rusqlite::Row<'_>) -> Result<User, rusqlite::Error> {
    let id: String = row.get(0)?;
    Ok(User {
        id: Uuid::parse_str(&id).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

/// Insert a new user.
pub async fn create_user(db: &Database, user: &User) -> Result<(), PassfortError> {
    let user = user.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users (id, username, password_hash, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user.id.to_string(),
                    user.username,
                    user.password_hash,
                    user.created_at,
                    user.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Get a user by id.
pub async fn get_user(db: &Database, id: Uuid) -> Result<Option<User>, PassfortError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, password_hash, created_at, updated_at
                 FROM users WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], row_to_user);
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Get a user by username.
pub async fn get_user_by_username(
    db: &Database,
    username: &str,
) -> Result<Option<User>, PassfortError> {
    let username = username.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, password_hash, created_at, updated_at
                 FROM users WHERE username = ?1",
            )?;
            let result = stmt.query_row(params![username], row_to_user);
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Count registered users. Used at startup to decide whether to seed the
/// bootstrap account.
pub async fn count_users(db: &Database) -> Result<u64, PassfortError> {
    db.connection()
        .call(|conn| {
            let count: u64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_and_fetch_user() {
        let db = Database::open_in_memory().await.unwrap();
        let user = User::new("alice", "$argon2id$fake".to_string());
        create_user(&db, &user).await.unwrap();

        let by_id = get_user(&db, user.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");

        let by_name = get_user_by_username(&db, "alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, user.id);
    }

    #[tokio::test]
    async fn count_tracks_inserts() {
        let db = Database::open_in_memory().await.unwrap();
        assert_eq!(count_users(&db).await.unwrap(), 0);
        create_user(&db, &User::new("alice", "h".to_string()))
            .await
            .unwrap();
        assert_eq!(count_users(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_user_is_none() {
        let db = Database::open_in_memory().await.unwrap();
        assert!(get_user(&db, Uuid::new_v4()).await.unwrap().is_none());
        assert!(get_user_by_username(&db, "ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let db = Database::open_in_memory().await.unwrap();
        create_user(&db, &User::new("alice", "h1".to_string()))
            .await
            .unwrap();
        let err = create_user(&db, &User::new("alice", "h2".to_string())).await;
        assert!(err.is_err());
    }
}
