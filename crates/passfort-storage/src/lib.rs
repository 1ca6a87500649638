// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for Passfort users and vault items.
//!
//! The storage layer only ever sees ciphertext: encryption and decryption
//! happen in `passfort-crypto` before data reaches this crate, and the
//! `password_encrypted` / `password_nonce` columns are opaque base64 text.
//! A secret update replaces both columns together, never one of them.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use database::Database;
pub use models::{User, VaultItem};
