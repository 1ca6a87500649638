// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Security core of the Passfort credential vault.
//!
//! Every stored secret is protected by envelope encryption: a 256-bit
//! per-user key is derived on demand from a single process-wide master key
//! via HKDF-SHA256, and the secret is sealed under that key with
//! AES-256-GCM. The derived key lives only on the stack for the duration of
//! one encrypt or decrypt call -- it is never cached and never persisted.
//!
//! Session authentication is a stateless HS256 JWT carrying the user
//! identifier as subject. The token signing secret and the vault master key
//! are distinct pieces of key material with distinct purposes: the former
//! protects authenticity of the identity claim, the latter confidentiality
//! of vault data.

pub mod cipher;
pub mod kdf;
pub mod master_key;
pub mod password;
pub mod token;

pub use cipher::{decrypt_secret, encrypt_secret};
pub use kdf::derive_user_key;
pub use master_key::MasterKey;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};
