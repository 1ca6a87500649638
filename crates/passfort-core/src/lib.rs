// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Passfort credential vault.
//!
//! This crate provides the error type and the small set of domain types
//! shared between the crypto, storage, and gateway crates.

pub mod error;
pub mod types;

pub use error::PassfortError;
pub use types::EncryptedSecret;
