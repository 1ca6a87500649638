// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user key derivation via HKDF-SHA256.
//!
//! `derive_user_key` is a pure function: the same master key and user
//! identifier always produce the same 32-byte key, which is what lets
//! decryption work without storing per-user salts. Domain separation
//! between users rests entirely on the `info` parameter, so the identifier
//! fed in here must always come from an authenticated source.

use passfort_core::PassfortError;
use ring::hkdf::{KeyType, Salt, HKDF_SHA256};
use zeroize::Zeroizing;

use crate::master_key::MasterKey;

struct OkmLen32;

impl KeyType for OkmLen32 {
    fn len(&self) -> usize {
        32
    }
}

/// Derive the 256-bit encryption key for one user.
///
/// HKDF extract-and-expand with no salt (RFC 5869 substitutes a zeroed
/// salt) and `info` set to the UTF-8 encoding of the user identifier.
/// The returned key is wrapped in [`Zeroizing`] and must only live for
/// the duration of a single encrypt or decrypt call.
pub fn derive_user_key(
    master_key: &MasterKey,
    user_id: &str,
) -> Result<Zeroizing<[u8; 32]>, PassfortError> {
    let salt = Salt::new(HKDF_SHA256, &[]);
    let prk = salt.extract(master_key.bytes());

    let info = [user_id.as_bytes()];
    let okm = prk
        .expand(&info, OkmLen32)
        .map_err(|_| PassfortError::Internal("HKDF expand failed".to_string()))?;

    let mut key = Zeroizing::new([0u8; 32]);
    okm.fill(key.as_mut())
        .map_err(|_| PassfortError::Internal("HKDF output fill failed".to_string()))?;

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_master() -> MasterKey {
        MasterKey::from_bytes([0u8; 32])
    }

    #[test]
    fn derive_is_deterministic() {
        let master = zero_master();
        let key1 = derive_user_key(&master, "u1").unwrap();
        let key2 = derive_user_key(&master, "u1").unwrap();
        assert_eq!(*key1, *key2, "same inputs must produce same output");
    }

    #[test]
    fn different_users_get_different_keys() {
        let master = zero_master();
        let key1 = derive_user_key(&master, "u1").unwrap();
        let key2 = derive_user_key(&master, "u2").unwrap();
        assert_ne!(*key1, *key2);
    }

    #[test]
    fn different_master_keys_give_different_keys() {
        let key1 = derive_user_key(&zero_master(), "u1").unwrap();
        let key2 = derive_user_key(&MasterKey::from_bytes([1u8; 32]), "u1").unwrap();
        assert_ne!(*key1, *key2);
    }

    #[test]
    fn output_is_32_bytes() {
        let key = derive_user_key(&zero_master(), "u1").unwrap();
        assert_eq!(key.len(), 32);
    }

    #[test]
    fn uuid_subjects_derive_stable_keys() {
        let master = zero_master();
        let id = uuid::Uuid::new_v4().to_string();
        let key1 = derive_user_key(&master, &id).unwrap();
        let key2 = derive_user_key(&master, &id).unwrap();
        assert_eq!(*key1, *key2);
    }
}
