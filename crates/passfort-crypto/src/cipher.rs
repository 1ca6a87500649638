// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Envelope cipher: AES-256-GCM seal/open for a single secret string.
//!
//! Every call to [`seal`] draws a fresh random 96-bit nonce from the system
//! CSPRNG. Nonce reuse under the same key would be catastrophic for GCM
//! security, so nonces are never supplied by callers.
//!
//! A failed [`open`] is an explicit [`PassfortError::Decryption`]. It is
//! never a sentinel value and never partial plaintext -- a wrong key (for
//! example one derived for a different user), a tampered ciphertext, and a
//! corrupted nonce are indistinguishable at this layer.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use passfort_core::{EncryptedSecret, PassfortError};
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use ring::rand::{SecureRandom, SystemRandom};

/// Encrypt raw bytes with AES-256-GCM under a random 96-bit nonce.
///
/// Returns `(ciphertext_with_tag, nonce_bytes)`. The caller must keep both
/// to decrypt later.
pub fn seal(key: &[u8; 32], plaintext: &[u8]) -> Result<(Vec<u8>, [u8; NONCE_LEN]), PassfortError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| PassfortError::Internal("failed to create AES-256-GCM key".to_string()))?;
    let less_safe = LessSafeKey::new(unbound);

    let rng = SystemRandom::new();
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill(&mut nonce_bytes)
        .map_err(|_| PassfortError::Internal("failed to generate random nonce".to_string()))?;

    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    // Seal in place: the buffer is extended with the 16-byte tag.
    let mut in_out = plaintext.to_vec();
    less_safe
        .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| PassfortError::Internal("AES-256-GCM encryption failed".to_string()))?;

    Ok((in_out, nonce_bytes))
}

/// Decrypt AES-256-GCM ciphertext produced by [`seal`].
///
/// `ciphertext` must include the appended authentication tag.
pub fn open(
    key: &[u8; 32],
    nonce_bytes: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, PassfortError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| PassfortError::Internal("failed to create AES-256-GCM key".to_string()))?;
    let less_safe = LessSafeKey::new(unbound);

    let nonce = Nonce::assume_unique_for_key(*nonce_bytes);

    let mut in_out = ciphertext.to_vec();
    let plaintext = less_safe
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| {
            PassfortError::Decryption("AES-256-GCM tag verification failed".to_string())
        })?;

    Ok(plaintext.to_vec())
}

/// Encrypt a secret string into its transport form.
///
/// Ciphertext and nonce are each base64-encoded so collaborators can store
/// them as opaque text columns.
pub fn encrypt_secret(plaintext: &str, key: &[u8; 32]) -> Result<EncryptedSecret, PassfortError> {
    let (ciphertext, nonce) = seal(key, plaintext.as_bytes())?;
    Ok(EncryptedSecret {
        ciphertext: BASE64.encode(ciphertext),
        nonce: BASE64.encode(nonce),
    })
}

/// Decrypt a transport-form secret back to the original string.
///
/// Malformed base64, a wrong-length nonce, a failed tag check, and
/// non-UTF-8 plaintext all surface as [`PassfortError::Decryption`].
pub fn decrypt_secret(secret: &EncryptedSecret, key: &[u8; 32]) -> Result<String, PassfortError> {
    let ciphertext = BASE64
        .decode(&secret.ciphertext)
        .map_err(|_| PassfortError::Decryption("ciphertext is not valid base64".to_string()))?;
    let nonce_vec = BASE64
        .decode(&secret.nonce)
        .map_err(|_| PassfortError::Decryption("nonce is not valid base64".to_string()))?;
    let nonce: [u8; NONCE_LEN] = nonce_vec
        .try_into()
        .map_err(|_| PassfortError::Decryption("nonce is not 12 bytes".to_string()))?;

    let plaintext = open(key, &nonce, &ciphertext)?;
    String::from_utf8(plaintext)
        .map_err(|_| PassfortError::Decryption("plaintext is not valid UTF-8".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf::derive_user_key;
    use crate::master_key::MasterKey;
    use std::collections::HashSet;

    fn key() -> [u8; 32] {
        [42u8; 32]
    }

    #[test]
    fn seal_open_roundtrip() {
        let (ciphertext, nonce) = seal(&key(), b"secret value").unwrap();
        let plaintext = open(&key(), &nonce, &ciphertext).unwrap();
        assert_eq!(plaintext, b"secret value");
    }

    #[test]
    fn ciphertext_is_plaintext_plus_tag() {
        let (ciphertext, _) = seal(&key(), b"hello").unwrap();
        assert_eq!(ciphertext.len(), 5 + 16);
    }

    #[test]
    fn encrypt_twice_never_repeats_nonce_or_ciphertext() {
        let secret1 = encrypt_secret("same input", &key()).unwrap();
        let secret2 = encrypt_secret("same input", &key()).unwrap();
        assert_ne!(secret1.nonce, secret2.nonce);
        assert_ne!(secret1.ciphertext, secret2.ciphertext);
    }

    #[test]
    fn nonces_are_unique_across_many_encryptions() {
        // Statistical check against accidental nonce reuse: 10^4 samples
        // under the same key must produce 10^4 distinct nonces.
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let secret = encrypt_secret("p", &key()).unwrap();
            assert!(seen.insert(secret.nonce), "nonce collision");
        }
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let (mut ciphertext, nonce) = seal(&key(), b"do not tamper").unwrap();
        ciphertext[0] ^= 0x01;
        let err = open(&key(), &nonce, &ciphertext).unwrap_err();
        assert!(matches!(err, PassfortError::Decryption(_)));
    }

    #[test]
    fn tampered_nonce_fails() {
        let (ciphertext, mut nonce) = seal(&key(), b"payload").unwrap();
        nonce[0] ^= 0x01;
        let err = open(&key(), &nonce, &ciphertext).unwrap_err();
        assert!(matches!(err, PassfortError::Decryption(_)));
    }

    #[test]
    fn wrong_key_fails() {
        let (ciphertext, nonce) = seal(&key(), b"payload").unwrap();
        let err = open(&[1u8; 32], &nonce, &ciphertext).unwrap_err();
        assert!(matches!(err, PassfortError::Decryption(_)));
    }

    #[test]
    fn malformed_transport_encoding_fails() {
        let garbage = passfort_core::EncryptedSecret {
            ciphertext: "!!not base64!!".to_string(),
            nonce: "AAAA".to_string(),
        };
        assert!(matches!(
            decrypt_secret(&garbage, &key()).unwrap_err(),
            PassfortError::Decryption(_)
        ));
    }

    #[test]
    fn short_nonce_fails() {
        let secret = EncryptedSecret {
            ciphertext: base64::engine::general_purpose::STANDARD.encode([0u8; 32]),
            nonce: base64::engine::general_purpose::STANDARD.encode([0u8; 8]),
        };
        assert!(matches!(
            decrypt_secret(&secret, &key()).unwrap_err(),
            PassfortError::Decryption(_)
        ));
    }

    #[test]
    fn roundtrip_under_derived_user_key() {
        let master = MasterKey::from_bytes([0u8; 32]);
        let user_key = derive_user_key(&master, "u1").unwrap();

        let secret = encrypt_secret("hunter2", &user_key).unwrap();
        let revealed = decrypt_secret(&secret, &user_key).unwrap();
        assert_eq!(revealed, "hunter2");
    }

    // A secret sealed for "u1" must never open under the key derived for
    // "u2", and must never come back as plaintext.
    #[test]
    fn cross_user_decryption_fails() {
        let master = MasterKey::from_bytes([0u8; 32]);
        let key_u1 = derive_user_key(&master, "u1").unwrap();
        let key_u2 = derive_user_key(&master, "u2").unwrap();

        let secret = encrypt_secret("hunter2", &key_u1).unwrap();
        let err = decrypt_secret(&secret, &key_u2).unwrap_err();
        assert!(matches!(err, PassfortError::Decryption(_)));
    }
}
