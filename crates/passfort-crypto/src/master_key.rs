// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide vault master key.
//!
//! Loaded once at startup from a base64-encoded config value and read-only
//! for the process lifetime. All per-user keys are derived from it; if it
//! is ever exposed, every per-user key is trivially recomputable, so it is
//! the single trust anchor of the vault.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use passfort_core::PassfortError;
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A 32-byte master key, zeroed on drop and redacted in Debug output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey([u8; 32]);

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MasterKey").field(&"[redacted]").finish()
    }
}

impl MasterKey {
    /// Decode a master key from its base64 config representation.
    ///
    /// Anything that does not decode to exactly 32 bytes is a startup-time
    /// configuration error, never a per-request condition.
    pub fn from_base64(encoded: &str) -> Result<Self, PassfortError> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|_| PassfortError::Config("vault.master_key is not valid base64".to_string()))?;
        let key: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            PassfortError::Config(format!(
                "vault.master_key must decode to 32 bytes, got {}",
                b.len()
            ))
        })?;
        Ok(Self(key))
    }

    /// Construct from raw bytes. Used by tests and `keygen`.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Generate a fresh random master key from the system CSPRNG.
    pub fn generate() -> Result<Self, PassfortError> {
        let rng = SystemRandom::new();
        let mut key = [0u8; 32];
        rng.fill(&mut key)
            .map_err(|_| PassfortError::Internal("failed to generate random key".to_string()))?;
        Ok(Self(key))
    }

    /// The base64 form suitable for a config file.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    /// Raw key bytes, for key derivation only.
    pub(crate) fn bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_valid_32_byte_key() {
        let key = MasterKey::from_base64(&BASE64.encode([7u8; 32])).unwrap();
        assert_eq!(key.bytes(), &[7u8; 32]);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = MasterKey::from_base64(&BASE64.encode([1u8; 16])).unwrap_err();
        match err {
            PassfortError::Config(msg) => assert!(msg.contains("32 bytes")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_base64() {
        let err = MasterKey::from_base64("not base64 !!!").unwrap_err();
        assert!(matches!(err, PassfortError::Config(_)));
    }

    #[test]
    fn base64_roundtrip() {
        let key = MasterKey::generate().unwrap();
        let decoded = MasterKey::from_base64(&key.to_base64()).unwrap();
        assert_eq!(key.bytes(), decoded.bytes());
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = MasterKey::from_bytes([0xAB; 32]);
        let debug = format!("{key:?}");
        assert!(debug.contains("[redacted]"));
        assert!(!debug.contains("171")); // 0xAB
    }
}
