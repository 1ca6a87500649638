// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Passfort crates.

use serde::{Deserialize, Serialize};

/// A secret encrypted under a per-user key, in transport encoding.
///
/// Both fields are base64 strings: `ciphertext` is the AES-GCM output with
/// the 16-byte authentication tag appended, `nonce` encodes the 12-byte
/// nonce used for exactly this ciphertext. The pair is written and replaced
/// wholesale -- a secret update produces a fresh nonce and ciphertext, never
/// an in-place mutation of either field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedSecret {
    /// Base64-encoded ciphertext including the GCM tag.
    pub ciphertext: String,
    /// Base64-encoded 12-byte nonce, unique per encryption.
    pub nonce: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypted_secret_roundtrips_through_json() {
        let secret = EncryptedSecret {
            ciphertext: "Y2lwaGVy".to_string(),
            nonce: "bm9uY2U=".to_string(),
        };
        let json = serde_json::to_string(&secret).unwrap();
        let back: EncryptedSecret = serde_json::from_str(&json).unwrap();
        assert_eq!(secret, back);
    }
}
