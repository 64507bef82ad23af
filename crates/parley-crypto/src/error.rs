//! Error types for Parley cryptographic operations.
//!
//! Every failure is all-or-nothing: no partial plaintext and no partial key
//! material ever crosses an error boundary. Variants are deliberately coarse
//! on the decrypt path so the error itself cannot act as a padding or
//! truncation oracle.

use thiserror::Error;

/// Errors from symmetric sealing and asymmetric key wrapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The AEAD authentication tag did not verify.
    ///
    /// Covers tampered ciphertext, a wrong key, and truncated blobs alike.
    /// Never retried: re-running a failed tag check cannot succeed.
    #[error("authentication failed: message could not be decrypted")]
    AuthenticationFailed,

    /// A wrapped key could not be unwrapped with the given private key.
    ///
    /// Covers a wrong or rotated private key, corrupted wrap bytes, and
    /// malformed wrap length. Distinct from [`CryptoError::AuthenticationFailed`]
    /// so callers can tell "wrong key for this wrap" from "tampered message".
    #[error("key unwrap failed")]
    UnwrapFailed,

    /// Raw key bytes had the wrong length for this algorithm.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Required length in bytes.
        expected: usize,
        /// Length that was provided.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_name_no_key_material() {
        let errors = [
            CryptoError::AuthenticationFailed,
            CryptoError::UnwrapFailed,
            CryptoError::InvalidKeyLength { expected: 32, actual: 16 },
        ];

        for error in errors {
            let text = error.to_string();
            assert!(!text.is_empty());
            // Messages describe the failure class only, never bytes.
            assert!(!text.contains("0x"));
        }
    }
}
