//! Error types for sealing and opening messages.
//!
//! The retry policy lives in the types: nothing here is retry-eligible.
//! Network-shaped failures during key resolution never surface as errors at
//! all — they become excluded recipients before sealing completes — and
//! re-running a failed authentication check is meaningless.

use std::string::FromUtf8Error;

use parley_crypto::CryptoError;
use parley_keystore::KeyStoreError;
use thiserror::Error;

/// Errors when sealing a message.
///
/// Deliberately narrow: unresolvable recipients are not an error (silent
/// exclusion), so the only way a seal fails outright is the local platform
/// fault class.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SealError {
    /// Local secure storage fault; surfaced as "encryption unavailable".
    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),
}

/// Errors when opening a sealed message.
#[derive(Error, Debug)]
pub enum OpenError {
    /// This identity holds no wrapped key for the message.
    ///
    /// An expected consequence of the availability-over-completeness seal
    /// policy, not a crypto failure: surface as "you don't have access to
    /// this message", never as a decryption error.
    #[error("no wrapped key for this identity")]
    KeyNotAvailable,

    /// The wrapped key would not unwrap under the local private key.
    ///
    /// Wrong or rotated key pair, or corrupted wrap bytes.
    #[error("key unwrap failed")]
    UnwrapFailed,

    /// The ciphertext failed its integrity check.
    ///
    /// Surface as "message could not be decrypted"; the partial plaintext
    /// is never available to leak.
    #[error("authentication failed: message could not be decrypted")]
    AuthenticationFailed,

    /// Local secure storage fault; surfaced as "encryption unavailable".
    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),

    /// Decryption succeeded but the payload is not valid UTF-8.
    #[error("decrypted payload is not valid text")]
    InvalidEncoding(#[from] FromUtf8Error),
}

impl OpenError {
    /// True when the reader was simply never granted access.
    ///
    /// Callers pick user-facing copy off this: access-denied reads as an
    /// expected state, everything else as a decryption failure.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::KeyNotAvailable)
    }
}

impl From<CryptoError> for OpenError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::AuthenticationFailed => Self::AuthenticationFailed,
            CryptoError::UnwrapFailed | CryptoError::InvalidKeyLength { .. } => Self::UnwrapFailed,
        }
    }
}
