//! Error types for local key storage.

use thiserror::Error;

/// Errors from the local secure key store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyStoreError {
    /// The underlying secure storage is unusable.
    ///
    /// A platform-level fault: surfaced to the user as "encryption
    /// unavailable" and never retried. There is no degraded mode in which
    /// sealing proceeds without a key store.
    #[error("key store unavailable: {reason}")]
    Unavailable {
        /// Platform-level cause, for diagnostics only.
        reason: String,
    },
}
