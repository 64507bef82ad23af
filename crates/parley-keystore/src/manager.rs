//! Key manager binding a store to one local identity.

use parley_crypto::{WrapPrivateKey, WrapPublicKey};

use crate::{KeyStore, KeyStoreError};

/// Owns the local identity's key pair lifecycle.
///
/// A thin policy layer over a [`KeyStore`]: it pins the identity, keeps
/// generation lazy and idempotent, and exposes the public half for
/// publishing to the recipient directory. The private half is reachable only
/// through [`KeyManager::with_private_key`].
#[derive(Clone)]
pub struct KeyManager<S: KeyStore> {
    store: S,
    identity: String,
}

impl<S: KeyStore> KeyManager<S> {
    /// Create a manager for the given local identity.
    ///
    /// No key material is touched until first use.
    pub fn new(store: S, identity: impl Into<String>) -> Self {
        Self { store, identity: identity.into() }
    }

    /// Identity this manager operates for.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Ensure a key pair exists, returning the public half.
    ///
    /// Idempotent: generates on first call, then returns the same key
    /// forever (until a store wipe).
    pub fn ensure_key_pair(&self) -> Result<WrapPublicKey, KeyStoreError> {
        self.store.load_or_create(&self.identity)
    }

    /// Public key in its stable published encoding (raw 32-byte point).
    ///
    /// This is the value pushed to the recipient directory; it must be
    /// byte-identical across calls for the same pair.
    pub fn export_public_key(&self) -> Result<Vec<u8>, KeyStoreError> {
        Ok(self.ensure_key_pair()?.to_bytes().to_vec())
    }

    /// Run one cryptographic operation with the private key.
    ///
    /// Scoped access: the handle lives only for the closure's stack frame.
    pub fn with_private_key<T>(
        &self,
        op: impl FnOnce(&WrapPrivateKey) -> T,
    ) -> Result<T, KeyStoreError> {
        self.store.use_private_key(&self.identity, op)
    }
}
