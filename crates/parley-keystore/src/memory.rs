//! In-memory key store implementation.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use parley_crypto::{WrapKeyPair, WrapPrivateKey, WrapPublicKey};

use crate::{KeyStore, KeyStoreError};

/// In-memory key store for testing and simulation.
///
/// Uses `HashMap` keyed by identity, wrapped in `Arc<Mutex<>>` so clones
/// share the same underlying pairs (mirroring a device-wide keystore). A
/// poisoned mutex surfaces as [`KeyStoreError::Unavailable`] rather than a
/// panic: a storage-layer fault means "encryption unavailable", not a
/// crash.
#[derive(Clone, Default)]
pub struct MemoryKeyStore {
    pairs: Arc<Mutex<HashMap<String, WrapKeyPair>>>,
}

impl MemoryKeyStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identities with stored key pairs.
    ///
    /// Useful for asserting lazy generation in tests.
    pub fn identity_count(&self) -> Result<usize, KeyStoreError> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, WrapKeyPair>>, KeyStoreError> {
        self.pairs.lock().map_err(|_| KeyStoreError::Unavailable {
            reason: "key store lock poisoned".to_string(),
        })
    }
}

impl KeyStore for MemoryKeyStore {
    fn load_or_create(&self, identity: &str) -> Result<WrapPublicKey, KeyStoreError> {
        let mut pairs = self.lock()?;
        let pair = pairs.entry(identity.to_string()).or_insert_with(WrapKeyPair::generate);
        Ok(pair.public_key().clone())
    }

    fn use_private_key<T>(
        &self,
        identity: &str,
        op: impl FnOnce(&WrapPrivateKey) -> T,
    ) -> Result<T, KeyStoreError> {
        let mut pairs = self.lock()?;
        let pair = pairs.entry(identity.to_string()).or_insert_with(WrapKeyPair::generate);
        Ok(op(pair.private_key()))
    }

    fn wipe(&self) -> Result<(), KeyStoreError> {
        self.lock()?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_or_create_is_idempotent() {
        let store = MemoryKeyStore::new();

        let first = store.load_or_create("alice").unwrap();
        let second = store.load_or_create("alice").unwrap();

        assert_eq!(first, second);
        assert_eq!(store.identity_count().unwrap(), 1);
    }

    #[test]
    fn identities_get_distinct_pairs() {
        let store = MemoryKeyStore::new();

        let alice = store.load_or_create("alice").unwrap();
        let bob = store.load_or_create("bob").unwrap();

        assert_ne!(alice, bob);
    }

    #[test]
    fn private_key_matches_published_public_key() {
        let store = MemoryKeyStore::new();
        let public = store.load_or_create("alice").unwrap();

        let derived = store.use_private_key("alice", |private| private.public_key()).unwrap();

        assert_eq!(derived, public);
    }

    #[test]
    fn use_private_key_generates_lazily() {
        let store = MemoryKeyStore::new();
        assert_eq!(store.identity_count().unwrap(), 0);

        // First access is a decrypt path on a fresh device: the pair must
        // exist by the time the closure runs.
        let public = store.use_private_key("alice", |private| private.public_key()).unwrap();

        assert_eq!(store.identity_count().unwrap(), 1);
        assert_eq!(store.load_or_create("alice").unwrap(), public);
    }

    #[test]
    fn clones_share_state() {
        let store = MemoryKeyStore::new();
        let clone = store.clone();

        let original = store.load_or_create("alice").unwrap();
        let via_clone = clone.load_or_create("alice").unwrap();

        assert_eq!(original, via_clone);
    }

    #[test]
    fn wipe_destroys_pairs() {
        let store = MemoryKeyStore::new();
        let before = store.load_or_create("alice").unwrap();

        store.wipe().unwrap();
        assert_eq!(store.identity_count().unwrap(), 0);

        // A new pair replaces the wiped one
        let after = store.load_or_create("alice").unwrap();
        assert_ne!(before, after);
    }
}
