//! Recipient directory: user identity to published public key.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use parley_crypto::WrapPublicKey;

use crate::message::UserId;

/// Remote lookup of a user's published wrap public key.
///
/// The directory is an external collaborator: it owns caching, retry, and
/// backoff. By the time a call returns here, retries are exhausted — `None`
/// covers "no such user", "no published key", and "lookups kept failing"
/// alike, and the envelope treats all three identically (the recipient is
/// excluded from the sealed message).
///
/// Lookups may block on network I/O, hence async: a seal over many
/// recipients must not pin a worker thread while the network is slow.
#[async_trait]
pub trait RecipientDirectory: Send + Sync {
    /// Resolve the published public key for a user, if any.
    async fn public_key_for(&self, user: &UserId) -> Option<WrapPublicKey>;
}

/// In-memory directory for tests and simulation.
///
/// Clones share state via `Arc`. Individual users can be marked unreachable
/// to exercise the silent-exclusion path the way a flaky remote lookup
/// would.
#[derive(Clone, Default)]
pub struct MemoryDirectory {
    inner: Arc<Mutex<MemoryDirectoryInner>>,
}

#[derive(Default)]
struct MemoryDirectoryInner {
    keys: HashMap<UserId, WrapPublicKey>,
    unreachable: HashSet<UserId>,
}

impl MemoryDirectory {
    /// Create a new empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a user's public key.
    pub fn publish(&self, user: UserId, key: WrapPublicKey) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.keys.insert(user, key);
        }
    }

    /// Remove a user's published key.
    pub fn remove(&self, user: &UserId) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.keys.remove(user);
        }
    }

    /// Simulate lookup failure for one user (exhausted retries).
    pub fn set_unreachable(&self, user: UserId) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.unreachable.insert(user);
        }
    }

    /// Restore lookups for a previously unreachable user.
    pub fn set_reachable(&self, user: &UserId) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.unreachable.remove(user);
        }
    }
}

#[async_trait]
impl RecipientDirectory for MemoryDirectory {
    async fn public_key_for(&self, user: &UserId) -> Option<WrapPublicKey> {
        // A poisoned lock reads as a failed lookup; the envelope's exclusion
        // policy handles it like any other unresolved recipient.
        let inner = self.inner.lock().ok()?;
        if inner.unreachable.contains(user) {
            return None;
        }
        inner.keys.get(user).cloned()
    }
}

#[cfg(test)]
mod tests {
    use parley_crypto::WrapKeyPair;

    use super::*;

    #[tokio::test]
    async fn lookup_returns_published_key() {
        let directory = MemoryDirectory::new();
        let pair = WrapKeyPair::generate();
        directory.publish(UserId::from("alice"), pair.public_key().clone());

        let found = directory.public_key_for(&UserId::from("alice")).await;
        assert_eq!(found.as_ref(), Some(pair.public_key()));
    }

    #[tokio::test]
    async fn unknown_user_is_absent() {
        let directory = MemoryDirectory::new();
        assert!(directory.public_key_for(&UserId::from("nobody")).await.is_none());
    }

    #[tokio::test]
    async fn unreachable_user_is_absent_until_restored() {
        let directory = MemoryDirectory::new();
        let pair = WrapKeyPair::generate();
        let bob = UserId::from("bob");

        directory.publish(bob.clone(), pair.public_key().clone());
        directory.set_unreachable(bob.clone());
        assert!(directory.public_key_for(&bob).await.is_none());

        directory.set_reachable(&bob);
        assert!(directory.public_key_for(&bob).await.is_some());
    }

    #[tokio::test]
    async fn clones_share_published_keys() {
        let directory = MemoryDirectory::new();
        let clone = directory.clone();
        let pair = WrapKeyPair::generate();

        directory.publish(UserId::from("alice"), pair.public_key().clone());
        assert!(clone.public_key_for(&UserId::from("alice")).await.is_some());
    }
}
