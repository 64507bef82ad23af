//! Envelope orchestration: seal and open multi-recipient messages.

use std::collections::{BTreeMap, BTreeSet};

use parley_crypto::{MessageKey, open_bytes, seal_bytes, unwrap_key, wrap_key};
use parley_keystore::{KeyManager, KeyStore};

use crate::{
    directory::RecipientDirectory,
    error::{OpenError, SealError},
    message::{SealedMessage, UserId},
};

/// Seals and opens chat messages for one local identity.
///
/// Stateless across calls: every seal generates a fresh one-time key and
/// every open re-derives everything it needs from the message and the key
/// store. Both collaborators are injected at construction so tests can
/// substitute an in-memory directory and key store.
pub struct Envelope<S: KeyStore, D: RecipientDirectory> {
    keys: KeyManager<S>,
    directory: D,
}

impl<S: KeyStore, D: RecipientDirectory> Envelope<S, D> {
    /// Create an envelope for the key manager's identity.
    pub fn new(keys: KeyManager<S>, directory: D) -> Self {
        Self { keys, directory }
    }

    /// Local identity this envelope seals and opens for.
    pub fn local_user(&self) -> UserId {
        UserId::from(self.keys.identity())
    }

    /// Seal a plaintext message for a set of recipients.
    ///
    /// Encrypts once under a fresh one-time key, then wraps that key for
    /// every member of `recipients` plus the sender (who must be able to
    /// re-read their own message later). A recipient whose key lookup
    /// resolves to nothing is silently excluded and the seal still
    /// succeeds — availability over completeness. The one-time key is
    /// dropped before returning.
    ///
    /// # Errors
    ///
    /// Only [`SealError::KeyStore`]: lazy generation of the local key pair
    /// hit a platform storage fault. Nothing network-shaped fails a seal.
    pub async fn seal(
        &self,
        plaintext: &str,
        recipients: &BTreeSet<UserId>,
    ) -> Result<SealedMessage, SealError> {
        // First encryption need generates the local pair (lazily, once).
        self.keys.ensure_key_pair()?;

        let key = MessageKey::generate();
        let ciphertext = seal_bytes(plaintext.as_bytes(), &key);

        let mut members = recipients.clone();
        members.insert(self.local_user());

        let mut wrapped_keys = BTreeMap::new();
        for user in members {
            match self.directory.public_key_for(&user).await {
                Some(public_key) => {
                    wrapped_keys.insert(user, wrap_key(&key, &public_key));
                },
                None => {
                    // Known gap: this identity can never decrypt this
                    // message; re-sealing for late keys is a product call
                    // made elsewhere.
                    tracing::warn!(user = %user, "no resolvable public key, excluding recipient");
                },
            }
        }

        tracing::debug!(
            recipients = wrapped_keys.len(),
            ciphertext_len = ciphertext.len(),
            "sealed message"
        );

        Ok(SealedMessage { ciphertext, wrapped_keys, encrypted: true })
    }

    /// Open a sealed message as the local identity.
    ///
    /// Unencrypted messages pass through verbatim. For encrypted ones the
    /// local wrapped key is unwrapped inside the key store's scoped access
    /// and the ciphertext decrypted all-or-nothing.
    ///
    /// # Errors
    ///
    /// - [`OpenError::KeyNotAvailable`]: no wrapped key for this identity
    /// - [`OpenError::UnwrapFailed`]: wrong/rotated key pair or corrupt wrap
    /// - [`OpenError::AuthenticationFailed`]: tampered or truncated
    ///   ciphertext; propagated unchanged and never logged with plaintext
    pub fn open(&self, sealed: &SealedMessage) -> Result<String, OpenError> {
        if !sealed.encrypted {
            return Ok(String::from_utf8(sealed.ciphertext.clone())?);
        }

        let wrapped = sealed
            .wrapped_keys
            .get(&self.local_user())
            .ok_or(OpenError::KeyNotAvailable)?;

        let key = self.keys.with_private_key(|private| unwrap_key(wrapped, private))??;
        let plaintext = open_bytes(&sealed.ciphertext, &key)?;

        Ok(String::from_utf8(plaintext)?)
    }
}
