//! The persisted shape of an encrypted chat message.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identity of a chat participant, as issued by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A sealed chat message as persisted in the message document.
///
/// Field names and binary layout are the storage contract: `ciphertext`
/// (nonce-prefixed AEAD blob), `wrappedKeys` (user id to 80-byte wrapped
/// key), `encrypted`. They must stay stable so previously sealed messages
/// remain decryptable by later versions.
///
/// Treat a value as immutable once created: an edited message is sealed
/// again from scratch, never patched in place.
///
/// # Invariants
///
/// - `wrapped_keys` has one entry per recipient whose public key resolved at
///   seal time; absence means that identity cannot decrypt (silent
///   exclusion, not an error)
/// - When `encrypted` is `false`, `ciphertext` holds the plain UTF-8 content
///   and `wrapped_keys` is empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealedMessage {
    /// `nonce(24) || ciphertext || tag(16)` blob, or plain UTF-8 bytes when
    /// `encrypted` is `false`.
    pub ciphertext: Vec<u8>,

    /// One-time message key, wrapped once per resolvable recipient.
    ///
    /// `BTreeMap` keeps the persisted encoding deterministic.
    pub wrapped_keys: BTreeMap<UserId, Vec<u8>>,

    /// Whether `ciphertext` is actually encrypted.
    ///
    /// Sending unencrypted is a per-message sender choice, not a chat-wide
    /// setting, so the flag lives on the message itself.
    pub encrypted: bool,
}

impl SealedMessage {
    /// Build the unencrypted form: content stored verbatim.
    pub fn plain(content: &str) -> Self {
        Self {
            ciphertext: content.as_bytes().to_vec(),
            wrapped_keys: BTreeMap::new(),
            encrypted: false,
        }
    }

    /// Identities holding a wrapped key for this message.
    ///
    /// Lets the UI render access state without attempting decryption.
    pub fn recipients(&self) -> impl Iterator<Item = &UserId> {
        self.wrapped_keys.keys()
    }

    /// Whether the given identity can decrypt this message.
    ///
    /// Unencrypted messages are readable by anyone.
    pub fn can_open(&self, user: &UserId) -> bool {
        !self.encrypted || self.wrapped_keys.contains_key(user)
    }
}
