//! Message encryption using `XChaCha20-Poly1305`.
//!
//! One [`MessageKey`] encrypts exactly one message. The sealed blob carries
//! everything `open_bytes` needs: `nonce(24) || ciphertext || tag(16)`. This
//! layout is fixed; blobs sealed by one version must stay decryptable by
//! every later version.

use chacha20poly1305::{
    XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit},
};
use rand::{RngCore, rngs::OsRng};
use zeroize::Zeroize;

use crate::error::CryptoError;

/// Size of a symmetric message key (32 bytes, 256-bit).
pub const KEY_SIZE: usize = 32;

/// Size of the `XChaCha20` nonce prefixed to every sealed blob.
pub const NONCE_SIZE: usize = 24;

/// Size of the Poly1305 authentication tag appended to the ciphertext.
pub const TAG_SIZE: usize = 16;

/// A one-time symmetric key for a single sealed message.
///
/// Generated fresh per seal, consumed immediately, and zeroized on drop.
/// There is deliberately no way to persist one: it exists only transiently
/// between sealing a message and wrapping the key for each recipient.
pub struct MessageKey {
    bytes: [u8; KEY_SIZE],
}

impl MessageKey {
    /// Generate a fresh key from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Reconstruct a key from raw bytes (the unwrap path).
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Raw key bytes, borrowed for one cryptographic operation.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for MessageKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MessageKey(..)")
    }
}

/// Seal plaintext under a one-time key.
///
/// Generates a fresh random nonce per call, so sealing identical plaintext
/// twice never produces identical bytes. Returns
/// `nonce || ciphertext || tag` as one opaque blob.
pub fn seal_bytes(plaintext: &[u8], key: &MessageKey) -> Vec<u8> {
    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);

    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());
    let Ok(ciphertext) = cipher.encrypt(XNonce::from_slice(&nonce), plaintext) else {
        unreachable!("XChaCha20-Poly1305 encryption cannot fail with valid inputs");
    };

    let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);
    blob
}

/// Open a sealed blob with the message key.
///
/// All-or-nothing: a tampered blob, a wrong key, or a truncated blob all
/// fail with [`CryptoError::AuthenticationFailed`] and return no partial
/// plaintext.
pub fn open_bytes(blob: &[u8], key: &MessageKey) -> Result<Vec<u8>, CryptoError> {
    if blob.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::AuthenticationFailed);
    }

    let (nonce, ciphertext) = blob.split_at(NONCE_SIZE);
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

    cipher
        .decrypt(XNonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::AuthenticationFailed)
}
