//! Asymmetric key wrapping via X25519 ECIES.
//!
//! Wrapping encrypts the 32 raw bytes of a [`MessageKey`] to a recipient's
//! static public key. Each wrap uses a fresh ephemeral X25519 key pair, so
//! the output is never deterministic and the construction is IND-CCA2-class.
//!
//! Output layout, fixed forever for back-compat:
//!
//! ```text
//! ephemeral_pk(32) || encrypted_key(32) || tag(16)    = 80 bytes
//! ```
//!
//! The AEAD key and nonce are derived with HKDF-SHA256 from the Diffie-Hellman
//! shared secret, with `ephemeral_pk || recipient_pk` bound into the info
//! parameter. A wrap is therefore only openable by the private key it was
//! addressed to, and splicing one wrap's ephemeral key onto another's
//! ciphertext fails authentication.

use chacha20poly1305::{
    XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit},
};
use hkdf::Hkdf;
use rand::rngs::OsRng;
use sha2::Sha256;
use x25519_dalek::{EphemeralSecret, PublicKey, SharedSecret};
use zeroize::Zeroize;

use crate::{
    cipher::{KEY_SIZE, MessageKey, TAG_SIZE},
    error::CryptoError,
    keys::{WRAP_PUBLIC_KEY_SIZE, WrapPrivateKey, WrapPublicKey},
};

/// Size of a wrapped key: ephemeral public key + encrypted key + tag.
pub const WRAPPED_KEY_SIZE: usize = WRAP_PUBLIC_KEY_SIZE + KEY_SIZE + TAG_SIZE;

/// Label for HKDF domain separation.
const WRAP_LABEL: &[u8] = b"parley key wrap v1";

/// Wrap a message key under a recipient's public key.
///
/// The expensive asymmetric operation runs once per recipient and its cost
/// is independent of message size; the message itself is sealed exactly once
/// with [`crate::seal_bytes`]. Output is always [`WRAPPED_KEY_SIZE`] bytes.
pub fn wrap_key(key: &MessageKey, recipient: &WrapPublicKey) -> Vec<u8> {
    let ephemeral = EphemeralSecret::random_from_rng(OsRng);
    let ephemeral_pk = PublicKey::from(&ephemeral);
    let shared = ephemeral.diffie_hellman(&recipient.into());

    let (aead_key, nonce) = derive_wrap_material(&shared, &ephemeral_pk, recipient);

    let cipher = XChaCha20Poly1305::new(&aead_key.into());
    let Ok(encrypted_key) = cipher.encrypt(XNonce::from_slice(&nonce), key.as_bytes().as_slice())
    else {
        unreachable!("XChaCha20-Poly1305 encryption cannot fail with valid inputs");
    };

    let mut wrapped = Vec::with_capacity(WRAPPED_KEY_SIZE);
    wrapped.extend_from_slice(ephemeral_pk.as_bytes());
    wrapped.extend_from_slice(&encrypted_key);
    wrapped
}

/// Unwrap a wrapped key with the recipient's private key.
///
/// All-or-nothing: a wrong or rotated private key, corrupted bytes, or a
/// malformed length all fail with [`CryptoError::UnwrapFailed`] and return
/// no partial key material.
pub fn unwrap_key(wrapped: &[u8], private: &WrapPrivateKey) -> Result<MessageKey, CryptoError> {
    if wrapped.len() != WRAPPED_KEY_SIZE {
        return Err(CryptoError::UnwrapFailed);
    }

    let (ephemeral_bytes, encrypted_key) = wrapped.split_at(WRAP_PUBLIC_KEY_SIZE);
    let ephemeral_arr: [u8; WRAP_PUBLIC_KEY_SIZE] =
        ephemeral_bytes.try_into().map_err(|_| CryptoError::UnwrapFailed)?;
    let ephemeral_pk = PublicKey::from(ephemeral_arr);

    let secret = private.to_static_secret();
    let shared = secret.diffie_hellman(&ephemeral_pk);
    if !shared.was_contributory() {
        // Low-order ephemeral point: attacker-controlled, reject outright.
        return Err(CryptoError::UnwrapFailed);
    }

    let recipient_pk = WrapPublicKey::from(PublicKey::from(&secret));
    let (aead_key, nonce) = derive_wrap_material(&shared, &ephemeral_pk, &recipient_pk);

    let cipher = XChaCha20Poly1305::new(&aead_key.into());
    let mut key_bytes: Vec<u8> = cipher
        .decrypt(XNonce::from_slice(&nonce), encrypted_key)
        .map_err(|_| CryptoError::UnwrapFailed)?;

    if key_bytes.len() != KEY_SIZE {
        key_bytes.zeroize();
        return Err(CryptoError::UnwrapFailed);
    }
    let mut arr = [0u8; KEY_SIZE];
    arr.copy_from_slice(&key_bytes);
    key_bytes.zeroize();

    Ok(MessageKey::from_bytes(arr))
}

/// Derive the AEAD key and nonce for one wrap operation.
///
/// Info parameter: `label || ephemeral_pk || recipient_pk`. Binding both
/// public keys means a wrap cannot be re-targeted at a different recipient.
fn derive_wrap_material(
    shared: &SharedSecret,
    ephemeral_pk: &PublicKey,
    recipient: &WrapPublicKey,
) -> ([u8; KEY_SIZE], [u8; 24]) {
    let hkdf = Hkdf::<Sha256>::new(None, shared.as_bytes());

    // Capacity: 18 (label) + 32 (ephemeral) + 32 (recipient) = 82
    let mut info = Vec::with_capacity(82);
    info.extend_from_slice(WRAP_LABEL);
    info.extend_from_slice(ephemeral_pk.as_bytes());
    info.extend_from_slice(recipient.as_bytes());

    let mut okm = [0u8; KEY_SIZE + 24];
    let Ok(()) = hkdf.expand(&info, &mut okm) else {
        unreachable!("56 bytes is a valid HKDF-SHA256 output length");
    };

    let mut aead_key = [0u8; KEY_SIZE];
    aead_key.copy_from_slice(&okm[..KEY_SIZE]);
    let mut nonce = [0u8; 24];
    nonce.copy_from_slice(&okm[KEY_SIZE..]);
    okm.zeroize();

    (aead_key, nonce)
}
