//! X25519 key types for recipient key wrapping.
//!
//! One static key pair per local identity. The public half is freely
//! shareable (published to the recipient directory); the private half is
//! zeroized on drop and never exposes its bytes through `Debug`.

use rand::rngs::OsRng;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroize;

use crate::error::CryptoError;

/// Size of an X25519 public key in bytes.
pub const WRAP_PUBLIC_KEY_SIZE: usize = 32;

/// Size of an X25519 private key in bytes.
const WRAP_PRIVATE_KEY_SIZE: usize = 32;

/// Public half of a wrap key pair.
///
/// This is the value published to the recipient directory. The encoding is
/// the raw 32-byte Curve25519 point and is stable across calls, so a key
/// exported today matches the one exported tomorrow.
#[derive(Clone, PartialEq, Eq)]
pub struct WrapPublicKey {
    bytes: [u8; WRAP_PUBLIC_KEY_SIZE],
}

impl WrapPublicKey {
    /// Parse a public key from its raw 32-byte encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; WRAP_PUBLIC_KEY_SIZE] =
            bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
                expected: WRAP_PUBLIC_KEY_SIZE,
                actual: bytes.len(),
            })?;
        Ok(Self { bytes: arr })
    }

    /// Raw 32-byte encoding, suitable for publishing.
    pub fn as_bytes(&self) -> &[u8; WRAP_PUBLIC_KEY_SIZE] {
        &self.bytes
    }

    /// Owned copy of the raw encoding.
    pub fn to_bytes(&self) -> [u8; WRAP_PUBLIC_KEY_SIZE] {
        self.bytes
    }
}

impl std::fmt::Debug for WrapPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WrapPublicKey({:02x}{:02x}..)", self.bytes[0], self.bytes[1])
    }
}

impl From<PublicKey> for WrapPublicKey {
    fn from(key: PublicKey) -> Self {
        Self { bytes: key.to_bytes() }
    }
}

impl From<&WrapPublicKey> for PublicKey {
    fn from(key: &WrapPublicKey) -> Self {
        PublicKey::from(key.bytes)
    }
}

/// Private half of a wrap key pair.
///
/// Not cloneable and not printable: the only way application code touches
/// this type is as a borrowed handle inside a key-store scoped closure.
/// Zeroized on drop.
pub struct WrapPrivateKey {
    bytes: [u8; WRAP_PRIVATE_KEY_SIZE],
}

impl Drop for WrapPrivateKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl WrapPrivateKey {
    /// Generate a new private key from the OS CSPRNG.
    pub fn generate() -> Self {
        let secret = StaticSecret::random_from_rng(OsRng);
        Self { bytes: secret.to_bytes() }
    }

    /// Public key corresponding to this private key.
    pub fn public_key(&self) -> WrapPublicKey {
        let secret = StaticSecret::from(self.bytes);
        WrapPublicKey::from(PublicKey::from(&secret))
    }

    pub(crate) fn to_static_secret(&self) -> StaticSecret {
        StaticSecret::from(self.bytes)
    }
}

impl std::fmt::Debug for WrapPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WrapPrivateKey(..)")
    }
}

/// A static X25519 key pair bound to one local identity.
///
/// # Invariants
///
/// - The public half always matches the private half
/// - Never rotated automatically; a pair lives until its store is wiped
#[derive(Debug)]
pub struct WrapKeyPair {
    public: WrapPublicKey,
    private: WrapPrivateKey,
}

impl WrapKeyPair {
    /// Generate a fresh key pair from the OS CSPRNG.
    pub fn generate() -> Self {
        let private = WrapPrivateKey::generate();
        let public = private.public_key();
        Self { public, private }
    }

    /// Shareable public half.
    pub fn public_key(&self) -> &WrapPublicKey {
        &self.public
    }

    /// Private half, borrowed only.
    pub fn private_key(&self) -> &WrapPrivateKey {
        &self.private
    }
}
