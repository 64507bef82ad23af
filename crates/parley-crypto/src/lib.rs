//! Parley Cryptographic Primitives
//!
//! Building blocks for multi-recipient message encryption. Each chat message
//! is encrypted once under a one-time symmetric key, and that key is wrapped
//! separately for every recipient under their long-lived public key.
//!
//! # Key Lifecycle
//!
//! ```text
//! CSPRNG → MessageKey (one per sealed message)
//!              │
//!              ├─▶ AEAD Encryption → ciphertext blob (once per message)
//!              │
//!              └─▶ ECIES Wrap → wrapped key (once per recipient)
//!                       │
//!                       ▼
//!              recipient's X25519 public key
//! ```
//!
//! The message key is used for exactly one encryption operation plus the
//! per-recipient wraps, and is zeroized immediately when dropped. It is never
//! persisted or transmitted in the clear.
//!
//! # Security
//!
//! Confidentiality and Authenticity:
//! - XChaCha20-Poly1305 AEAD provides tamper-proof message encryption
//! - Fresh 24-byte random nonce per seal; nonces are never reused because
//!   both the key and the nonce are freshly generated per message
//! - Failed authentication tag -> reject blob, return no partial plaintext
//!
//! Key Wrapping:
//! - X25519 ECIES with a fresh ephemeral key pair per wrap
//! - HKDF-SHA256 binds the derived AEAD key to both the ephemeral and the
//!   recipient public key (no key-substitution confusion)
//! - Wrap output is fixed-size regardless of message length, so asymmetric
//!   cost scales with recipient count only
//!
//! Non-goals (by protocol design, see the envelope crate): forward secrecy,
//! key ratcheting, and identity verification beyond a trusted public key.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cipher;
mod error;
mod keys;
mod wrap;

pub use cipher::{KEY_SIZE, MessageKey, NONCE_SIZE, TAG_SIZE, open_bytes, seal_bytes};
pub use error::CryptoError;
pub use keys::{WRAP_PUBLIC_KEY_SIZE, WrapKeyPair, WrapPrivateKey, WrapPublicKey};
pub use wrap::{WRAPPED_KEY_SIZE, unwrap_key, wrap_key};
