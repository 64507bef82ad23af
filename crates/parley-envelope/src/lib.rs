//! Parley Envelope Encryption
//!
//! Turns a plaintext chat message into a payload that every current chat
//! participant, and only them, can decrypt. The classic hybrid pattern: the
//! message is sealed once under a one-time symmetric key, and that key is
//! wrapped separately under each recipient's published public key.
//!
//! ```text
//! plaintext ──▶ Envelope::seal(recipients)
//!                   │
//!                   ├─▶ aead seal (once) ─────────▶ ciphertext
//!                   │
//!                   └─▶ per recipient:
//!                         directory lookup ──▶ key wrap ──▶ wrappedKeys[id]
//!
//! SealedMessage { ciphertext, wrappedKeys, encrypted } ──▶ persistence
//! ```
//!
//! On read, [`Envelope::open`] looks up the local identity's wrapped key,
//! unwraps it with the private key held in the [`parley_keystore::KeyStore`],
//! and decrypts.
//!
//! # Availability over completeness
//!
//! A recipient whose public key cannot be resolved at seal time is silently
//! excluded from `wrappedKeys`: the message still goes out for everyone else.
//! The flip side is a known gap — an excluded recipient (or one added to the
//! chat later) can never decrypt that historical ciphertext and gets
//! [`OpenError::KeyNotAvailable`]. Retroactive re-sealing is a product
//! decision this layer does not make.
//!
//! # Concurrency
//!
//! Seal and open are stateless per call; arbitrarily many may run in
//! parallel across messages. The only shared state is the key store (already
//! thread-safe) and whatever caching the directory implementation chooses.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod directory;
mod envelope;
mod error;
mod message;

pub use directory::{MemoryDirectory, RecipientDirectory};
pub use envelope::Envelope;
pub use error::{OpenError, SealError};
pub use message::{SealedMessage, UserId};
