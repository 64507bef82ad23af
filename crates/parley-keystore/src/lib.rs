//! Local key storage for Parley.
//!
//! A [`KeyStore`] holds at most one wrap key pair per identity and hands the
//! private half to callers only as a borrowed handle inside a scoped closure.
//! Key material never crosses the store boundary as raw bytes.
//!
//! [`KeyManager`] binds a store to one local identity and adds the lazy
//! generation and export semantics the envelope layer relies on.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod manager;
mod memory;

pub use error::KeyStoreError;
pub use manager::KeyManager;
pub use memory::MemoryKeyStore;

use parley_crypto::{WrapPrivateKey, WrapPublicKey};

/// Secure storage for per-identity wrap key pairs.
///
/// Must be `Clone` (shared between envelope instances), `Send + Sync`
/// (seal/open run on worker threads), and synchronous: implementations back
/// onto platform keystores whose primitives are already thread-safe, so no
/// async indirection is needed.
///
/// # Invariants
///
/// - At most one active key pair per identity
/// - `load_or_create` is idempotent: repeated calls return the same public key
/// - The private key is only observable inside `use_private_key`'s closure
pub trait KeyStore: Clone + Send + Sync + 'static {
    /// Load the identity's key pair, generating one if absent.
    ///
    /// Returns the public half only. Generation happens lazily on first use
    /// and the pair then lives until the store is wiped; rotation is not a
    /// store-level operation.
    fn load_or_create(&self, identity: &str) -> Result<WrapPublicKey, KeyStoreError>;

    /// Run `op` with scoped access to the identity's private key.
    ///
    /// The handle is borrowed for exactly the duration of one cryptographic
    /// operation and cannot escape the closure's stack frame. Generates the
    /// key pair first if the identity has none.
    fn use_private_key<T>(
        &self,
        identity: &str,
        op: impl FnOnce(&WrapPrivateKey) -> T,
    ) -> Result<T, KeyStoreError>;

    /// Remove all key pairs (local data wipe).
    ///
    /// The only way a key pair is ever destroyed.
    fn wipe(&self) -> Result<(), KeyStoreError>;
}
