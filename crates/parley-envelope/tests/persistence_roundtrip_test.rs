//! End-to-end flow through the persistence boundary.
//!
//! A sealed message crosses to the document store as an opaque structured
//! value and comes back on another device. These tests run the full
//! seal → encode → decode → open pipeline the way the message repository
//! drives it.

use std::collections::BTreeSet;

use parley_envelope::{Envelope, MemoryDirectory, OpenError, SealedMessage, UserId};
use parley_keystore::{KeyManager, KeyStore, MemoryKeyStore};

fn participant(
    user: &str,
    directory: &MemoryDirectory,
) -> Envelope<MemoryKeyStore, MemoryDirectory> {
    let keys = KeyManager::new(MemoryKeyStore::new(), user);
    let public = keys.ensure_key_pair().unwrap();
    directory.publish(UserId::from(user), public);
    Envelope::new(keys, directory.clone())
}

fn store_and_load(message: &SealedMessage) -> SealedMessage {
    let mut encoded = Vec::new();
    ciborium::ser::into_writer(message, &mut encoded).unwrap();
    ciborium::de::from_reader(&encoded[..]).unwrap()
}

#[tokio::test]
async fn sealed_message_survives_persistence() {
    let directory = MemoryDirectory::new();
    let alice = participant("alice", &directory);
    let bob = participant("bob", &directory);

    let recipients: BTreeSet<UserId> = [UserId::from("bob")].into();
    let sealed = alice.seal("see you at nine", &recipients).await.unwrap();

    let loaded = store_and_load(&sealed);

    assert_eq!(loaded, sealed);
    assert_eq!(bob.open(&loaded).unwrap(), "see you at nine");
    assert_eq!(alice.open(&loaded).unwrap(), "see you at nine");
}

#[tokio::test]
async fn plain_message_survives_persistence() {
    let directory = MemoryDirectory::new();
    let bob = participant("bob", &directory);

    let loaded = store_and_load(&SealedMessage::plain("no secrets here"));

    assert!(!loaded.encrypted);
    assert_eq!(bob.open(&loaded).unwrap(), "no secrets here");
}

#[tokio::test]
async fn late_joiner_cannot_read_history() {
    let directory = MemoryDirectory::new();
    let alice = participant("alice", &directory);
    let bob = participant("bob", &directory);

    let recipients: BTreeSet<UserId> = [UserId::from("bob")].into();
    let history = alice.seal("before carol joined", &recipients).await.unwrap();
    let loaded = store_and_load(&history);

    // Carol joins the chat after the message was sealed
    let carol = participant("carol", &directory);

    assert!(!loaded.can_open(&UserId::from("carol")));
    assert!(matches!(carol.open(&loaded), Err(OpenError::KeyNotAvailable)));
    // Existing participants are unaffected
    assert_eq!(bob.open(&loaded).unwrap(), "before carol joined");
}

#[tokio::test]
async fn unicode_content_round_trips() {
    let directory = MemoryDirectory::new();
    let alice = participant("alice", &directory);

    let text = "héllo wörld 👋 — こんにちは";
    let sealed = alice.seal(text, &BTreeSet::new()).await.unwrap();

    assert_eq!(alice.open(&store_and_load(&sealed)).unwrap(), text);
}

#[tokio::test]
async fn wiped_device_cannot_read_old_messages() {
    let directory = MemoryDirectory::new();
    let store = MemoryKeyStore::new();
    let keys = KeyManager::new(store.clone(), "alice");
    directory.publish(UserId::from("alice"), keys.ensure_key_pair().unwrap());
    let alice = Envelope::new(keys, directory.clone());

    let sealed = alice.seal("pre-wipe", &BTreeSet::new()).await.unwrap();
    let loaded = store_and_load(&sealed);

    // Local data wipe destroys the pair; the next access generates a new one
    store.wipe().unwrap();

    assert!(matches!(alice.open(&loaded), Err(OpenError::UnwrapFailed)));
}
