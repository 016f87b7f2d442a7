use super::test_prefix;
use crate::{IdentitySource, LocalIdentityResolver};

use std::sync::Arc;

use cl_core::StorageKey;
use cl_kv::{KeyValueStore, MemoryStore};
use googletest::prelude::*;

#[test]
fn given_empty_store_when_resolved_then_creates_and_persists_local_user() {
    let store = Arc::new(MemoryStore::new());
    let resolver = LocalIdentityResolver::new(store.clone(), &test_prefix());

    let identity = resolver.resolve_local();

    assert!(identity.id.starts_with("local-"));
    assert_that!(identity.display_name.as_str(), eq("Local User"));
    let key = StorageKey::local_user(&test_prefix());
    assert_that!(store.get(key.as_str()).unwrap(), some(anything()));
}

#[test]
fn given_persisted_local_user_when_resolved_again_then_same_identity() {
    let store = Arc::new(MemoryStore::new());
    let first = LocalIdentityResolver::new(store.clone(), &test_prefix()).resolve_local();

    let second = LocalIdentityResolver::new(store, &test_prefix()).resolve();

    assert_that!(second, some(eq(&first)));
}

#[test]
fn given_corrupt_entry_when_resolved_then_replaced_with_fresh_user() {
    let store = Arc::new(MemoryStore::new());
    let key = StorageKey::local_user(&test_prefix());
    store.set(key.as_str(), "{not json").unwrap();

    let identity = LocalIdentityResolver::new(store.clone(), &test_prefix()).resolve_local();

    let stored = store.get(key.as_str()).unwrap().unwrap();
    assert!(stored.contains(&identity.id));
}

#[test]
fn given_unwritable_store_when_resolved_then_identity_still_returned() {
    let store = Arc::new(MemoryStore::with_quota(0));
    let resolver = LocalIdentityResolver::new(store.clone(), &test_prefix());

    let identity = resolver.resolve_local();

    assert!(identity.id.starts_with("local-"));
    assert!(store.is_empty());
}
