//! Store operations over the JSON file backend.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;

use hostgate_core::repo::JsonFileRepository;
use hostgate_core::HostPolicyStore;

fn open(path: &std::path::Path) -> HostPolicyStore {
    HostPolicyStore::new(Arc::new(JsonFileRepository::open(path).unwrap()))
}

#[test]
fn policy_persists_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts.json");

    {
        let store = open(&path);
        store.create("testee").unwrap();
        store.create("other_guy").unwrap();
        store.befriend("testee", "other_guy").unwrap();
        store.set_allow_nonames("testee", true).unwrap();
        assert!(store.welcomes("testee", Some("other_guy")).unwrap());
    }

    let store = open(&path);
    assert!(store.welcomes("TESTEE", Some("OTHER_GUY")).unwrap());
    assert!(!store.welcomes("testee", None).unwrap());
    assert_eq!(store.create("testee").unwrap_err().client_code().as_str(), "CONFLICT");

    store.ban("testee", "other_guy").unwrap();
    drop(store);

    let store = open(&path);
    assert!(!store.welcomes("testee", Some("other_guy")).unwrap());
}

#[test]
fn document_uses_reference_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts.json");
    open(&path).create("testee").unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["hosts"][0]["uuid"], "TESTEE");
    assert_eq!(doc["hosts"][0]["only_friends"], true);
    assert_eq!(doc["hosts"][0]["allow_nonames"], false);
}
