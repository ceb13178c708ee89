use landchain_chain::LedgerConfig;
use landchain_core::EventKind;
use landchain_registry::{Registry, RegistryConfig, RegistryError};
use landchain_storage::SnapshotStore;
use serde_json::json;
use tempfile::tempdir;

fn in_memory(difficulty: u32) -> Registry {
    let config = RegistryConfig {
        ledger: LedgerConfig {
            difficulty,
            mining_reward: 100,
        },
        ..RegistryConfig::in_memory()
    };
    Registry::new(config).unwrap()
}

#[test]
fn test_register_transfer_scenario() {
    let mut registry = in_memory(2);

    let registered = registry.register("LAND001", "John Doe", "123 Main St", json!({"area": 2500}));
    assert!(registered.ok);
    assert_eq!(registry.current_owner("LAND001"), Some("123 Main St"));
    assert_eq!(registry.ledger().len(), 2);

    let digest = registered.block_digest.unwrap();
    assert_eq!(digest.as_str().len(), 64);
    assert!(digest.as_str().starts_with("00"));

    let moved = registry.transfer("LAND001", "123 Main St", "456 Oak Ave", "Jane Smith", json!({}));
    assert!(moved.ok);
    assert_eq!(registry.current_owner("LAND001"), Some("456 Oak Ave"));
    assert_eq!(registry.ledger().len(), 3);

    let again = registry.register("LAND001", "John Doe", "123 Main St", json!({}));
    assert!(!again.ok);
    assert_eq!(registry.ledger().len(), 3);

    let missing = registry.try_transfer("LAND999", "a", "b", "B", json!({}));
    assert!(matches!(missing, Err(RegistryError::NotRegistered(_))));
    assert_eq!(registry.ledger().len(), 3);

    assert!(registry.verify());
}

#[test]
fn test_wrong_owner_leaves_state_unchanged() {
    let mut registry = in_memory(1);
    registry.register("LAND001", "John Doe", "123 Main St", json!({}));

    let response = registry.transfer("LAND001", "999 Fake Rd", "456 Oak Ave", "Jane Smith", json!({}));
    assert!(!response.ok);
    assert_eq!(
        response.message,
        "Only the current owner (123 Main St) can transfer this land"
    );
    assert_eq!(registry.current_owner("LAND001"), Some("123 Main St"));
    assert_eq!(registry.history("LAND001").len(), 1);
}

#[test]
fn test_history_counts_every_ownership_event() {
    let mut registry = in_memory(1);
    registry.register("LAND001", "A", "addr-a", json!({}));
    registry.register("LAND002", "Z", "addr-z", json!({}));
    registry.transfer("LAND001", "addr-a", "addr-b", "B", json!({}));
    registry.transfer("LAND001", "addr-b", "addr-c", "C", json!({}));

    let history = registry.history("LAND001");
    let kinds: Vec<EventKind> = history.iter().map(|r| r.event.kind).collect();
    assert_eq!(
        kinds,
        vec![EventKind::Register, EventKind::Transfer, EventKind::Transfer]
    );
    let indices: Vec<u64> = history.iter().map(|r| r.block_index).collect();
    assert_eq!(indices, vec![1, 3, 4]);
    assert_eq!(registry.current_owner("LAND001"), Some("addr-c"));
}

#[test]
fn test_snapshot_written_after_each_operation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blockchain_data.json");
    let config = RegistryConfig {
        ledger: LedgerConfig {
            difficulty: 1,
            mining_reward: 100,
        },
        snapshot_path: Some(path.clone()),
        ..RegistryConfig::default()
    };

    let mut registry = Registry::new(config.clone()).unwrap();
    let response = registry.register("LAND001", "John Doe", "123 Main St", json!({}));
    assert!(response.persistence_error.is_none());

    let snapshot = SnapshotStore::new(&path).load().unwrap().unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.difficulty, 1);
    assert!(snapshot.pending_transactions.is_empty());
    assert_eq!(snapshot.chain[1].digest, response.block_digest.unwrap());

    // A restart does not restore history from the snapshot.
    let restarted = Registry::new(config).unwrap();
    assert_eq!(restarted.ledger().len(), 1);
    assert_eq!(restarted.current_owner("LAND001"), None);
}

#[test]
fn test_failed_save_keeps_mined_block() {
    let dir = tempdir().unwrap();
    let config = RegistryConfig {
        ledger: LedgerConfig {
            difficulty: 1,
            mining_reward: 100,
        },
        snapshot_path: Some(dir.path().join("missing").join("chain.json")),
        ..RegistryConfig::default()
    };
    let mut registry = Registry::new(config).unwrap();

    let response = registry.register("LAND001", "John Doe", "123 Main St", json!({}));
    assert!(response.ok);
    assert!(response.persistence_error.is_some());
    assert_eq!(registry.ledger().len(), 2);
    assert_eq!(registry.current_owner("LAND001"), Some("123 Main St"));
}
