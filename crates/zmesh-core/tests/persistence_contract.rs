//! Contract test: persistence round-trip and hydration semantics
//!
//! Constraints verified:
//! - Shutdown then startup reproduces the same device/group sets
//!   (order-independent)
//! - Hydration merges into existing contents, it does not replace them
//! - The reset flag and a missing file both leave startup a no-op
//! - A corrupt state file is a fatal decode error naming the path
//! - The written file carries the documented wire field names

mod common;

use common::{device, group};
use std::path::Path;
use zmesh_core::{Error, Network, NetworkConfig, NetworkSnapshot};

fn network_at(path: &Path) -> Network {
    Network::new(NetworkConfig::new().with_state_file(path))
}

fn sorted_labels(network: &Network) -> Vec<String> {
    let mut labels: Vec<_> = network.devices().into_iter().map(|d| d.label).collect();
    labels.sort();
    labels
}

#[tokio::test]
async fn round_trip_through_shutdown_and_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("simple-network.json");

    let first = network_at(&path);
    first.add_device(device(1, 1, "bulb"));
    first.add_device(device(2, 1, "plug"));
    first.add_group(group(7, "living-room"));
    first.add_group(group(8, "garden"));
    first.shutdown().await.unwrap();

    let second = network_at(&path);
    second.startup().await.unwrap();

    assert_eq!(sorted_labels(&second), vec!["bulb", "plug"]);
    let mut group_ids: Vec<_> = second.groups().into_iter().map(|g| g.group_id).collect();
    group_ids.sort_unstable();
    assert_eq!(group_ids, vec![7, 8]);
    assert_eq!(second.group(7).unwrap().label, "living-room");
}

#[tokio::test]
async fn hydration_merges_instead_of_replacing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("simple-network.json");

    // File contains only Y.
    let writer = network_at(&path);
    writer.add_device(device(2, 1, "Y"));
    writer.shutdown().await.unwrap();

    // Registry already holds X before hydration.
    let reader = network_at(&path);
    reader.add_device(device(1, 1, "X"));
    reader.startup().await.unwrap();

    assert_eq!(sorted_labels(&reader), vec!["X", "Y"]);
}

#[test]
fn restore_is_a_merge_at_the_snapshot_level() {
    let network = Network::new(NetworkConfig::default());
    network.add_device(device(1, 1, "existing"));
    network.add_group(group(1, "existing"));

    network.restore(NetworkSnapshot {
        devices: vec![device(2, 1, "restored")],
        groups: vec![group(2, "restored")],
    });

    assert_eq!(network.devices().len(), 2);
    assert_eq!(network.groups().len(), 2);
}

#[test]
fn restore_upserts_under_the_usual_keys() {
    let network = Network::new(NetworkConfig::default());
    network.add_device(device(1, 1, "stale"));

    network.restore(NetworkSnapshot {
        devices: vec![device(1, 1, "fresh")],
        groups: Vec::new(),
    });

    assert_eq!(sorted_labels(&network), vec!["fresh"]);
}

#[tokio::test]
async fn reset_flag_skips_hydration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("simple-network.json");

    let writer = network_at(&path);
    writer.add_device(device(1, 1, "persisted"));
    writer.shutdown().await.unwrap();

    let reset = Network::new(
        NetworkConfig::new()
            .with_state_file(&path)
            .with_reset(true),
    );
    reset.startup().await.unwrap();

    assert!(reset.devices().is_empty());
    assert!(reset.groups().is_empty());
}

#[tokio::test]
async fn missing_file_is_a_clean_noop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never-written.json");

    let network = network_at(&path);
    network.startup().await.unwrap();

    assert!(network.devices().is_empty());
}

#[tokio::test]
async fn corrupt_file_is_a_fatal_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("simple-network.json");
    std::fs::write(&path, b"{\"devices\": 12}").unwrap();

    let network = network_at(&path);
    match network.startup().await {
        Err(Error::DecodeState { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn shutdown_truncates_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("simple-network.json");

    let first = network_at(&path);
    first.add_device(device(1, 1, "old"));
    first.add_device(device(2, 1, "older"));
    first.shutdown().await.unwrap();

    // Second run persists a single different device; the old contents
    // must not leak through.
    let second = Network::new(
        NetworkConfig::new()
            .with_state_file(&path)
            .with_reset(true),
    );
    second.startup().await.unwrap();
    second.add_device(device(3, 1, "only"));
    second.shutdown().await.unwrap();

    let third = network_at(&path);
    third.startup().await.unwrap();
    assert_eq!(sorted_labels(&third), vec!["only"]);
}

#[tokio::test]
async fn written_file_uses_wire_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("simple-network.json");

    let network = network_at(&path);
    network.add_device(device(4660, 1, "bulb"));
    network.add_group(group(9, "kitchen"));
    network.shutdown().await.unwrap();

    let value: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();

    let devices = value["devices"].as_array().unwrap();
    assert_eq!(devices.len(), 1);
    let d = &devices[0];
    for field in [
        "ieeeAddress",
        "networkAddress",
        "profileId",
        "deviceType",
        "deviceId",
        "manufacturerCode",
        "deviceVersion",
        "inputClusterIds",
        "outputClusterIds",
        "label",
    ] {
        assert!(d.get(field).is_some(), "device field {field} missing");
    }
    assert_eq!(d["networkAddress"], serde_json::json!({"networkAddress": 4660, "endpoint": 1}));

    let groups = value["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0], serde_json::json!({"groupId": 9, "label": "kitchen"}));
}

#[test]
fn snapshot_is_detached_from_live_mutation() {
    let network = Network::new(NetworkConfig::default());
    network.add_device(device(1, 1, "before"));

    let snapshot = network.snapshot();
    network.add_device(device(2, 1, "after"));

    assert_eq!(snapshot.devices.len(), 1);
    assert_eq!(network.devices().len(), 2);
}
