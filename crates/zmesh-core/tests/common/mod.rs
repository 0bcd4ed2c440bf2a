//! Test doubles and common utilities for registry contract tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use zmesh_core::{Device, DeviceAddress, GroupAddress, NetworkListener};

/// A single observed listener callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    Added(Device),
    Updated(Device),
    Removed(Device),
}

/// Listener that appends every callback to a shared, ordered log,
/// tagged with its own id.
///
/// Several `RecordingListener`s sharing one log make fan-out order
/// directly assertable.
pub struct RecordingListener {
    id: usize,
    log: Arc<Mutex<Vec<(usize, Observed)>>>,
}

impl RecordingListener {
    pub fn new(id: usize, log: Arc<Mutex<Vec<(usize, Observed)>>>) -> Self {
        Self { id, log }
    }
}

impl NetworkListener for RecordingListener {
    fn device_added(&self, device: &Device) {
        self.log
            .lock()
            .unwrap()
            .push((self.id, Observed::Added(device.clone())));
    }

    fn device_updated(&self, device: &Device) {
        self.log
            .lock()
            .unwrap()
            .push((self.id, Observed::Updated(device.clone())));
    }

    fn device_removed(&self, device: &Device) {
        self.log
            .lock()
            .unwrap()
            .push((self.id, Observed::Removed(device.clone())));
    }
}

/// Listener that only counts calls.
#[derive(Default)]
pub struct CountingListener {
    added: AtomicUsize,
    updated: AtomicUsize,
    removed: AtomicUsize,
}

impl CountingListener {
    pub fn added_count(&self) -> usize {
        self.added.load(Ordering::SeqCst)
    }

    pub fn updated_count(&self) -> usize {
        self.updated.load(Ordering::SeqCst)
    }

    pub fn removed_count(&self) -> usize {
        self.removed.load(Ordering::SeqCst)
    }
}

impl NetworkListener for CountingListener {
    fn device_added(&self, _device: &Device) {
        self.added.fetch_add(1, Ordering::SeqCst);
    }

    fn device_updated(&self, _device: &Device) {
        self.updated.fetch_add(1, Ordering::SeqCst);
    }

    fn device_removed(&self, _device: &Device) {
        self.removed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Device fixture with the given short address and label.
pub fn device(network_address: u32, endpoint: u32, label: &str) -> Device {
    Device {
        ieee_address: (u64::from(network_address) << 16) | u64::from(endpoint),
        network_address: DeviceAddress::new(network_address, endpoint),
        profile_id: 260,
        device_type: 1,
        device_id: 0x0100,
        manufacturer_code: 0x117c,
        device_version: 2,
        input_cluster_ids: vec![0, 3, 4],
        output_cluster_ids: vec![25],
        label: label.to_string(),
    }
}

/// Group fixture.
pub fn group(group_id: u32, label: &str) -> GroupAddress {
    GroupAddress::new(group_id, label)
}
