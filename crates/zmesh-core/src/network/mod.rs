//! The network registry
//!
//! [`Network`] is the in-memory store of every device and multicast
//! group currently known on the mesh, plus the fan-out mechanism that
//! tells registered [`NetworkListener`]s about device membership
//! changes. Protocol-layer code calls the mutation operations here when
//! it learns of membership changes; nothing in this module discovers
//! anything on its own.
//!
//! ## Locking
//!
//! The device map, group map and listener list sit behind three
//! independent read/write locks. Operations on the same map are
//! linearizable; there is no ordering across maps. Listener notification
//! for a device mutation runs after the mutation is applied, while the
//! exclusive device-map lock is still held, under a shared lock on the
//! listener list. Listeners must not re-enter device mutations.
//!
//! ## Lifecycle
//!
//! Constructed once per process with [`Network::new`], hydrated with
//! [`Network::startup`], mutated for the process lifetime, flushed with
//! [`Network::shutdown`]. No filesystem access happens while a registry
//! lock is held.

use crate::address::{Address, GroupAddress};
use crate::config::NetworkConfig;
use crate::device::Device;
use crate::error::Result;
use crate::state::file;
use crate::state::snapshot::NetworkSnapshot;
use crate::traits::NetworkListener;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::info;

/// The mesh network topology registry.
///
/// The registry is the sole owner of the contained [`Device`] and
/// [`GroupAddress`] values; every read hands out copies.
pub struct Network {
    devices: RwLock<HashMap<String, Device>>,
    groups: RwLock<HashMap<u32, GroupAddress>>,
    listeners: RwLock<Vec<Arc<dyn NetworkListener>>>,
    reset: bool,
    state_file: PathBuf,
}

impl Network {
    /// Create an empty registry from the supplied configuration.
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            devices: RwLock::new(HashMap::new()),
            groups: RwLock::new(HashMap::new()),
            listeners: RwLock::new(Vec::new()),
            reset: config.reset,
            state_file: config.state_file,
        }
    }

    /// Hydrate the registry from its state file.
    ///
    /// A set reset flag or a missing file leaves the registry untouched.
    /// An unreadable or undecodable file is a fatal startup error; there
    /// is no partial-state fallback.
    pub async fn startup(&self) -> Result<()> {
        if self.reset {
            info!("network state reset requested, skipping hydration");
            return Ok(());
        }

        let Some(snapshot) = file::load(&self.state_file).await? else {
            return Ok(());
        };

        info!("loading network state from {}", self.state_file.display());
        self.restore(snapshot);
        info!("loading network state done");
        Ok(())
    }

    /// Flush the current registry contents to the state file,
    /// replacing any prior content.
    ///
    /// A failure here means topology knowledge is silently lost on the
    /// next restart, so it is returned loudly; the caller decides
    /// whether to retry or accept the loss.
    pub async fn shutdown(&self) -> Result<()> {
        info!("saving network state to {}", self.state_file.display());
        let snapshot = self.snapshot();
        file::save(&self.state_file, &snapshot).await?;
        info!("saving network state done");
        Ok(())
    }

    /// Add the group address to this network.
    ///
    /// An upsert keyed by group id; no listener is notified.
    pub fn add_group(&self, address: GroupAddress) {
        let mut groups = self.groups.write().unwrap();
        groups.insert(address.group_id, address);
    }

    /// Update the group address in this network.
    ///
    /// Same upsert as [`Network::add_group`]; the two names exist for
    /// call-site intent only.
    pub fn update_group(&self, address: GroupAddress) {
        let mut groups = self.groups.write().unwrap();
        groups.insert(address.group_id, address);
    }

    /// Remove a group address from this network. No-op if absent.
    pub fn remove_group(&self, address: &GroupAddress) {
        let mut groups = self.groups.write().unwrap();
        groups.remove(&address.group_id);
    }

    /// Retrieve the group address for the supplied group id.
    pub fn group(&self, group_id: u32) -> Option<GroupAddress> {
        let groups = self.groups.read().unwrap();
        groups.get(&group_id).cloned()
    }

    /// A snapshot copy of all group addresses, in unspecified order.
    pub fn groups(&self) -> Vec<GroupAddress> {
        let groups = self.groups.read().unwrap();
        groups.values().cloned().collect()
    }

    /// Add a device to the network.
    ///
    /// An upsert keyed by the device's network-address string; a record
    /// already present under that key is silently replaced and listeners
    /// still receive `device_added`. Every registered listener is
    /// invoked, in registration order, before this call returns.
    pub fn add_device(&self, device: Device) {
        let mut devices = self.devices.write().unwrap();
        devices.insert(device.network_address.to_string(), device.clone());
        let listeners = self.listeners.read().unwrap();
        for listener in listeners.iter() {
            listener.device_added(&device);
        }
    }

    /// Update an existing device.
    ///
    /// Identical upsert mechanics to [`Network::add_device`], but
    /// listeners receive `device_updated`.
    pub fn update_device(&self, device: Device) {
        let mut devices = self.devices.write().unwrap();
        devices.insert(device.network_address.to_string(), device.clone());
        let listeners = self.listeners.read().unwrap();
        for listener in listeners.iter() {
            listener.device_updated(&device);
        }
    }

    /// Remove the device from the network.
    ///
    /// Deletes by the device's network-address string regardless of the
    /// remaining fields. Listeners receive `device_removed` even when
    /// the key was absent.
    pub fn remove_device(&self, device: &Device) {
        let mut devices = self.devices.write().unwrap();
        devices.remove(&device.network_address.to_string());
        let listeners = self.listeners.read().unwrap();
        for listener in listeners.iter() {
            listener.device_removed(device);
        }
    }

    /// Retrieve the device for the supplied address.
    ///
    /// A group address can never resolve to a device, so the lookup
    /// short-circuits to `None` without touching the device map.
    pub fn device(&self, address: &impl Address) -> Option<Device> {
        if address.is_group() {
            return None;
        }
        let devices = self.devices.read().unwrap();
        devices.get(&address.to_string()).cloned()
    }

    /// A snapshot copy of all devices, in unspecified order.
    pub fn devices(&self) -> Vec<Device> {
        let devices = self.devices.read().unwrap();
        devices.values().cloned().collect()
    }

    /// Register a network listener.
    ///
    /// Idempotent: an `Arc` already registered (by pointer identity)
    /// stays registered once.
    pub fn add_network_listener(&self, listener: Arc<dyn NetworkListener>) {
        let mut listeners = self.listeners.write().unwrap();
        if listeners.iter().any(|existing| Arc::ptr_eq(existing, &listener)) {
            return;
        }
        listeners.push(listener);
    }

    /// Remove a network listener by pointer identity. No-op if absent.
    ///
    /// Removal swaps with the last entry; relative order among the
    /// remaining listeners is not contractual after a removal.
    pub fn remove_network_listener(&self, listener: &Arc<dyn NetworkListener>) {
        let mut listeners = self.listeners.write().unwrap();
        if let Some(index) = listeners.iter().position(|existing| Arc::ptr_eq(existing, listener)) {
            listeners.swap_remove(index);
        }
    }

    /// Copy the current maps into a [`NetworkSnapshot`].
    ///
    /// Takes shared locks on both maps for the duration of the copy and
    /// nothing else; callers are free to encode or discard the result.
    pub fn snapshot(&self) -> NetworkSnapshot {
        let devices = self.devices.read().unwrap();
        let groups = self.groups.read().unwrap();
        NetworkSnapshot {
            devices: devices.values().cloned().collect(),
            groups: groups.values().cloned().collect(),
        }
    }

    /// Apply a decoded snapshot to the registry.
    ///
    /// This is a merge, not a replace: every snapshot entry is upserted
    /// under its usual key, and entries already present in the registry
    /// but absent from the snapshot survive. Kept this way for
    /// compatibility with existing state files. No listener is notified.
    pub fn restore(&self, snapshot: NetworkSnapshot) {
        let mut devices = self.devices.write().unwrap();
        let mut groups = self.groups.write().unwrap();
        for device in snapshot.devices {
            devices.insert(device.network_address.to_string(), device);
        }
        for group in snapshot.groups {
            groups.insert(group.group_id, group);
        }
    }
}
