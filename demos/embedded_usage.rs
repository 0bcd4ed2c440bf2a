//! Minimal embedding example for zmesh-core
//!
//! This example demonstrates using the registry as a library in a custom
//! application: construct it, register a listener, mutate membership,
//! persist on shutdown and hydrate a second instance from the same file.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use zmesh_core::{
    Device, DeviceAddress, GroupAddress, Network, NetworkConfig, NetworkListener, Result,
};

/// Listener that counts fan-out calls.
#[derive(Default)]
struct CountingListener {
    added: AtomicUsize,
    updated: AtomicUsize,
    removed: AtomicUsize,
}

impl NetworkListener for CountingListener {
    fn device_added(&self, device: &Device) {
        self.added.fetch_add(1, Ordering::SeqCst);
        println!("[embedded] added: {}", device);
    }

    fn device_updated(&self, device: &Device) {
        self.updated.fetch_add(1, Ordering::SeqCst);
        println!("[embedded] updated: {}", device);
    }

    fn device_removed(&self, device: &Device) {
        self.removed.fetch_add(1, Ordering::SeqCst);
        println!("[embedded] removed: {}", device);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let state_file = std::env::temp_dir().join("zmesh-embedded-demo.json");

    // First instance: reset, so a leftover file from a previous run is
    // ignored.
    let network = Network::new(
        NetworkConfig::new()
            .with_state_file(&state_file)
            .with_reset(true),
    );
    network.startup().await?;

    let listener = Arc::new(CountingListener::default());
    network.add_network_listener(listener.clone());

    let bulb = Device {
        ieee_address: 0x00178801_02AABBCC,
        network_address: DeviceAddress::new(4660, 1),
        profile_id: 260,
        device_type: 1,
        device_id: 0x0100,
        manufacturer_code: 0x117c,
        device_version: 2,
        input_cluster_ids: vec![0, 3, 4, 6, 8],
        output_cluster_ids: vec![25],
        label: "bulb".to_string(),
    };

    network.add_device(bulb.clone());
    network.update_device(Device {
        label: "hall bulb".to_string(),
        ..bulb
    });
    network.add_group(GroupAddress::new(7, "living-room"));

    println!(
        "first instance: {} device(s), {} group(s), listener saw {} add / {} update",
        network.devices().len(),
        network.groups().len(),
        listener.added.load(Ordering::SeqCst),
        listener.updated.load(Ordering::SeqCst),
    );

    network.shutdown().await?;

    // Second instance hydrates from the file written above.
    let rehydrated = Network::new(NetworkConfig::new().with_state_file(&state_file));
    rehydrated.startup().await?;

    println!(
        "rehydrated instance: {} device(s), {} group(s)",
        rehydrated.devices().len(),
        rehydrated.groups().len(),
    );
    for device in rehydrated.devices() {
        println!("[rehydrated] {}", device);
    }

    Ok(())
}
