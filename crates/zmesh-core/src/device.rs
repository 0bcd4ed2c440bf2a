//! Device records

use crate::address::DeviceAddress;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One known node on the mesh network.
///
/// A device is a plain value: construction is data assembly, and the
/// registry replaces whole records on every upsert.
///
/// Registry identity is the display string of [`Device::network_address`],
/// NOT the IEEE address. Two records upserted under the same network
/// address replace each other even when their IEEE addresses differ, and
/// a device re-joining under a new network address shows up as a second
/// entry. Kept this way for compatibility with existing state files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Global 64-bit hardware identifier
    pub ieee_address: u64,
    /// Current short address; mutable over the device's lifetime
    pub network_address: DeviceAddress,
    pub profile_id: u32,
    pub device_type: u32,
    pub device_id: u32,
    pub manufacturer_code: u32,
    pub device_version: u32,
    pub input_cluster_ids: Vec<u32>,
    pub output_cluster_ids: Vec<u32>,
    pub label: String,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MeshDevice label={}, networkAddress={}, ieeeAddress={:x}, profileId={}, \
             deviceType={}, deviceId={}, manufacturerCode={}, deviceVersion={}, \
             inputClusterIds={:?}, outputClusterIds={:?}",
            self.label,
            self.network_address,
            self.ieee_address,
            self.profile_id,
            self.device_type,
            self.device_id,
            self.manufacturer_code,
            self.device_version,
            self.input_cluster_ids,
            self.output_cluster_ids,
        )
    }
}
