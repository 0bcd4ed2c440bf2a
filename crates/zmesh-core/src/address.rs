//! Addressing for the mesh network
//!
//! Two address variants exist: unicast device addresses and multicast
//! group addresses. Both render to a display string and classify
//! themselves via the [`Address`] trait.
//!
//! The registry keys devices on the *display string* of their address,
//! not on structural equality, so two addresses with equal
//! `(network_address, endpoint)` always format to byte-identical
//! strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability trait shared by all mesh addresses.
pub trait Address: fmt::Display {
    /// Whether this address denotes a multicast group.
    fn is_group(&self) -> bool;
}

/// Unicast address of one communication endpoint on one device.
///
/// The `(network_address, endpoint)` pair is the identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAddress {
    /// Short network identifier assigned when the device joined
    pub network_address: u32,
    /// Endpoint on the device
    pub endpoint: u32,
}

impl DeviceAddress {
    /// Create a device address from its raw parts
    pub fn new(network_address: u32, endpoint: u32) -> Self {
        Self {
            network_address,
            endpoint,
        }
    }
}

impl Address for DeviceAddress {
    fn is_group(&self) -> bool {
        false
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network_address, self.endpoint)
    }
}

/// Multicast group address.
///
/// The group id alone is the identity; the label is descriptive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAddress {
    pub group_id: u32,
    pub label: String,
}

impl GroupAddress {
    /// Create a group address
    pub fn new(group_id: u32, label: impl Into<String>) -> Self {
        Self {
            group_id,
            label: label.into(),
        }
    }
}

impl Address for GroupAddress {
    fn is_group(&self) -> bool {
        true
    }
}

impl fmt::Display for GroupAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group_id, self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_address_string_form() {
        let address = DeviceAddress::new(4660, 1);
        assert_eq!(address.to_string(), "4660/1");
        assert!(!address.is_group());
    }

    #[test]
    fn equal_device_addresses_format_identically() {
        let a = DeviceAddress::new(7, 2);
        let b = DeviceAddress { network_address: 7, endpoint: 2 };
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn group_address_string_form() {
        let address = GroupAddress::new(9, "kitchen");
        assert_eq!(address.to_string(), "9/kitchen");
        assert!(address.is_group());
    }

    #[test]
    fn wire_field_names() {
        let json = serde_json::to_value(DeviceAddress::new(1, 2)).unwrap();
        assert_eq!(json, serde_json::json!({"networkAddress": 1, "endpoint": 2}));

        let json = serde_json::to_value(GroupAddress::new(3, "attic")).unwrap();
        assert_eq!(json, serde_json::json!({"groupId": 3, "label": "attic"}));
    }
}
