//! Serialized form of the registry
//!
//! The on-disk representation is a single JSON object with two arrays:
//!
//! ```json
//! {
//!   "devices": [ ... ],
//!   "groups": [ ... ]
//! }
//! ```
//!
//! Array order mirrors whatever the in-memory maps happened to iterate
//! and is not part of the contract; consumers must not depend on it.

use crate::address::GroupAddress;
use crate::device::Device;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Point-in-time copy of the registry contents, disconnected from
/// further live mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub devices: Vec<Device>,
    pub groups: Vec<GroupAddress>,
}

impl NetworkSnapshot {
    /// Encode the snapshot as UTF-8 JSON bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(Error::EncodeState)
    }

    /// Decode a snapshot from UTF-8 JSON bytes.
    ///
    /// Returns the raw serde error; [`super::file::load`] attaches the
    /// path of the file the bytes came from.
    pub fn decode(bytes: &[u8]) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
