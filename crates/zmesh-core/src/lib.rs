// # zmesh-core
//
// Core library for the zmesh topology registry.
//
// ## Architecture Overview
//
// This library is the bookkeeping layer of a low-power mesh network
// stack: it tracks which devices and multicast groups currently exist on
// the network and tells interested observers about membership changes.
//
// - **Address**: Unicast and group addressing behind one capability trait
// - **Device**: Value record describing one network node
// - **NetworkListener**: Trait for observers of device membership changes
// - **Network**: Concurrent registry of devices and groups with listener fan-out
// - **state**: Snapshot codec and file persistence for the registry
//
// The transport layer that actually discovers devices and delivers frames
// is a collaborator, not part of this crate: it calls the registry's
// mutation operations when it learns of membership changes.
//
// ## Design Principles
//
// 1. **Explicit construction**: The registry is an owned value passed by
//    reference wherever it is needed. No process-wide singleton.
// 2. **Copies out, whole values in**: Readers receive clones; every
//    upsert replaces a whole record under an exclusive lock.
// 3. **Mutate, then notify**: Listeners only ever observe a change that
//    has already been applied.
// 4. **No I/O under locks**: Startup and shutdown snapshot under shared
//    locks, then touch the filesystem with every lock released.

pub mod address;
pub mod config;
pub mod device;
pub mod error;
pub mod network;
pub mod state;
pub mod traits;

// Re-export core types for convenience
pub use address::{Address, DeviceAddress, GroupAddress};
pub use config::NetworkConfig;
pub use device::Device;
pub use error::{Error, Result};
pub use network::Network;
pub use state::NetworkSnapshot;
pub use traits::NetworkListener;
