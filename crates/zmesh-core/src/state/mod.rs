// # State Persistence
//
// Snapshot codec and file I/O for the registry. The codec is a pure
// transformation between snapshot values and bytes; locking stays in the
// registry and filesystem access stays in [`file`].

pub mod file;
pub mod snapshot;

pub use snapshot::NetworkSnapshot;
