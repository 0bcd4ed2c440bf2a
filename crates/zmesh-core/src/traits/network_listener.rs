// # Network Listener Trait
//
// Defines the interface implemented by objects that need to be notified
// of device membership changes.
//
// ## Delivery Model
//
// The registry invokes listeners synchronously and sequentially, in
// registration order, after the triggering mutation has been applied to
// the device map. A slow listener delays the mutating caller and every
// listener after it in the same round. Group membership changes never
// notify listeners.
//
// ## Re-entrancy
//
// Callbacks run while the registry still holds the exclusive device-map
// lock of the triggering mutation plus a shared lock on the listener
// list. A listener must not call back into device mutation operations
// from inside a callback.
//
// ## Failures
//
// The registry does not catch panics raised by a listener; containment
// is the listener's own responsibility.

use crate::device::Device;

/// Trait implemented by observers of network membership changes.
///
/// Listeners are registered as `Arc<dyn NetworkListener>`. The registry
/// deduplicates and removes by pointer identity, so registering clones
/// of the same `Arc` twice keeps a single registration.
pub trait NetworkListener: Send + Sync {
    /// A device was upserted via `add_device`.
    ///
    /// Replacing an existing record still raises this event; callers who
    /// need a new-vs-changed distinction must check existence before the
    /// upsert.
    fn device_added(&self, device: &Device);

    /// A device was upserted via `update_device`.
    fn device_updated(&self, device: &Device);

    /// A device was removed.
    ///
    /// Fires even when the removed key was not present, with the value
    /// the caller passed in.
    fn device_removed(&self, device: &Device);
}
