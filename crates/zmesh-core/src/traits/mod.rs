//! Core traits for the zmesh registry
//!
//! - [`NetworkListener`]: observers of device membership changes
//!
//! The [`crate::Address`] capability trait lives with its value types in
//! [`crate::address`].

pub mod network_listener;

pub use network_listener::NetworkListener;
