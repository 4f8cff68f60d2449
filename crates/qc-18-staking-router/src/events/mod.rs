//! Events published by the Staking Router
//!
//! Notifications are produced by committed mutations and delivered after the
//! commit. Delivery is best effort.

pub mod published;

pub use published::RegistryEvent;
