//! # Domain Module
//!
//! Core domain types for the Staking Router subsystem.
//!
//! Everything in here is synchronous and free of I/O. Authorization,
//! provenance and event delivery live behind the ports.

pub mod config;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod registry;
pub mod value_objects;

pub use config::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use registry::*;
pub use value_objects::*;
