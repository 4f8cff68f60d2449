//! # QC-18 Staking Router
//!
//! Registry of staking modules and their economic parameters.
//!
//! **Subsystem ID:** 18
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Keep the authoritative list of staking modules that receive deposits:
//! - Sequential module ids starting at 1, never reused
//! - Share limits, fees and deposit limits validated before any write
//! - Role-gated mutations with structured notifications after each commit
//!
//! ## Parameter Bounds
//!
//! | Parameter | Bound |
//! |-----------|-------|
//! | Stake share limit | ≤ 10 000 bp |
//! | Priority exit share threshold | stake share limit ≤ x ≤ 10 000 bp |
//! | Module fee + treasury fee | ≤ 10 000 bp |
//! | Min deposit block distance | 1 ≤ x ≤ 2^64 - 1 |
//! | Max deposits per block | ≤ 2^64 - 1 |
//! | Name | 1 ..= max name length bytes |
//!
//! ## Module Structure
//!
//! ```text
//! qc-18-staking-router/
//! ├── domain/          # Module entity, validation, registry aggregate
//! ├── events/          # Published notifications
//! ├── ports/           # API trait + dependency traits
//! ├── adapters/        # Role registry, clocks, event sinks
//! └── service.rs       # Authorization, locking, dispatch
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{
    AllowAll, BroadcastEventSink, DenyAll, FixedExecutionContext, InMemoryEventSink,
    RoleRegistry, SystemExecutionContext, TracingEventSink, Unreachable,
};
pub use domain::{
    Address, Applied, BasisPoints, ModuleId, ModuleParams, ModuleRegistry, ModuleStatus,
    Provenance, RegistryConfig, RegistryConfigBuilder, RegistryError, RegistryResult, RoleId,
    StakingModule, DEFAULT_MAX_MODULES_COUNT, DEFAULT_MAX_NAME_LENGTH, TOTAL_BASIS_POINTS,
};
pub use events::RegistryEvent;
pub use ports::{
    role_id, staking_module_manage_role, AccessControl, AccessError, EventSink, ExecutionContext,
    SinkError, StakingModuleApi, DEFAULT_ADMIN_ROLE, STAKING_MODULE_MANAGE_ROLE_NAME,
};
pub use service::{StakingModuleService, StakingRouterDependencies};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
