//! # Inbound Ports
//!
//! API trait defining what the Staking Router can do.

use crate::domain::{Address, ModuleId, ModuleParams, ModuleStatus, RegistryResult, StakingModule};

/// Staking Router API - inbound port.
///
/// Mutations require the caller to hold the module management role. Queries
/// return snapshot copies.
pub trait StakingModuleApi: Send + Sync {
    /// Register a module and return its id.
    fn add_module(
        &self,
        name: &str,
        address: Address,
        params: &ModuleParams,
        caller: Address,
    ) -> RegistryResult<ModuleId>;

    /// Replace a module's share limits, fees and deposit limits.
    fn update_staking_module(
        &self,
        id: ModuleId,
        params: &ModuleParams,
        caller: Address,
    ) -> RegistryResult<()>;

    /// Change a module's lifecycle status.
    fn set_module_status(
        &self,
        id: ModuleId,
        status: ModuleStatus,
        caller: Address,
    ) -> RegistryResult<()>;

    /// Module by id.
    fn get_module(&self, id: ModuleId) -> RegistryResult<StakingModule>;

    /// Module by address.
    fn get_module_by_address(&self, address: &Address) -> RegistryResult<StakingModule>;

    /// Number of registered modules.
    fn get_modules_count(&self) -> usize;

    /// All module ids, ascending.
    fn get_module_ids(&self) -> Vec<ModuleId>;

    /// All modules, in id order.
    fn get_modules(&self) -> Vec<StakingModule>;

    /// True when `id` is registered.
    fn has_module(&self, id: ModuleId) -> bool;

    /// Status of a module.
    fn get_module_status(&self, id: ModuleId) -> RegistryResult<ModuleStatus>;

    /// True when the module is `Active`.
    fn is_module_active(&self, id: ModuleId) -> RegistryResult<bool>;
}
