//! # Module Registry
//!
//! Authoritative in-memory state of the staking router: an append-only arena
//! of modules plus an address index.
//!
//! ```text
//! modules:    [ #1 ][ #2 ][ #3 ] ...      id = position + 1
//! by_address: { addr -> position }
//! ```
//!
//! Every mutating method validates the whole request first and only then
//! writes, so an `Err` leaves the registry untouched. Notifications are
//! returned to the caller in [`Applied`] instead of being sent from here.

use super::config::RegistryConfig;
use super::entities::StakingModule;
use super::errors::{RegistryError, RegistryResult};
use super::invariants::{
    check_address, check_capacity, check_deposit_limits, check_fee_sum, check_name,
    check_share_limits, invariant_address_index, invariant_module_bounds,
    invariant_sequential_ids, invariant_unique_addresses,
};
use super::value_objects::{
    Address, ModuleId, ModuleParams, ModuleStatus, Provenance, ValidatedParams,
};
use crate::events::RegistryEvent;
use primitive_types::U256;
use std::collections::HashMap;

/// Result of a committed mutation together with its ordered notifications.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied<T> {
    /// Operation result.
    pub value: T,
    /// Notifications, in emission order.
    pub events: Vec<RegistryEvent>,
}

impl<T> Applied<T> {
    fn new(value: T, events: Vec<RegistryEvent>) -> Self {
        Self { value, events }
    }
}

/// Staking module registry state.
#[derive(Clone, Debug)]
pub struct ModuleRegistry {
    config: RegistryConfig,
    modules: Vec<StakingModule>,
    by_address: HashMap<Address, usize>,
    last_module_id: u64,
}

impl ModuleRegistry {
    /// Create an empty registry.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            modules: Vec::new(),
            by_address: HashMap::new(),
            last_module_id: 0,
        }
    }

    /// Registry ceilings.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // === MUTATIONS ===

    /// Register a new module.
    ///
    /// Checks run in a fixed order and stop at the first failure: share
    /// limits, fee sum, zero address, name, capacity, duplicate address,
    /// deposit limits.
    pub fn add_module(
        &mut self,
        name: impl Into<String>,
        address: Address,
        params: &ModuleParams,
        caller: Address,
        provenance: Provenance,
    ) -> RegistryResult<Applied<ModuleId>> {
        let name = name.into();

        let (stake_share_limit, priority_exit_share_threshold) = check_share_limits(params)?;
        let (module_fee, treasury_fee) = check_fee_sum(params)?;
        check_address(&address)?;
        check_name(&name, self.config.max_name_length)?;
        check_capacity(self.modules.len(), self.config.max_modules_count)?;
        if self.by_address.contains_key(&address) {
            return Err(RegistryError::StakingModuleAddressExists(address));
        }
        let (max_deposits_per_block, min_deposit_block_distance) = check_deposit_limits(params)?;

        let validated = ValidatedParams {
            stake_share_limit,
            priority_exit_share_threshold,
            module_fee,
            treasury_fee,
            max_deposits_per_block,
            min_deposit_block_distance,
        };

        let id = ModuleId::new(self.last_module_id + 1);
        let module = StakingModule::new(id, address, name.clone(), validated, provenance);

        self.last_module_id = id.get();
        self.by_address.insert(address, self.modules.len());
        self.modules.push(module);

        let mut events = vec![
            RegistryEvent::Deposited {
                module_id: id,
                amount: U256::zero(),
            },
            RegistryEvent::ModuleAdded {
                module_id: id,
                address,
                name,
                caller,
            },
        ];
        events.extend(params_events(id, &validated, caller));

        Ok(Applied::new(id, events))
    }

    /// Replace the economic parameters of an existing module.
    ///
    /// Name, address, status, provenance and the exited validators counter
    /// are left as they are.
    pub fn update_module(
        &mut self,
        id: ModuleId,
        params: &ModuleParams,
        caller: Address,
    ) -> RegistryResult<Applied<()>> {
        let index = self.index_of(id)?;

        let (stake_share_limit, priority_exit_share_threshold) = check_share_limits(params)?;
        let (module_fee, treasury_fee) = check_fee_sum(params)?;
        let (max_deposits_per_block, min_deposit_block_distance) = check_deposit_limits(params)?;

        let validated = ValidatedParams {
            stake_share_limit,
            priority_exit_share_threshold,
            module_fee,
            treasury_fee,
            max_deposits_per_block,
            min_deposit_block_distance,
        };

        self.modules[index].apply_params(validated);

        Ok(Applied::new((), params_events(id, &validated, caller).into()))
    }

    /// Change a module's lifecycle status.
    pub fn set_module_status(
        &mut self,
        id: ModuleId,
        status: ModuleStatus,
        caller: Address,
    ) -> RegistryResult<Applied<()>> {
        let index = self.index_of(id)?;
        let module = &mut self.modules[index];
        if module.status == status {
            return Err(RegistryError::StakingModuleStatusTheSame { id, status });
        }
        module.status = status;

        Ok(Applied::new(
            (),
            vec![RegistryEvent::StatusSet {
                module_id: id,
                status,
                caller,
            }],
        ))
    }

    // === QUERIES ===

    /// Module by id.
    pub fn get_module(&self, id: ModuleId) -> RegistryResult<&StakingModule> {
        let index = self.index_of(id)?;
        Ok(&self.modules[index])
    }

    /// Module by address.
    pub fn get_module_by_address(&self, address: &Address) -> RegistryResult<&StakingModule> {
        self.by_address
            .get(address)
            .map(|&index| &self.modules[index])
            .ok_or(RegistryError::StakingModuleAddressNotFound(*address))
    }

    /// Number of registered modules.
    pub fn modules_count(&self) -> usize {
        self.modules.len()
    }

    /// All ids, ascending.
    pub fn module_ids(&self) -> Vec<ModuleId> {
        self.modules.iter().map(|m| m.id).collect()
    }

    /// All modules, in id order.
    pub fn modules(&self) -> &[StakingModule] {
        &self.modules
    }

    /// True when `id` is registered.
    pub fn has_module(&self, id: ModuleId) -> bool {
        self.index_of(id).is_ok()
    }

    /// Status of a module.
    pub fn module_status(&self, id: ModuleId) -> RegistryResult<ModuleStatus> {
        Ok(self.get_module(id)?.status)
    }

    /// True when the module is `Active`.
    pub fn is_module_active(&self, id: ModuleId) -> RegistryResult<bool> {
        Ok(self.get_module(id)?.is_active())
    }

    /// Check every registry-wide invariant.
    pub fn check_invariants(&self) -> RegistryResult<()> {
        if self.modules.len() > self.config.max_modules_count {
            return Err(RegistryError::StakingModulesLimitExceeded {
                max: self.config.max_modules_count,
            });
        }
        invariant_sequential_ids(&self.modules)?;
        invariant_unique_addresses(&self.modules)?;
        invariant_address_index(&self.modules, &self.by_address)?;
        for module in &self.modules {
            invariant_module_bounds(module, self.config.max_name_length)?;
        }
        Ok(())
    }

    fn index_of(&self, id: ModuleId) -> RegistryResult<usize> {
        let raw = id.get();
        if raw == 0 || raw > self.last_module_id {
            return Err(RegistryError::StakingModuleNotFound(id));
        }
        Ok((raw - 1) as usize)
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

fn params_events(id: ModuleId, params: &ValidatedParams, caller: Address) -> [RegistryEvent; 2] {
    [
        RegistryEvent::ShareLimitSet {
            module_id: id,
            stake_share_limit: params.stake_share_limit,
            priority_exit_share_threshold: params.priority_exit_share_threshold,
            caller,
        },
        RegistryEvent::FeesSet {
            module_id: id,
            module_fee: params.module_fee,
            treasury_fee: params.treasury_fee,
            caller,
        },
    ]
}
