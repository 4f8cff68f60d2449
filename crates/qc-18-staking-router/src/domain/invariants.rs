//! # Domain Invariants
//!
//! Bound checks applied to add/update requests, and the registry-wide rules
//! that must hold after every committed mutation.
//!
//! The request checks are pure and run before any state is touched. Each
//! returns the narrowed value it has proven in range.

use super::entities::StakingModule;
use super::errors::{RegistryError, RegistryResult};
use super::value_objects::{Address, BasisPoints, ModuleId, ModuleParams, TOTAL_BASIS_POINTS};
use primitive_types::U256;
use std::collections::{HashMap, HashSet};

/// Stake share limit and priority exit threshold within bounds.
pub fn check_share_limits(params: &ModuleParams) -> RegistryResult<(BasisPoints, BasisPoints)> {
    let stake_share_limit = BasisPoints::from_word(params.stake_share_limit)
        .ok_or(RegistryError::InvalidStakeShareLimit(params.stake_share_limit))?;

    let invalid_threshold = || RegistryError::InvalidPriorityExitShareThreshold {
        threshold: params.priority_exit_share_threshold,
        stake_share_limit: params.stake_share_limit,
    };
    let threshold =
        BasisPoints::from_word(params.priority_exit_share_threshold).ok_or_else(invalid_threshold)?;
    if threshold < stake_share_limit {
        return Err(invalid_threshold());
    }

    Ok((stake_share_limit, threshold))
}

/// Module fee plus treasury fee within 100%.
pub fn check_fee_sum(params: &ModuleParams) -> RegistryResult<(BasisPoints, BasisPoints)> {
    let invalid = || RegistryError::InvalidFeeSum {
        module_fee: params.module_fee,
        treasury_fee: params.treasury_fee,
    };

    let sum = params
        .module_fee
        .checked_add(params.treasury_fee)
        .ok_or_else(invalid)?;
    if sum > U256::from(TOTAL_BASIS_POINTS) {
        return Err(invalid());
    }

    // Both addends are bounded by the sum.
    let module_fee = BasisPoints::from_word(params.module_fee).ok_or_else(invalid)?;
    let treasury_fee = BasisPoints::from_word(params.treasury_fee).ok_or_else(invalid)?;
    Ok((module_fee, treasury_fee))
}

/// Module address is not zero.
pub fn check_address(address: &Address) -> RegistryResult<()> {
    if address.is_zero() {
        return Err(RegistryError::ZeroAddressStakingModule);
    }
    Ok(())
}

/// Name byte length within `1..=max_name_length`.
pub fn check_name(name: &str, max_name_length: usize) -> RegistryResult<()> {
    let length = name.len();
    if length == 0 || length > max_name_length {
        return Err(RegistryError::StakingModuleWrongName {
            length,
            max: max_name_length,
        });
    }
    Ok(())
}

/// Room for one more module.
pub fn check_capacity(count: usize, max_modules_count: usize) -> RegistryResult<()> {
    if count >= max_modules_count {
        return Err(RegistryError::StakingModulesLimitExceeded {
            max: max_modules_count,
        });
    }
    Ok(())
}

/// Deposit throughput limits fit in 64 bits, distance non-zero.
///
/// Returns `(max_deposits_per_block, min_deposit_block_distance)`.
pub fn check_deposit_limits(params: &ModuleParams) -> RegistryResult<(u64, u64)> {
    let distance = params.min_deposit_block_distance;
    if distance.is_zero() || distance > U256::from(u64::MAX) {
        return Err(RegistryError::InvalidMinDepositBlockDistance(distance));
    }

    let max_deposits = params.max_deposits_per_block;
    if max_deposits > U256::from(u64::MAX) {
        return Err(RegistryError::InvalidMaxDepositPerBlockValue(max_deposits));
    }

    Ok((max_deposits.low_u64(), distance.low_u64()))
}

/// Invariant: a stored module respects every per-module bound.
pub fn invariant_module_bounds(module: &StakingModule, max_name_length: usize) -> RegistryResult<()> {
    if module.priority_exit_share_threshold < module.stake_share_limit {
        return Err(RegistryError::InvalidPriorityExitShareThreshold {
            threshold: module.priority_exit_share_threshold.into(),
            stake_share_limit: module.stake_share_limit.into(),
        });
    }
    let fee_sum = u32::from(module.module_fee.get()) + u32::from(module.treasury_fee.get());
    if fee_sum > u32::from(TOTAL_BASIS_POINTS) {
        return Err(RegistryError::InvalidFeeSum {
            module_fee: module.module_fee.into(),
            treasury_fee: module.treasury_fee.into(),
        });
    }
    if module.min_deposit_block_distance == 0 {
        return Err(RegistryError::InvalidMinDepositBlockDistance(U256::zero()));
    }
    check_address(&module.address)?;
    check_name(&module.name, max_name_length)
}

/// Invariant: no two modules share an address.
pub fn invariant_unique_addresses(modules: &[StakingModule]) -> RegistryResult<()> {
    let mut seen = HashSet::new();
    for module in modules {
        if !seen.insert(module.address) {
            return Err(RegistryError::StakingModuleAddressExists(module.address));
        }
    }
    Ok(())
}

/// Invariant: the address index maps every module's address to its own
/// position and holds nothing else.
pub fn invariant_address_index(
    modules: &[StakingModule],
    index: &HashMap<Address, usize>,
) -> RegistryResult<()> {
    for (position, module) in modules.iter().enumerate() {
        if index.get(&module.address) != Some(&position) {
            return Err(RegistryError::StakingModuleAddressNotFound(module.address));
        }
    }
    for (address, &position) in index {
        if modules.get(position).map(|m| m.address) != Some(*address) {
            return Err(RegistryError::StakingModuleAddressNotFound(*address));
        }
    }
    Ok(())
}

/// Invariant: ids run 1, 2, 3, ... in storage order.
pub fn invariant_sequential_ids(modules: &[StakingModule]) -> RegistryResult<()> {
    for (index, module) in modules.iter().enumerate() {
        let expected = ModuleId::new(index as u64 + 1);
        if module.id != expected {
            return Err(RegistryError::StakingModuleNotFound(expected));
        }
    }
    Ok(())
}
