//! # Domain Errors
//!
//! Error types for the Staking Router subsystem.
//!
//! Every variant is a terminal, non-retryable failure. A failed call leaves
//! the registry exactly as it was.

use super::value_objects::{Address, ModuleId, ModuleStatus, RoleId};
use primitive_types::U256;
use thiserror::Error;

/// Staking Router error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Caller lacks the required role, or the access check could not be made.
    #[error("Unauthorized: account 0x{} is missing role 0x{}", hex::encode(.account), hex::encode(.role))]
    Unauthorized {
        /// Calling account
        account: Address,
        /// Role that was required
        role: RoleId,
    },

    /// Stake share limit above 100%.
    #[error("Invalid stake share limit: {0} bps (max 10000)")]
    InvalidStakeShareLimit(U256),

    /// Priority exit threshold above 100% or below the stake share limit.
    #[error("Invalid priority exit share threshold: {threshold} bps (stake share limit {stake_share_limit} bps)")]
    InvalidPriorityExitShareThreshold {
        /// Requested threshold
        threshold: U256,
        /// Requested stake share limit
        stake_share_limit: U256,
    },

    /// Module fee plus treasury fee above 100%.
    #[error("Invalid fee sum: module fee {module_fee} + treasury fee {treasury_fee} exceeds 10000 bps")]
    InvalidFeeSum {
        /// Requested module fee
        module_fee: U256,
        /// Requested treasury fee
        treasury_fee: U256,
    },

    /// Minimum deposit block distance is zero or wider than 64 bits.
    #[error("Invalid min deposit block distance: {0}")]
    InvalidMinDepositBlockDistance(U256),

    /// Max deposits per block is wider than 64 bits.
    #[error("Invalid max deposits per block: {0}")]
    InvalidMaxDepositPerBlockValue(U256),

    /// Module address is the zero address.
    #[error("Staking module address is zero")]
    ZeroAddressStakingModule,

    /// Module name is empty or too long.
    #[error("Wrong staking module name: length {length} (allowed 1..={max})")]
    StakingModuleWrongName {
        /// Name length in bytes
        length: usize,
        /// Configured maximum
        max: usize,
    },

    /// Module address already registered.
    #[error("Staking module address already registered: 0x{}", hex::encode(.0))]
    StakingModuleAddressExists(Address),

    /// Registry is full.
    #[error("Staking modules limit exceeded: {max}")]
    StakingModulesLimitExceeded {
        /// Configured maximum
        max: usize,
    },

    /// No module with this id.
    #[error("Staking module not found: {0}")]
    StakingModuleNotFound(ModuleId),

    /// No module registered under this address.
    #[error("No staking module at address 0x{}", hex::encode(.0))]
    StakingModuleAddressNotFound(Address),

    /// Status update would not change anything.
    #[error("Staking module {id} already has status {status:?}")]
    StakingModuleStatusTheSame {
        /// Module id
        id: ModuleId,
        /// Current status
        status: ModuleStatus,
    },

    /// Invalid registry configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
