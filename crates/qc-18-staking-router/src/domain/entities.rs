//! # Domain Entities
//!
//! The staking module entity held by the registry.

use super::value_objects::{
    Address, BasisPoints, ModuleId, ModuleStatus, Provenance, ValidatedParams,
};
use serde::{Deserialize, Serialize};

/// A registered staking module.
///
/// `id`, `address`, `name` and the provenance stamp are fixed at creation.
/// The economic parameters are replaced wholesale by an update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingModule {
    /// Sequential id, starting at 1.
    pub id: ModuleId,
    /// Module contract address.
    pub address: Address,
    /// Human-readable name.
    pub name: String,
    /// Lifecycle status.
    pub status: ModuleStatus,
    /// Cap on the module's share of total stake.
    pub stake_share_limit: BasisPoints,
    /// Share above which the module is prioritized for exits.
    pub priority_exit_share_threshold: BasisPoints,
    /// Reward share going to the module.
    pub module_fee: BasisPoints,
    /// Reward share going to the treasury.
    pub treasury_fee: BasisPoints,
    /// Max deposits processed per block.
    pub max_deposits_per_block: u64,
    /// Min blocks between deposit batches.
    pub min_deposit_block_distance: u64,
    /// Exited validators, maintained by exit reporting.
    pub exited_validators_count: u64,
    /// Timestamp of the block that added the module.
    pub added_at_timestamp: u64,
    /// Number of the block that added the module.
    pub added_at_block: u64,
}

impl StakingModule {
    /// Create a new `Active` module from validated parameters.
    pub fn new(
        id: ModuleId,
        address: Address,
        name: String,
        params: ValidatedParams,
        provenance: Provenance,
    ) -> Self {
        Self {
            id,
            address,
            name,
            status: ModuleStatus::Active,
            stake_share_limit: params.stake_share_limit,
            priority_exit_share_threshold: params.priority_exit_share_threshold,
            module_fee: params.module_fee,
            treasury_fee: params.treasury_fee,
            max_deposits_per_block: params.max_deposits_per_block,
            min_deposit_block_distance: params.min_deposit_block_distance,
            exited_validators_count: 0,
            added_at_timestamp: provenance.timestamp,
            added_at_block: provenance.block_number,
        }
    }

    /// Overwrite the economic parameters in place.
    pub fn apply_params(&mut self, params: ValidatedParams) {
        self.stake_share_limit = params.stake_share_limit;
        self.priority_exit_share_threshold = params.priority_exit_share_threshold;
        self.module_fee = params.module_fee;
        self.treasury_fee = params.treasury_fee;
        self.max_deposits_per_block = params.max_deposits_per_block;
        self.min_deposit_block_distance = params.min_deposit_block_distance;
    }

    /// Current economic parameters.
    pub fn params(&self) -> ValidatedParams {
        ValidatedParams {
            stake_share_limit: self.stake_share_limit,
            priority_exit_share_threshold: self.priority_exit_share_threshold,
            module_fee: self.module_fee,
            treasury_fee: self.treasury_fee,
            max_deposits_per_block: self.max_deposits_per_block,
            min_deposit_block_distance: self.min_deposit_block_distance,
        }
    }

    /// Creation provenance.
    pub fn provenance(&self) -> Provenance {
        Provenance::new(self.added_at_timestamp, self.added_at_block)
    }

    /// True when the module is `Active`.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bps(v: u16) -> BasisPoints {
        BasisPoints::new(v).unwrap()
    }

    fn create_test_params() -> ValidatedParams {
        ValidatedParams {
            stake_share_limit: bps(100),
            priority_exit_share_threshold: bps(100),
            module_fee: bps(500),
            treasury_fee: bps(500),
            max_deposits_per_block: 150,
            min_deposit_block_distance: 25,
        }
    }

    fn create_test_module() -> StakingModule {
        StakingModule::new(
            ModuleId::new(1),
            Address::new([7u8; 20]),
            "curated".to_string(),
            create_test_params(),
            Provenance::new(1_700_000_000, 42),
        )
    }

    #[test]
    fn test_new_module_defaults() {
        let module = create_test_module();
        assert_eq!(module.status, ModuleStatus::Active);
        assert_eq!(module.exited_validators_count, 0);
        assert_eq!(module.added_at_timestamp, 1_700_000_000);
        assert_eq!(module.added_at_block, 42);
        assert_eq!(module.params(), create_test_params());
    }

    #[test]
    fn test_apply_params_keeps_identity() {
        let mut module = create_test_module();
        let mut params = create_test_params();
        params.module_fee = bps(600);
        params.treasury_fee = bps(400);
        params.min_deposit_block_distance = u64::MAX;

        module.apply_params(params);

        assert_eq!(module.module_fee, bps(600));
        assert_eq!(module.treasury_fee, bps(400));
        assert_eq!(module.min_deposit_block_distance, u64::MAX);
        assert_eq!(module.id, ModuleId::new(1));
        assert_eq!(module.address, Address::new([7u8; 20]));
        assert_eq!(module.name, "curated");
        assert_eq!(module.provenance(), Provenance::new(1_700_000_000, 42));
    }
}
