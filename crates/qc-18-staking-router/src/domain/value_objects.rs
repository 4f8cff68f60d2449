//! # Domain Value Objects
//!
//! Immutable value types for the Staking Router.

use primitive_types::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 100% expressed in basis points.
pub const TOTAL_BASIS_POINTS: u16 = 10_000;

/// Role identifier (keccak256 of the role name).
pub type RoleId = [u8; 32];

/// 20-byte account / contract address.
///
/// Serialized as a `0x`-prefixed lowercase hex string.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// True for the all-zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let digits = s.strip_prefix("0x").unwrap_or(&s);
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes).map_err(serde::de::Error::custom)?;
        Ok(Self(bytes))
    }
}

/// Sequential staking module identifier, starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(u64);

impl ModuleId {
    /// Wrap a raw id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A share or fee in basis points, always within `0..=10000`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct BasisPoints(u16);

impl BasisPoints {
    /// 100%.
    pub const MAX: BasisPoints = BasisPoints(TOTAL_BASIS_POINTS);

    /// Create from a value within `0..=10000`.
    pub fn new(value: u16) -> Option<Self> {
        (value <= TOTAL_BASIS_POINTS).then_some(Self(value))
    }

    /// Narrow a 256-bit request word.
    pub fn from_word(word: U256) -> Option<Self> {
        if word > U256::from(TOTAL_BASIS_POINTS) {
            return None;
        }
        Some(Self(word.low_u32() as u16))
    }

    /// Raw value.
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for BasisPoints {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("{} exceeds {} basis points", value, TOTAL_BASIS_POINTS))
    }
}

impl From<BasisPoints> for u16 {
    fn from(bps: BasisPoints) -> Self {
        bps.0
    }
}

impl From<BasisPoints> for U256 {
    fn from(bps: BasisPoints) -> Self {
        U256::from(bps.0)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Module lifecycle status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleStatus {
    /// Accepting deposits.
    #[default]
    Active,
    /// Marked for priority exit processing.
    PendingExit,
    /// Fully exited.
    Exited,
}

impl ModuleStatus {
    /// True when the module is `Active`.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Economic parameters of an add or update request, as raw 256-bit words.
///
/// Words are narrowed to `BasisPoints` / `u64` only after every bound check
/// has passed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleParams {
    /// Stake share limit (bps).
    pub stake_share_limit: U256,
    /// Priority exit share threshold (bps).
    pub priority_exit_share_threshold: U256,
    /// Module fee (bps).
    pub module_fee: U256,
    /// Treasury fee (bps).
    pub treasury_fee: U256,
    /// Max deposits processed per block.
    pub max_deposits_per_block: U256,
    /// Min blocks between deposit batches.
    pub min_deposit_block_distance: U256,
}

impl ModuleParams {
    /// Build from anything convertible to a 256-bit word.
    pub fn new(
        stake_share_limit: impl Into<U256>,
        priority_exit_share_threshold: impl Into<U256>,
        module_fee: impl Into<U256>,
        treasury_fee: impl Into<U256>,
        max_deposits_per_block: impl Into<U256>,
        min_deposit_block_distance: impl Into<U256>,
    ) -> Self {
        Self {
            stake_share_limit: stake_share_limit.into(),
            priority_exit_share_threshold: priority_exit_share_threshold.into(),
            module_fee: module_fee.into(),
            treasury_fee: treasury_fee.into(),
            max_deposits_per_block: max_deposits_per_block.into(),
            min_deposit_block_distance: min_deposit_block_distance.into(),
        }
    }

    /// Replace the fee split.
    pub fn with_fees(mut self, module_fee: impl Into<U256>, treasury_fee: impl Into<U256>) -> Self {
        self.module_fee = module_fee.into();
        self.treasury_fee = treasury_fee.into();
        self
    }

    /// Replace the share limits.
    pub fn with_share_limits(
        mut self,
        stake_share_limit: impl Into<U256>,
        priority_exit_share_threshold: impl Into<U256>,
    ) -> Self {
        self.stake_share_limit = stake_share_limit.into();
        self.priority_exit_share_threshold = priority_exit_share_threshold.into();
        self
    }

    /// Replace the deposit throughput limits.
    pub fn with_deposit_limits(
        mut self,
        max_deposits_per_block: impl Into<U256>,
        min_deposit_block_distance: impl Into<U256>,
    ) -> Self {
        self.max_deposits_per_block = max_deposits_per_block.into();
        self.min_deposit_block_distance = min_deposit_block_distance.into();
        self
    }
}

/// Parameters after validation, narrowed to their stored widths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidatedParams {
    /// Stake share limit.
    pub stake_share_limit: BasisPoints,
    /// Priority exit share threshold.
    pub priority_exit_share_threshold: BasisPoints,
    /// Module fee.
    pub module_fee: BasisPoints,
    /// Treasury fee.
    pub treasury_fee: BasisPoints,
    /// Max deposits per block.
    pub max_deposits_per_block: u64,
    /// Min deposit block distance.
    pub min_deposit_block_distance: u64,
}

/// Creation-time provenance captured from the execution environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Unix timestamp (seconds) of the adding block.
    pub timestamp: u64,
    /// Number of the adding block.
    pub block_number: u64,
}

impl Provenance {
    /// Create provenance.
    pub fn new(timestamp: u64, block_number: u64) -> Self {
        Self {
            timestamp,
            block_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_zero() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::new([1u8; 20]).is_zero());
    }

    #[test]
    fn test_address_display_is_prefixed_hex() {
        let addr = Address::new([0x11; 20]);
        assert_eq!(addr.to_string(), format!("0x{}", "11".repeat(20)));
    }

    #[test]
    fn test_address_serde_hex() {
        let addr = Address::new([0xab; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(20)));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_address_deserialize_rejects_short_hex() {
        let result: Result<Address, _> = serde_json::from_str("\"0x1234\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_basis_points_bounds() {
        assert!(BasisPoints::new(0).is_some());
        assert!(BasisPoints::new(10_000).is_some());
        assert!(BasisPoints::new(10_001).is_none());
    }

    #[test]
    fn test_basis_points_from_wide_word() {
        assert_eq!(BasisPoints::from_word(U256::from(500u64)), BasisPoints::new(500));
        assert!(BasisPoints::from_word(U256::from(10_001u64)).is_none());
        // Low bits alone would look valid; the full word must be checked.
        assert!(BasisPoints::from_word(U256::from(1u64) << 64).is_none());
    }

    #[test]
    fn test_basis_points_deserialize_rejects_over_max() {
        let result: Result<BasisPoints, _> = serde_json::from_str("10001");
        assert!(result.is_err());
    }

    #[test]
    fn test_module_status_default_active() {
        assert_eq!(ModuleStatus::default(), ModuleStatus::Active);
        assert!(ModuleStatus::Active.is_active());
        assert!(!ModuleStatus::Exited.is_active());
    }

    #[test]
    fn test_module_params_builders() {
        let params = ModuleParams::new(100u64, 100u64, 500u64, 500u64, 150u64, 25u64)
            .with_fees(600u64, 400u64)
            .with_share_limits(200u64, 300u64);
        assert_eq!(params.module_fee, U256::from(600u64));
        assert_eq!(params.treasury_fee, U256::from(400u64));
        assert_eq!(params.stake_share_limit, U256::from(200u64));
        assert_eq!(params.priority_exit_share_threshold, U256::from(300u64));
        assert_eq!(params.max_deposits_per_block, U256::from(150u64));
    }
}
