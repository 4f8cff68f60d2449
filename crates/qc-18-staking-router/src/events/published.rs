//! Published events (Outgoing)
//!
//! Emission order for an add:
//! `Deposited` → `ModuleAdded` → `ShareLimitSet` → `FeesSet`.
//!
//! An update emits only `ShareLimitSet` → `FeesSet`.

use crate::domain::{Address, BasisPoints, ModuleId, ModuleStatus};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Notification emitted by a committed registry mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RegistryEvent {
    /// Deposit accounting for a module. A new module starts at zero.
    Deposited {
        /// Module id
        module_id: ModuleId,
        /// Deposited amount
        amount: U256,
    },

    /// A module was registered.
    ModuleAdded {
        /// Assigned id
        module_id: ModuleId,
        /// Module address
        address: Address,
        /// Module name
        name: String,
        /// Account that added it
        caller: Address,
    },

    /// Stake share limit and priority exit threshold were set.
    ShareLimitSet {
        /// Module id
        module_id: ModuleId,
        /// New stake share limit
        stake_share_limit: BasisPoints,
        /// New priority exit threshold
        priority_exit_share_threshold: BasisPoints,
        /// Account that set them
        caller: Address,
    },

    /// Module and treasury fees were set.
    FeesSet {
        /// Module id
        module_id: ModuleId,
        /// New module fee
        module_fee: BasisPoints,
        /// New treasury fee
        treasury_fee: BasisPoints,
        /// Account that set them
        caller: Address,
    },

    /// Module status changed.
    StatusSet {
        /// Module id
        module_id: ModuleId,
        /// New status
        status: ModuleStatus,
        /// Account that set it
        caller: Address,
    },
}

impl RegistryEvent {
    /// Id of the module the event is about.
    pub fn module_id(&self) -> ModuleId {
        match self {
            Self::Deposited { module_id, .. }
            | Self::ModuleAdded { module_id, .. }
            | Self::ShareLimitSet { module_id, .. }
            | Self::FeesSet { module_id, .. }
            | Self::StatusSet { module_id, .. } => *module_id,
        }
    }

    /// Account that caused the event, if recorded.
    pub fn caller(&self) -> Option<Address> {
        match self {
            Self::Deposited { .. } => None,
            Self::ModuleAdded { caller, .. }
            | Self::ShareLimitSet { caller, .. }
            | Self::FeesSet { caller, .. }
            | Self::StatusSet { caller, .. } => Some(*caller),
        }
    }

    /// Short event name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Deposited { .. } => "Deposited",
            Self::ModuleAdded { .. } => "ModuleAdded",
            Self::ShareLimitSet { .. } => "ShareLimitSet",
            Self::FeesSet { .. } => "FeesSet",
            Self::StatusSet { .. } => "StatusSet",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors() {
        let caller = Address::new([9u8; 20]);
        let event = RegistryEvent::FeesSet {
            module_id: ModuleId::new(3),
            module_fee: BasisPoints::new(600).unwrap(),
            treasury_fee: BasisPoints::new(400).unwrap(),
            caller,
        };
        assert_eq!(event.module_id(), ModuleId::new(3));
        assert_eq!(event.caller(), Some(caller));
        assert_eq!(event.name(), "FeesSet");
    }

    #[test]
    fn test_deposited_has_no_caller() {
        let event = RegistryEvent::Deposited {
            module_id: ModuleId::new(1),
            amount: U256::zero(),
        };
        assert_eq!(event.caller(), None);
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = RegistryEvent::StatusSet {
            module_id: ModuleId::new(2),
            status: ModuleStatus::PendingExit,
            caller: Address::new([1u8; 20]),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "StatusSet");
        assert_eq!(json["module_id"], 2);
        assert_eq!(json["status"], "PendingExit");

        let back: RegistryEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
