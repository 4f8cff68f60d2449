//! # Outbound Ports
//!
//! Collaborators the registry depends on: role checks, the block context
//! used for provenance, and the notification sink.

use crate::domain::{Address, RoleId};
use crate::events::RegistryEvent;
use sha3::{Digest, Keccak256};
use thiserror::Error;

/// Role id of the role administrator (all zero bytes).
pub const DEFAULT_ADMIN_ROLE: RoleId = [0u8; 32];

/// Name of the role allowed to add, update and change status of modules.
pub const STAKING_MODULE_MANAGE_ROLE_NAME: &str = "STAKING_MODULE_MANAGE_ROLE";

/// Role id for a role name: `keccak256(name)`.
pub fn role_id(name: &str) -> RoleId {
    let mut role = [0u8; 32];
    role.copy_from_slice(&Keccak256::digest(name.as_bytes()));
    role
}

/// Role id of the module management role.
pub fn staking_module_manage_role() -> RoleId {
    role_id(STAKING_MODULE_MANAGE_ROLE_NAME)
}

/// Access control errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Sender lacks the admin role needed for a role change.
    #[error("Account {account} is missing role 0x{}", hex::encode(.role))]
    MissingRole {
        /// Sender account
        account: Address,
        /// Required role
        role: RoleId,
    },

    /// An account may only renounce roles for itself.
    #[error("Can only renounce roles for self")]
    BadConfirmation,

    /// The policy backend could not be consulted.
    #[error("Access control unavailable: {0}")]
    Unavailable(String),
}

/// Notification sink errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// Nobody is listening.
    #[error("No subscribers for event {0}")]
    NoSubscribers(&'static str),

    /// Delivery failed.
    #[error("Event delivery failed: {0}")]
    Delivery(String),
}

/// Role-based access check - outbound port.
pub trait AccessControl: Send + Sync {
    /// Whether `account` holds `role`.
    ///
    /// `Err` means the answer is unknown; callers must treat it as a denial.
    fn has_role(&self, role: &RoleId, account: &Address) -> Result<bool, AccessError>;
}

/// Current block context - outbound port.
pub trait ExecutionContext: Send + Sync {
    /// Timestamp of the executing block (unix seconds).
    fn block_timestamp(&self) -> u64;

    /// Number of the executing block.
    fn block_number(&self) -> u64;
}

/// Fire-and-forget notification delivery - outbound port.
pub trait EventSink: Send + Sync {
    /// Deliver one event.
    fn publish(&self, event: RegistryEvent) -> Result<(), SinkError>;
}
