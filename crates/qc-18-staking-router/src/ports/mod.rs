//! # Ports Layer (Hexagonal Architecture)
//!
//! - `inbound`: the API this subsystem offers
//! - `outbound`: the collaborators it needs

pub mod inbound;
pub mod outbound;

pub use inbound::StakingModuleApi;
pub use outbound::{
    role_id, staking_module_manage_role, AccessControl, AccessError, EventSink, ExecutionContext,
    SinkError, DEFAULT_ADMIN_ROLE, STAKING_MODULE_MANAGE_ROLE_NAME,
};
