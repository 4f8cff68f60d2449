//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for the Staking Router.

mod access_control;
mod event_sink;
mod execution_context;

pub use access_control::{AllowAll, DenyAll, RoleRegistry, Unreachable};
pub use event_sink::{BroadcastEventSink, InMemoryEventSink, TracingEventSink, DEFAULT_EVENT_CAPACITY};
pub use execution_context::{FixedExecutionContext, SystemExecutionContext};
