//! Staking Router Service
//!
//! Orchestrates the registry with its collaborators:
//!
//! ```text
//! caller ──► authorize (AccessControl) ──► write lock ──► ModuleRegistry
//!                                                            │
//!                          EventSink ◄── dispatch ◄── Applied { value, events }
//! ```
//!
//! The write lock is the single-writer boundary: each mutation validates and
//! commits while holding it. The guard is then downgraded to a read guard
//! for dispatch, so queries proceed but the next writer waits until every
//! event of the previous commit has been delivered. Delivery order therefore
//! follows commit order. A failing sink is logged and never undoes the
//! commit. Sinks must not call back into a mutating operation.

use crate::domain::{
    Address, Applied, ModuleId, ModuleParams, ModuleRegistry, ModuleStatus, Provenance,
    RegistryConfig, RegistryError, RegistryResult, RoleId, StakingModule,
};
use crate::ports::{
    staking_module_manage_role, AccessControl, EventSink, ExecutionContext, StakingModuleApi,
};
use parking_lot::{RwLock, RwLockWriteGuard};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Dependencies for StakingModuleService
pub struct StakingRouterDependencies<A, C, S> {
    /// Role checks for mutating callers.
    pub access: Arc<A>,
    /// Block timestamp and number source.
    pub context: Arc<C>,
    /// Receives committed events.
    pub sink: Arc<S>,
    /// Registry ceilings.
    pub config: RegistryConfig,
}

/// Staking Router Service
pub struct StakingModuleService<A, C, S>
where
    A: AccessControl,
    C: ExecutionContext,
    S: EventSink,
{
    access: Arc<A>,
    context: Arc<C>,
    sink: Arc<S>,
    registry: RwLock<ModuleRegistry>,
    manage_role: RoleId,
}

impl<A, C, S> StakingModuleService<A, C, S>
where
    A: AccessControl,
    C: ExecutionContext,
    S: EventSink,
{
    /// Create a service over an empty registry.
    pub fn new(deps: StakingRouterDependencies<A, C, S>) -> Self {
        Self::with_registry(
            ModuleRegistry::new(deps.config),
            deps.access,
            deps.context,
            deps.sink,
        )
    }

    /// Create a service over existing registry state.
    pub fn with_registry(
        registry: ModuleRegistry,
        access: Arc<A>,
        context: Arc<C>,
        sink: Arc<S>,
    ) -> Self {
        Self {
            access,
            context,
            sink,
            registry: RwLock::new(registry),
            manage_role: staking_module_manage_role(),
        }
    }

    /// Role required for mutations.
    pub fn manage_role(&self) -> RoleId {
        self.manage_role
    }

    /// Registry ceilings.
    pub fn config(&self) -> RegistryConfig {
        self.registry.read().config().clone()
    }

    /// Copy of the full registry state.
    pub fn snapshot(&self) -> ModuleRegistry {
        self.registry.read().clone()
    }

    /// Check every registry-wide invariant against the current state.
    pub fn check_invariants(&self) -> RegistryResult<()> {
        self.registry.read().check_invariants()
    }

    /// Fail closed unless `caller` holds the management role.
    fn authorize(&self, caller: &Address) -> RegistryResult<()> {
        match self.access.has_role(&self.manage_role, caller) {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!("[qc-18] Rejected caller {}: missing manage role", caller);
                Err(self.unauthorized(caller))
            }
            Err(e) => {
                warn!("[qc-18] Rejected caller {}: access check failed: {}", caller, e);
                Err(self.unauthorized(caller))
            }
        }
    }

    fn unauthorized(&self, caller: &Address) -> RegistryError {
        RegistryError::Unauthorized {
            account: *caller,
            role: self.manage_role,
        }
    }

    fn current_provenance(&self) -> Provenance {
        Provenance::new(self.context.block_timestamp(), self.context.block_number())
    }

    /// Hand committed events to the sink, in order, before the next writer
    /// can commit.
    fn dispatch<T>(
        &self,
        registry: RwLockWriteGuard<'_, ModuleRegistry>,
        applied: Applied<T>,
    ) -> T {
        let _registry = RwLockWriteGuard::downgrade(registry);
        for event in applied.events {
            let name = event.name();
            let module_id = event.module_id();
            if let Err(e) = self.sink.publish(event) {
                warn!(
                    module_id = module_id.get(),
                    "[qc-18] Failed to deliver {} event: {}", name, e
                );
            }
        }
        applied.value
    }
}

impl<A, C, S> StakingModuleApi for StakingModuleService<A, C, S>
where
    A: AccessControl,
    C: ExecutionContext,
    S: EventSink,
{
    fn add_module(
        &self,
        name: &str,
        address: Address,
        params: &ModuleParams,
        caller: Address,
    ) -> RegistryResult<ModuleId> {
        self.authorize(&caller)?;
        let provenance = self.current_provenance();

        debug!("[qc-18] Adding module {:?} at {}", name, address);
        let mut registry = self.registry.write();
        let applied = registry
            .add_module(name, address, params, caller, provenance)
            .inspect_err(|e| debug!("[qc-18] Add of {} rejected: {}", address, e))?;

        info!(
            module_id = applied.value.get(),
            caller = %caller,
            "[qc-18] Staking module {:?} added at {}", name, address
        );
        Ok(self.dispatch(registry, applied))
    }

    fn update_staking_module(
        &self,
        id: ModuleId,
        params: &ModuleParams,
        caller: Address,
    ) -> RegistryResult<()> {
        self.authorize(&caller)?;

        debug!("[qc-18] Updating module {}", id);
        let mut registry = self.registry.write();
        let applied = registry
            .update_module(id, params, caller)
            .inspect_err(|e| debug!("[qc-18] Update of module {} rejected: {}", id, e))?;

        info!(module_id = id.get(), caller = %caller, "[qc-18] Staking module updated");
        self.dispatch(registry, applied);
        Ok(())
    }

    fn set_module_status(
        &self,
        id: ModuleId,
        status: ModuleStatus,
        caller: Address,
    ) -> RegistryResult<()> {
        self.authorize(&caller)?;

        let mut registry = self.registry.write();
        let applied = registry.set_module_status(id, status, caller)?;

        info!(
            module_id = id.get(),
            caller = %caller,
            "[qc-18] Staking module status set to {:?}", status
        );
        self.dispatch(registry, applied);
        Ok(())
    }

    fn get_module(&self, id: ModuleId) -> RegistryResult<StakingModule> {
        self.registry.read().get_module(id).cloned()
    }

    fn get_module_by_address(&self, address: &Address) -> RegistryResult<StakingModule> {
        self.registry.read().get_module_by_address(address).cloned()
    }

    fn get_modules_count(&self) -> usize {
        self.registry.read().modules_count()
    }

    fn get_module_ids(&self) -> Vec<ModuleId> {
        self.registry.read().module_ids()
    }

    fn get_modules(&self) -> Vec<StakingModule> {
        self.registry.read().modules().to_vec()
    }

    fn has_module(&self, id: ModuleId) -> bool {
        self.registry.read().has_module(id)
    }

    fn get_module_status(&self, id: ModuleId) -> RegistryResult<ModuleStatus> {
        self.registry.read().module_status(id)
    }

    fn is_module_active(&self, id: ModuleId) -> RegistryResult<bool> {
        self.registry.read().is_module_active(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        AllowAll, BroadcastEventSink, DenyAll, FixedExecutionContext, InMemoryEventSink,
        RoleRegistry, Unreachable,
    };
    use crate::events::RegistryEvent;

    const ADMIN: Address = Address::new([0xad; 20]);
    const USER: Address = Address::new([0x05; 20]);
    const MODULE: Address = Address::new([0x11; 20]);

    fn valid_params() -> ModuleParams {
        ModuleParams::new(100u64, 100u64, 500u64, 500u64, 150u64, 25u64)
    }

    fn service_with<A: AccessControl>(
        access: A,
    ) -> (
        StakingModuleService<A, FixedExecutionContext, InMemoryEventSink>,
        Arc<InMemoryEventSink>,
    ) {
        let sink = Arc::new(InMemoryEventSink::new());
        let service = StakingModuleService::new(StakingRouterDependencies {
            access: Arc::new(access),
            context: Arc::new(FixedExecutionContext::new(1_700_000_000, 100)),
            sink: Arc::clone(&sink),
            config: RegistryConfig::default(),
        });
        (service, sink)
    }

    #[test]
    fn test_add_captures_provenance() {
        let (service, _) = service_with(AllowAll);
        let id = service.add_module("m", MODULE, &valid_params(), ADMIN).unwrap();

        let module = service.get_module(id).unwrap();
        assert_eq!(module.added_at_timestamp, 1_700_000_000);
        assert_eq!(module.added_at_block, 100);
    }

    #[test]
    fn test_denied_caller_is_unauthorized() {
        let (service, sink) = service_with(DenyAll);
        let result = service.add_module("m", MODULE, &valid_params(), USER);

        assert_eq!(
            result,
            Err(RegistryError::Unauthorized {
                account: USER,
                role: staking_module_manage_role(),
            })
        );
        assert_eq!(service.get_modules_count(), 0);
        assert_eq!(sink.event_count(), 0);
    }

    #[test]
    fn test_unreachable_access_fails_closed() {
        let (service, _) = service_with(Unreachable);
        let result = service.add_module("m", MODULE, &valid_params(), ADMIN);
        assert!(matches!(result, Err(RegistryError::Unauthorized { .. })));
    }

    #[test]
    fn test_authorization_checked_before_validation() {
        let (service, _) = service_with(DenyAll);
        let params = valid_params().with_fees(10_000u64, 10_000u64);
        let result = service.add_module("", Address::ZERO, &params, USER);
        assert!(matches!(result, Err(RegistryError::Unauthorized { .. })));
    }

    #[test]
    fn test_authorization_checked_before_not_found() {
        let (service, _) = service_with(DenyAll);
        let result = service.update_staking_module(ModuleId::new(99), &valid_params(), USER);
        assert!(matches!(result, Err(RegistryError::Unauthorized { .. })));
    }

    #[test]
    fn test_role_registry_gates_mutations() {
        let roles = RoleRegistry::new(ADMIN);
        roles
            .grant_role(staking_module_manage_role(), ADMIN, ADMIN)
            .unwrap();
        let (service, _) = service_with(roles);

        assert!(service.add_module("m", MODULE, &valid_params(), ADMIN).is_ok());
        assert!(matches!(
            service.update_staking_module(ModuleId::new(1), &valid_params(), USER),
            Err(RegistryError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_events_dispatched_after_commit() {
        let (service, sink) = service_with(AllowAll);
        let id = service.add_module("m", MODULE, &valid_params(), ADMIN).unwrap();

        let events = sink.get_events();
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| e.module_id() == id));
        assert!(matches!(events[1], RegistryEvent::ModuleAdded { caller: ADMIN, .. }));
    }

    #[test]
    fn test_sink_failure_does_not_roll_back() {
        // No subscribers: every publish fails.
        let sink = Arc::new(BroadcastEventSink::new());
        let service = StakingModuleService::new(StakingRouterDependencies {
            access: Arc::new(AllowAll),
            context: Arc::new(FixedExecutionContext::new(0, 0)),
            sink,
            config: RegistryConfig::default(),
        });

        let id = service.add_module("m", MODULE, &valid_params(), ADMIN).unwrap();
        assert_eq!(service.get_modules_count(), 1);
        assert!(service.get_module(id).is_ok());
    }

    #[test]
    fn test_set_status_through_service() {
        let (service, sink) = service_with(AllowAll);
        let id = service.add_module("m", MODULE, &valid_params(), ADMIN).unwrap();
        sink.clear();

        service
            .set_module_status(id, ModuleStatus::Exited, ADMIN)
            .unwrap();
        assert_eq!(service.get_module_status(id).unwrap(), ModuleStatus::Exited);
        assert!(!service.is_module_active(id).unwrap());
        assert_eq!(sink.event_count(), 1);
    }

    #[test]
    fn test_snapshot_and_invariants() {
        let (service, _) = service_with(AllowAll);
        service.add_module("m", MODULE, &valid_params(), ADMIN).unwrap();

        let snapshot = service.snapshot();
        assert_eq!(snapshot.modules_count(), 1);
        assert!(service.check_invariants().is_ok());
        assert_eq!(service.config(), RegistryConfig::default());
    }
}
