//! Access Control Adapters
//!
//! Implements the `AccessControl` port.
//!
//! - `RoleRegistry`: role membership with a per-role admin role
//! - `AllowAll` / `DenyAll` / `Unreachable`: fixed-answer doubles for tests

use crate::domain::{Address, RoleId};
use crate::ports::outbound::{AccessControl, AccessError, DEFAULT_ADMIN_ROLE};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

#[derive(Debug, Default)]
struct RoleData {
    members: HashSet<Address>,
    admin_role: Option<RoleId>,
}

impl RoleData {
    fn admin_role(&self) -> RoleId {
        self.admin_role.unwrap_or(DEFAULT_ADMIN_ROLE)
    }
}

/// Policy-backed role registry.
///
/// Each role is administered by another role, `DEFAULT_ADMIN_ROLE` unless
/// changed with [`RoleRegistry::set_role_admin`]. Only holders of a role's
/// admin role may grant or revoke it.
#[derive(Debug, Default)]
pub struct RoleRegistry {
    roles: RwLock<HashMap<RoleId, RoleData>>,
}

impl RoleRegistry {
    /// Create a registry where `admin` holds `DEFAULT_ADMIN_ROLE`.
    pub fn new(admin: Address) -> Self {
        let registry = Self::default();
        registry.grant_unchecked(DEFAULT_ADMIN_ROLE, admin);
        registry
    }

    /// Grant `role` to `account`. `sender` must hold the role's admin role.
    pub fn grant_role(
        &self,
        role: RoleId,
        account: Address,
        sender: Address,
    ) -> Result<(), AccessError> {
        self.check_admin(&role, &sender)?;
        self.grant_unchecked(role, account);
        Ok(())
    }

    /// Revoke `role` from `account`. `sender` must hold the role's admin role.
    pub fn revoke_role(
        &self,
        role: RoleId,
        account: Address,
        sender: Address,
    ) -> Result<(), AccessError> {
        self.check_admin(&role, &sender)?;
        self.revoke_unchecked(role, account);
        Ok(())
    }

    /// Give up `role`. `sender` must be `account` itself.
    pub fn renounce_role(
        &self,
        role: RoleId,
        account: Address,
        sender: Address,
    ) -> Result<(), AccessError> {
        if account != sender {
            return Err(AccessError::BadConfirmation);
        }
        self.revoke_unchecked(role, account);
        Ok(())
    }

    /// Change the role that administers `role`. `sender` must hold the
    /// role's current admin role.
    pub fn set_role_admin(
        &self,
        role: RoleId,
        admin_role: RoleId,
        sender: Address,
    ) -> Result<(), AccessError> {
        self.check_admin(&role, &sender)?;
        self.roles.write().entry(role).or_default().admin_role = Some(admin_role);
        debug!(
            "[qc-18] Admin of role 0x{} set to 0x{} by {}",
            hex::encode(role),
            hex::encode(admin_role),
            sender
        );
        Ok(())
    }

    /// Role administering `role`.
    pub fn get_role_admin(&self, role: &RoleId) -> RoleId {
        self.roles
            .read()
            .get(role)
            .map(RoleData::admin_role)
            .unwrap_or(DEFAULT_ADMIN_ROLE)
    }

    /// Number of accounts holding `role`.
    pub fn member_count(&self, role: &RoleId) -> usize {
        self.roles
            .read()
            .get(role)
            .map(|data| data.members.len())
            .unwrap_or(0)
    }

    fn check_admin(&self, role: &RoleId, sender: &Address) -> Result<(), AccessError> {
        let admin_role = self.get_role_admin(role);
        if !self.is_member(&admin_role, sender) {
            return Err(AccessError::MissingRole {
                account: *sender,
                role: admin_role,
            });
        }
        Ok(())
    }

    fn is_member(&self, role: &RoleId, account: &Address) -> bool {
        self.roles
            .read()
            .get(role)
            .is_some_and(|data| data.members.contains(account))
    }

    fn grant_unchecked(&self, role: RoleId, account: Address) {
        if self.roles.write().entry(role).or_default().members.insert(account) {
            info!("[qc-18] Role 0x{} granted to {}", hex::encode(role), account);
        }
    }

    fn revoke_unchecked(&self, role: RoleId, account: Address) {
        let removed = self
            .roles
            .write()
            .get_mut(&role)
            .is_some_and(|data| data.members.remove(&account));
        if removed {
            info!("[qc-18] Role 0x{} revoked from {}", hex::encode(role), account);
        }
    }
}

impl AccessControl for RoleRegistry {
    fn has_role(&self, role: &RoleId, account: &Address) -> Result<bool, AccessError> {
        Ok(self.is_member(role, account))
    }
}

/// Grants every role to every account.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl AccessControl for AllowAll {
    fn has_role(&self, _role: &RoleId, _account: &Address) -> Result<bool, AccessError> {
        Ok(true)
    }
}

/// Refuses every role to every account.
#[derive(Clone, Copy, Debug, Default)]
pub struct DenyAll;

impl AccessControl for DenyAll {
    fn has_role(&self, _role: &RoleId, _account: &Address) -> Result<bool, AccessError> {
        Ok(false)
    }
}

/// Access backend that can never be reached.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unreachable;

impl AccessControl for Unreachable {
    fn has_role(&self, _role: &RoleId, _account: &Address) -> Result<bool, AccessError> {
        Err(AccessError::Unavailable("policy backend offline".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::staking_module_manage_role;

    const ADMIN: Address = Address::new([0xad; 20]);
    const USER: Address = Address::new([0x05; 20]);

    #[test]
    fn test_new_grants_default_admin() {
        let roles = RoleRegistry::new(ADMIN);
        assert!(roles.has_role(&DEFAULT_ADMIN_ROLE, &ADMIN).unwrap());
        assert!(!roles.has_role(&DEFAULT_ADMIN_ROLE, &USER).unwrap());
    }

    #[test]
    fn test_admin_grants_and_revokes() {
        let roles = RoleRegistry::new(ADMIN);
        let manage = staking_module_manage_role();

        roles.grant_role(manage, USER, ADMIN).unwrap();
        assert!(roles.has_role(&manage, &USER).unwrap());
        assert_eq!(roles.member_count(&manage), 1);

        roles.revoke_role(manage, USER, ADMIN).unwrap();
        assert!(!roles.has_role(&manage, &USER).unwrap());
    }

    #[test]
    fn test_non_admin_cannot_grant() {
        let roles = RoleRegistry::new(ADMIN);
        let manage = staking_module_manage_role();

        let result = roles.grant_role(manage, USER, USER);
        assert_eq!(
            result,
            Err(AccessError::MissingRole {
                account: USER,
                role: DEFAULT_ADMIN_ROLE,
            })
        );
        assert!(!roles.has_role(&manage, &USER).unwrap());
    }

    #[test]
    fn test_custom_role_admin() {
        let roles = RoleRegistry::new(ADMIN);
        let manage = staking_module_manage_role();
        let operator_role = [0x0f; 32];

        roles.set_role_admin(manage, operator_role, ADMIN).unwrap();
        assert_eq!(roles.get_role_admin(&manage), operator_role);

        // The default admin no longer administers the role...
        assert!(roles.grant_role(manage, USER, ADMIN).is_err());

        // ...holders of the operator role do.
        roles.grant_role(operator_role, ADMIN, ADMIN).unwrap();
        roles.grant_role(manage, USER, ADMIN).unwrap();
        assert!(roles.has_role(&manage, &USER).unwrap());
    }

    #[test]
    fn test_set_role_admin_requires_current_admin() {
        let roles = RoleRegistry::new(ADMIN);
        let manage = staking_module_manage_role();
        let takeover_role = [0x0e; 32];

        assert_eq!(
            roles.set_role_admin(manage, takeover_role, USER),
            Err(AccessError::MissingRole {
                account: USER,
                role: DEFAULT_ADMIN_ROLE,
            })
        );
        assert_eq!(roles.get_role_admin(&manage), DEFAULT_ADMIN_ROLE);

        // Once handed over, the previous admin loses control too.
        let operator_role = [0x0f; 32];
        roles.set_role_admin(manage, operator_role, ADMIN).unwrap();
        assert!(roles.set_role_admin(manage, DEFAULT_ADMIN_ROLE, ADMIN).is_err());
        assert_eq!(roles.get_role_admin(&manage), operator_role);
    }

    #[test]
    fn test_renounce_only_for_self() {
        let roles = RoleRegistry::new(ADMIN);
        let manage = staking_module_manage_role();
        roles.grant_role(manage, USER, ADMIN).unwrap();

        assert_eq!(
            roles.renounce_role(manage, USER, ADMIN),
            Err(AccessError::BadConfirmation)
        );
        roles.renounce_role(manage, USER, USER).unwrap();
        assert!(!roles.has_role(&manage, &USER).unwrap());
    }

    #[test]
    fn test_fixed_doubles() {
        let role = staking_module_manage_role();
        assert!(AllowAll.has_role(&role, &USER).unwrap());
        assert!(!DenyAll.has_role(&role, &USER).unwrap());
        assert!(matches!(
            Unreachable.has_role(&role, &USER),
            Err(AccessError::Unavailable(_))
        ));
    }
}
