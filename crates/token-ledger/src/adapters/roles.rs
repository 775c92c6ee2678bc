//! # Role Table
//!
//! In-memory [`Authorization`] adapter. A production deployment would
//! answer these checks from its own access-control registry; this table
//! serves embedding applications and the test suite.

use crate::domain::value_objects::Address;
use crate::ports::outbound::Authorization;
use std::collections::{HashMap, HashSet};

/// Roles the ledger consults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// May mint and create collections.
    Minter,
    /// May toggle pausing.
    Pauser,
    /// Administers attribute layouts.
    Owner,
}

/// Role-to-accounts table.
#[derive(Clone, Debug, Default)]
pub struct RoleTable {
    grants: HashMap<Role, HashSet<Address>>,
}

impl RoleTable {
    /// Creates an empty table (nobody holds any role).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table granting every role to `account`.
    #[must_use]
    pub fn admin(account: Address) -> Self {
        let mut table = Self::new();
        table.grant(Role::Minter, account);
        table.grant(Role::Pauser, account);
        table.grant(Role::Owner, account);
        table
    }

    /// Grants a role to an account.
    pub fn grant(&mut self, role: Role, account: Address) {
        self.grants.entry(role).or_default().insert(account);
    }

    /// Revokes a role from an account.
    pub fn revoke(&mut self, role: Role, account: &Address) {
        if let Some(accounts) = self.grants.get_mut(&role) {
            accounts.remove(account);
        }
    }

    /// Returns true if the account holds the role.
    #[must_use]
    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|accounts| accounts.contains(account))
    }
}

impl Authorization for RoleTable {
    fn is_minter(&self, account: Address) -> bool {
        self.has_role(Role::Minter, &account)
    }

    fn is_pauser(&self, account: Address) -> bool {
        self.has_role(Role::Pauser, &account)
    }

    fn is_owner(&self, account: Address) -> bool {
        self.has_role(Role::Owner, &account)
    }
}

/// Authorization adapter that grants everything to everyone.
///
/// Test fixture for scenarios where role checks are not the subject.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl Authorization for AllowAll {
    fn is_minter(&self, _account: Address) -> bool {
        true
    }

    fn is_pauser(&self, _account: Address) -> bool {
        true
    }

    fn is_owner(&self, _account: Address) -> bool {
        true
    }
}

// =============================================================================
// TESTS
// =============================================================================
