//! # Inventory Ledger
//!
//! The balance/ownership/supply state machine.
//!
//! The ledger holds the raw state and enforces per-entry invariants; it does
//! not classify identifiers, consult the pause gate, or check caller rights.
//! Those concerns belong to the engine ([`crate::service::TransferEngine`]),
//! which decodes every identifier before calling in here and rolls the whole
//! ledger back if any step of an operation fails.
//!
//! ## State
//!
//! | Map | Key | Value |
//! |-----|-----|-------|
//! | balances | (account, identifier) | quantity; entries removed at zero |
//! | instances | instance identifier | owner + single-spender approval |
//! | burnt | instance identifier | membership = permanently burnt |
//! | supplies | identifier | minted quantity / instance count |
//! | operator approvals | (owner, operator) | membership = approved-for-all |
//!
//! ## Invariants
//!
//! - instance balances are 0 or 1;
//! - an account's aggregate balance of a non-fungible collection equals the
//!   number of its instances in that collection;
//! - a fungible identifier's supply equals the sum of its balances;
//! - burnt instances never re-enter `instances`.

use crate::domain::value_objects::{Address, Amount, TokenId, U256};
use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// =============================================================================
// RECORDS
// =============================================================================

/// Ownership record of one minted non-fungible instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// Current owner; never the zero address while the record exists.
    pub owner: Address,
    /// Single-spender approval; zero when unset. Cleared on every
    /// ownership change.
    pub approved: Address,
}

// =============================================================================
// LEDGER
// =============================================================================

/// In-memory balance/ownership/supply state.
#[derive(Clone, Debug, Default)]
pub struct InventoryLedger {
    balances: HashMap<(Address, TokenId), Amount>,
    instances: HashMap<TokenId, InstanceRecord>,
    burnt: HashSet<TokenId>,
    supplies: HashMap<TokenId, Amount>,
    operator_approvals: HashSet<(Address, Address)>,
}

impl InventoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Balance of `account` for `id` (collection aggregate or instance).
    #[must_use]
    pub fn balance_of(&self, account: Address, id: TokenId) -> Amount {
        self.balances
            .get(&(account, id))
            .copied()
            .unwrap_or_default()
    }

    /// Total supply of `id`: minted units for fungible identifiers,
    /// instance count for non-fungible collections, 0 or 1 for instances.
    #[must_use]
    pub fn total_supply(&self, id: TokenId) -> Amount {
        self.supplies.get(&id).copied().unwrap_or_default()
    }

    /// Current owner of an instance; None for never-minted or burnt ones.
    #[must_use]
    pub fn owner_of(&self, instance: TokenId) -> Option<Address> {
        self.instances.get(&instance).map(|record| record.owner)
    }

    /// Single-spender approval of an instance.
    ///
    /// # Errors
    ///
    /// Returns `NonExistingNft` if the instance has no current owner.
    pub fn approved_of(&self, instance: TokenId) -> Result<Address, LedgerError> {
        self.instances
            .get(&instance)
            .map(|record| record.approved)
            .ok_or(LedgerError::NonExistingNft { id: instance })
    }

    /// Returns true if `operator` is approved-for-all by `owner`.
    #[must_use]
    pub fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.operator_approvals.contains(&(owner, operator))
    }

    /// Returns true if the instance was burnt.
    #[must_use]
    pub fn is_burnt(&self, instance: TokenId) -> bool {
        self.burnt.contains(&instance)
    }

    /// Returns true if `operator` may move `holder`'s tokens: the holder
    /// itself, an operator-for-all, or (instances only) the approved
    /// spender.
    #[must_use]
    pub fn is_authorized(
        &self,
        holder: Address,
        operator: Address,
        instance: Option<TokenId>,
    ) -> bool {
        if operator == holder || self.operator_approvals.contains(&(holder, operator)) {
            return true;
        }
        instance.is_some_and(|id| {
            self.instances
                .get(&id)
                .is_some_and(|record| !record.approved.is_zero() && record.approved == operator)
        })
    }

    /// All non-zero balance entries.
    pub fn balances(&self) -> impl Iterator<Item = (Address, TokenId, Amount)> + '_ {
        self.balances
            .iter()
            .map(|(&(account, id), &amount)| (account, id, amount))
    }

    /// All live instance records.
    pub fn ownership(&self) -> impl Iterator<Item = (TokenId, &InstanceRecord)> + '_ {
        self.instances.iter().map(|(&id, record)| (id, record))
    }

    /// All non-zero supplies.
    pub fn supplies(&self) -> impl Iterator<Item = (TokenId, Amount)> + '_ {
        self.supplies.iter().map(|(&id, &amount)| (id, amount))
    }

    // -------------------------------------------------------------------------
    // Fungible mutations
    // -------------------------------------------------------------------------

    /// Mints `amount` units of a fungible identifier to `to`.
    ///
    /// # Errors
    ///
    /// * `ZeroValue` — `amount` is zero.
    /// * `SupplyOverflow` — the total supply would exceed the value domain.
    pub fn mint_fungible(
        &mut self,
        to: Address,
        id: TokenId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::ZeroValue);
        }
        let supply = self.total_supply(id);
        let new_supply = supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow { id })?;
        self.supplies.insert(id, new_supply);
        self.credit(to, id, amount);
        Ok(())
    }

    /// Moves `amount` units of a fungible identifier between accounts.
    ///
    /// A self-transfer is a balance no-op but still validates the amount
    /// against the holder's current balance.
    ///
    /// # Errors
    ///
    /// * `ZeroValue` — `amount` is zero.
    /// * `InsufficientBalance` — `from` holds less than `amount`.
    pub fn transfer_fungible(
        &mut self,
        from: Address,
        to: Address,
        id: TokenId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::ZeroValue);
        }
        self.debit(from, id, amount)?;
        self.credit(to, id, amount);
        Ok(())
    }

    /// Burns `amount` units of a fungible identifier from `from`.
    ///
    /// # Errors
    ///
    /// * `ZeroValue` — `amount` is zero.
    /// * `InsufficientBalance` — `from` holds less than `amount`.
    pub fn burn_fungible(
        &mut self,
        from: Address,
        id: TokenId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::ZeroValue);
        }
        self.debit(from, id, amount)?;
        self.reduce_supply(id, amount);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Instance mutations
    // -------------------------------------------------------------------------

    /// Mints one non-fungible instance to `to`, maintaining the owning
    /// collection's aggregate balance and supply.
    ///
    /// # Errors
    ///
    /// Returns `ExistingOrBurntNft` if the instance is currently owned or
    /// was burnt before; burnt instances are never re-mintable.
    pub fn mint_instance(
        &mut self,
        to: Address,
        collection: TokenId,
        instance: TokenId,
    ) -> Result<(), LedgerError> {
        if self.instances.contains_key(&instance) || self.burnt.contains(&instance) {
            return Err(LedgerError::ExistingOrBurntNft { id: instance });
        }
        self.instances.insert(
            instance,
            InstanceRecord {
                owner: to,
                approved: Address::ZERO,
            },
        );
        self.supplies.insert(instance, U256::one());
        let aggregate = self.total_supply(collection) + U256::one();
        self.supplies.insert(collection, aggregate);
        self.credit(to, instance, U256::one());
        self.credit(to, collection, U256::one());
        Ok(())
    }

    /// Moves one instance from `from` to `to`, clearing its single-spender
    /// approval and maintaining both collection aggregates.
    ///
    /// # Errors
    ///
    /// Returns `NonOwnedNft` unless `from` is the current owner (covers
    /// never-minted and burnt instances).
    pub fn transfer_instance(
        &mut self,
        from: Address,
        to: Address,
        collection: TokenId,
        instance: TokenId,
    ) -> Result<(), LedgerError> {
        match self.instances.get(&instance) {
            Some(record) if record.owner == from => {}
            _ => {
                return Err(LedgerError::NonOwnedNft {
                    id: instance,
                    claimed: from,
                })
            }
        }
        self.debit(from, instance, U256::one())?;
        self.debit(from, collection, U256::one())?;
        self.credit(to, instance, U256::one());
        self.credit(to, collection, U256::one());
        self.instances.insert(
            instance,
            InstanceRecord {
                owner: to,
                approved: Address::ZERO,
            },
        );
        Ok(())
    }

    /// Burns one instance, marking it permanently burnt and maintaining
    /// the owning collection's aggregate balance and supply.
    ///
    /// # Errors
    ///
    /// Returns `NonOwnedNft` unless `from` is the current owner.
    pub fn burn_instance(
        &mut self,
        from: Address,
        collection: TokenId,
        instance: TokenId,
    ) -> Result<(), LedgerError> {
        match self.instances.get(&instance) {
            Some(record) if record.owner == from => {}
            _ => {
                return Err(LedgerError::NonOwnedNft {
                    id: instance,
                    claimed: from,
                })
            }
        }
        self.debit(from, instance, U256::one())?;
        self.debit(from, collection, U256::one())?;
        self.instances.remove(&instance);
        self.burnt.insert(instance);
        self.supplies.remove(&instance);
        self.reduce_supply(collection, U256::one());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Approvals
    // -------------------------------------------------------------------------

    /// Toggles a blanket operator approval.
    pub fn set_approval_for_all(&mut self, owner: Address, operator: Address, approved: bool) {
        if approved {
            self.operator_approvals.insert((owner, operator));
        } else {
            self.operator_approvals.remove(&(owner, operator));
        }
    }

    /// Sets the single-spender approval of an instance; the zero address
    /// clears it. Returns the current owner.
    ///
    /// # Errors
    ///
    /// Returns `NonExistingNft` if the instance has no current owner.
    pub fn approve_instance(
        &mut self,
        instance: TokenId,
        spender: Address,
    ) -> Result<Address, LedgerError> {
        let record = self
            .instances
            .get_mut(&instance)
            .ok_or(LedgerError::NonExistingNft { id: instance })?;
        record.approved = spender;
        Ok(record.owner)
    }

    // -------------------------------------------------------------------------
    // Checkpointing
    // -------------------------------------------------------------------------

    /// Captures the full ledger state for later [`Self::restore`].
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Replaces the ledger state with a previously captured snapshot.
    pub fn restore(&mut self, snapshot: Self) {
        *self = snapshot;
    }

    // -------------------------------------------------------------------------
    // Internal bookkeeping
    // -------------------------------------------------------------------------

    fn credit(&mut self, account: Address, id: TokenId, amount: Amount) {
        // Balances are bounded by supplies, which are overflow-checked at
        // the mint sites.
        let entry = self.balances.entry((account, id)).or_default();
        *entry = *entry + amount;
    }

    fn debit(
        &mut self,
        account: Address,
        id: TokenId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(account, id);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        let remaining = available - amount;
        if remaining.is_zero() {
            self.balances.remove(&(account, id));
        } else {
            self.balances.insert((account, id), remaining);
        }
        Ok(())
    }

    fn reduce_supply(&mut self, id: TokenId, amount: Amount) {
        let remaining = self.total_supply(id).saturating_sub(amount);
        if remaining.is_zero() {
            self.supplies.remove(&id);
        } else {
            self.supplies.insert(id, remaining);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
