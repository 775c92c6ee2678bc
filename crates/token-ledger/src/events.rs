//! # Event Schema
//!
//! Every state transition of the ledger is announced through these events.
//!
//! ## Dual-standard rule
//!
//! The ledger speaks two dialects over one state:
//!
//! | Dialect | Events | Emitted for |
//! |---------|--------|-------------|
//! | multi-balance | [`LedgerEvent::TransferSingle`], [`LedgerEvent::TransferBatch`] | every mint/burn/transfer |
//! | single-ownership | [`LedgerEvent::OwnershipTransfer`] | once per non-fungible instance touched |
//!
//! Fungible-only operations never emit the single-ownership event. Mints
//! use the zero address as source; burns use it as destination.
//!
//! Events are buffered per operation and published only after the whole
//! operation (receiver acceptance included) has succeeded, so a rejected
//! or failed operation is invisible to event consumers.

use crate::domain::value_objects::{Address, Amount, TokenId};
use serde::{Deserialize, Serialize};

/// A ledger event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// Aggregate movement of a single identifier (multi-balance dialect).
    TransferSingle {
        /// Account that initiated the operation.
        operator: Address,
        /// Source account; zero for mints.
        from: Address,
        /// Destination account; zero for burns.
        to: Address,
        /// Moved identifier.
        id: TokenId,
        /// Moved quantity (always 1 for instances).
        amount: Amount,
    },

    /// Aggregate movement of several identifiers (multi-balance dialect).
    TransferBatch {
        /// Account that initiated the operation.
        operator: Address,
        /// Source account; zero for mints.
        from: Address,
        /// Destination account; zero for burns.
        to: Address,
        /// Moved identifiers, in call order.
        ids: Vec<TokenId>,
        /// Moved quantities, parallel to `ids`.
        amounts: Vec<Amount>,
    },

    /// Ownership change of one non-fungible instance (single-ownership
    /// dialect). Emitted in addition to the aggregate event.
    OwnershipTransfer {
        /// Previous owner; zero for mints.
        from: Address,
        /// New owner; zero for burns.
        to: Address,
        /// The instance identifier.
        instance: TokenId,
    },

    /// Blanket operator approval toggled.
    ApprovalForAll {
        /// Granting holder.
        owner: Address,
        /// Operator being (dis)approved.
        operator: Address,
        /// New approval state.
        approved: bool,
    },

    /// Single-spender approval set on one instance.
    InstanceApproval {
        /// Current owner of the instance.
        owner: Address,
        /// Approved spender; zero clears the approval.
        spender: Address,
        /// The instance identifier.
        instance: TokenId,
    },

    /// A collection came into existence.
    CollectionCreated {
        /// The collection identifier.
        id: TokenId,
        /// The recorded creator.
        creator: Address,
        /// Whether balances of this collection are interchangeable.
        fungible: bool,
    },

    /// A collection entered the paused set.
    CollectionPaused {
        /// The paused collection identifier.
        id: TokenId,
    },

    /// A collection left the paused set.
    CollectionUnpaused {
        /// The unpaused collection identifier.
        id: TokenId,
    },

    /// The global pause flag changed.
    GlobalPauseSet {
        /// New flag state.
        paused: bool,
    },
}

impl LedgerEvent {
    /// Returns true for the two aggregate multi-balance transfer events.
    #[must_use]
    pub fn is_balance_transfer(&self) -> bool {
        matches!(
            self,
            Self::TransferSingle { .. } | Self::TransferBatch { .. }
        )
    }

    /// Returns true for the single-ownership dialect event.
    #[must_use]
    pub fn is_ownership_transfer(&self) -> bool {
        matches!(self, Self::OwnershipTransfer { .. })
    }
}

// =============================================================================
// TESTS
// =============================================================================
