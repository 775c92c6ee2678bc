//! # Driven Ports (Outbound)
//!
//! Interfaces the ledger depends on. External collaborators implement
//! these traits to provide:
//! - role checks (authorization collaborator)
//! - receiver-acceptance callbacks (receiver-notification collaborator)
//! - event delivery
//!
//! All ports are synchronous: the execution model is single-threaded,
//! serialized, and atomic-per-call, with no asynchronous suspension. The
//! enclosing environment totally orders concurrent callers, so the ledger
//! implements no locking of its own.

use crate::domain::value_objects::{Address, Amount, TokenId};
use crate::events::LedgerEvent;

// =============================================================================
// AUTHORIZATION (Role Collaborator)
// =============================================================================

/// Yes/no role checks consumed by the engine.
///
/// Role *management* (granting, revoking, enumeration) lives outside the
/// ledger; only the answers cross this boundary. On a `false` answer the
/// engine fails the operation (`NotMinter`, `NotPauser`, `NotOwner`) and
/// performs no state change.
pub trait Authorization {
    /// May `account` mint and create collections?
    fn is_minter(&self, account: Address) -> bool;

    /// May `account` toggle pausing?
    fn is_pauser(&self, account: Address) -> bool;

    /// Is `account` the deployment owner (layout administration)?
    fn is_owner(&self, account: Address) -> bool;
}

// =============================================================================
// RECEIVER NOTIFICATION (Acceptance Callbacks)
// =============================================================================

/// A receiver's verdict on an incoming transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Acceptance {
    /// The recognized acceptance value was returned.
    Accepted,
    /// Callback absent, failed, or returned an unrecognized value.
    Rejected,
}

impl Acceptance {
    /// Returns true for [`Acceptance::Accepted`].
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Acceptance callback of a contract-like recipient.
///
/// The engine commits all balance/ownership/supply mutations of the
/// current operation *before* invoking the callback, so a re-entrant read
/// observes fully consistent post-mutation state. A [`Acceptance::Rejected`]
/// verdict makes the engine restore its pre-operation checkpoint and fail
/// with `TransferRejected`. Burns never notify: the null account cannot
/// reject.
pub trait TransferReceiver {
    /// Called after a single mint or transfer crediting this receiver.
    ///
    /// `from` is the zero address for mints.
    fn on_single_received(
        &mut self,
        operator: Address,
        from: Address,
        id: TokenId,
        amount: Amount,
    ) -> Acceptance;

    /// Called after a batch mint or transfer crediting this receiver.
    ///
    /// `from` is the zero address for mints.
    fn on_batch_received(
        &mut self,
        operator: Address,
        from: Address,
        ids: &[TokenId],
        amounts: &[Amount],
    ) -> Acceptance;
}

/// Resolves recipient accounts to their acceptance callbacks.
///
/// A `None` resolution means the recipient has no code (a plain account)
/// and is treated as automatic acceptance.
pub trait ReceiverHost {
    /// Returns the recipient's callback, if it has one.
    fn receiver_for(&mut self, account: Address) -> Option<&mut (dyn TransferReceiver + 'static)>;
}

// =============================================================================
// EVENT SINK
// =============================================================================

/// Destination for committed ledger events.
///
/// The engine buffers events per operation and publishes them only after
/// the operation (receiver acceptance included) has fully succeeded.
pub trait EventSink {
    /// Delivers one event.
    fn publish(&mut self, event: LedgerEvent);
}

// =============================================================================
// TESTS
// =============================================================================
