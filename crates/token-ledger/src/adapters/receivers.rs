//! # Receiver Registry
//!
//! In-memory [`ReceiverHost`] adapter plus receiver implementations for
//! embedding applications and tests.
//!
//! The registry models the "recipient has code" distinction: registered
//! accounts are contract-like and get the acceptance callback; everything
//! else is a plain account and auto-accepts.

use crate::domain::value_objects::{Address, Amount, TokenId};
use crate::ports::outbound::{Acceptance, ReceiverHost, TransferReceiver};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// =============================================================================
// REGISTRY
// =============================================================================

/// Maps contract-like accounts to their acceptance callbacks.
#[derive(Default)]
pub struct ReceiverRegistry {
    receivers: HashMap<Address, Box<dyn TransferReceiver>>,
}

impl ReceiverRegistry {
    /// Creates a registry with no contract-like accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a receiver under `account`, replacing any previous one.
    pub fn register(&mut self, account: Address, receiver: Box<dyn TransferReceiver>) {
        self.receivers.insert(account, receiver);
    }

    /// Removes the receiver of `account`, turning it back into a plain
    /// account.
    pub fn deregister(&mut self, account: &Address) {
        self.receivers.remove(account);
    }

    /// Returns true if `account` is contract-like.
    #[must_use]
    pub fn is_registered(&self, account: &Address) -> bool {
        self.receivers.contains_key(account)
    }
}

impl ReceiverHost for ReceiverRegistry {
    fn receiver_for(&mut self, account: Address) -> Option<&mut (dyn TransferReceiver + 'static)> {
        self.receivers
            .get_mut(&account)
            .map(|receiver| &mut **receiver)
    }
}

impl std::fmt::Debug for ReceiverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiverRegistry")
            .field("registered", &self.receivers.len())
            .finish()
    }
}

// =============================================================================
// RECEIVERS
// =============================================================================

/// Receiver that accepts everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptingReceiver;

impl TransferReceiver for AcceptingReceiver {
    fn on_single_received(
        &mut self,
        _operator: Address,
        _from: Address,
        _id: TokenId,
        _amount: Amount,
    ) -> Acceptance {
        Acceptance::Accepted
    }

    fn on_batch_received(
        &mut self,
        _operator: Address,
        _from: Address,
        _ids: &[TokenId],
        _amounts: &[Amount],
    ) -> Acceptance {
        Acceptance::Accepted
    }
}

/// Receiver that rejects everything, like a contract returning an
/// unrecognized magic value.
#[derive(Clone, Copy, Debug, Default)]
pub struct RejectingReceiver;

impl TransferReceiver for RejectingReceiver {
    fn on_single_received(
        &mut self,
        _operator: Address,
        _from: Address,
        _id: TokenId,
        _amount: Amount,
    ) -> Acceptance {
        Acceptance::Rejected
    }

    fn on_batch_received(
        &mut self,
        _operator: Address,
        _from: Address,
        _ids: &[TokenId],
        _amounts: &[Amount],
    ) -> Acceptance {
        Acceptance::Rejected
    }
}

/// One observed acceptance callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReceivedCall {
    /// A single-transfer callback.
    Single {
        /// Initiating operator.
        operator: Address,
        /// Source account (zero for mints).
        from: Address,
        /// Credited identifier.
        id: TokenId,
        /// Credited quantity.
        amount: Amount,
    },
    /// A batch-transfer callback.
    Batch {
        /// Initiating operator.
        operator: Address,
        /// Source account (zero for mints).
        from: Address,
        /// Credited identifiers.
        ids: Vec<TokenId>,
        /// Credited quantities.
        amounts: Vec<Amount>,
    },
}

/// Receiver that records every callback and answers with a fixed verdict.
///
/// The call log is shared, so assertions stay possible after the receiver
/// is boxed into a registry.
#[derive(Clone, Debug)]
pub struct RecordingReceiver {
    verdict: Acceptance,
    calls: Arc<Mutex<Vec<ReceivedCall>>>,
}

impl RecordingReceiver {
    /// Creates a recording receiver that accepts.
    #[must_use]
    pub fn accepting() -> Self {
        Self {
            verdict: Acceptance::Accepted,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a recording receiver that rejects.
    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            verdict: Acceptance::Rejected,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the shared call log.
    #[must_use]
    pub fn calls(&self) -> Arc<Mutex<Vec<ReceivedCall>>> {
        Arc::clone(&self.calls)
    }
}

impl TransferReceiver for RecordingReceiver {
    fn on_single_received(
        &mut self,
        operator: Address,
        from: Address,
        id: TokenId,
        amount: Amount,
    ) -> Acceptance {
        self.calls.lock().unwrap().push(ReceivedCall::Single {
            operator,
            from,
            id,
            amount,
        });
        self.verdict
    }

    fn on_batch_received(
        &mut self,
        operator: Address,
        from: Address,
        ids: &[TokenId],
        amounts: &[Amount],
    ) -> Acceptance {
        self.calls.lock().unwrap().push(ReceivedCall::Batch {
            operator,
            from,
            ids: ids.to_vec(),
            amounts: amounts.to_vec(),
        });
        self.verdict
    }
}

// =============================================================================
// TESTS
// =============================================================================
