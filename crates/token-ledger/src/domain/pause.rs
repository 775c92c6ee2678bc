//! # Pause Gate
//!
//! Tracks paused collections and the global pause flag.
//!
//! The gate is consulted before every balance-mutating operation and is
//! mutated only through the engine's pauser-gated operations. Pausing is
//! collection-granular: pausing any identifier pauses its whole collection
//! (for fungible identifiers, the identifier *is* the collection).

use crate::domain::identifier::IdentifierCodec;
use crate::domain::value_objects::TokenId;
use crate::errors::LedgerError;
use std::collections::HashSet;

/// Paused-collection set plus the global flag.
#[derive(Clone, Debug, Default)]
pub struct PauseGate {
    paused: HashSet<TokenId>,
    global: bool,
}

impl PauseGate {
    /// Creates a gate with nothing paused.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an identifier's collection to the paused set.
    ///
    /// Returns false if the collection was already paused.
    pub fn pause(&mut self, codec: &IdentifierCodec, id: TokenId) -> bool {
        self.paused.insert(codec.collection_of(id))
    }

    /// Removes an identifier's collection from the paused set.
    ///
    /// Returns false if the collection was not paused.
    pub fn unpause(&mut self, codec: &IdentifierCodec, id: TokenId) -> bool {
        self.paused.remove(&codec.collection_of(id))
    }

    /// Sets the global flag. Returns true if the flag changed.
    pub fn set_global(&mut self, paused: bool) -> bool {
        let changed = self.global != paused;
        self.global = paused;
        changed
    }

    /// Returns the global flag.
    #[must_use]
    pub fn is_globally_paused(&self) -> bool {
        self.global
    }

    /// Returns true if the identifier's collection is in the paused set.
    #[must_use]
    pub fn is_paused(&self, codec: &IdentifierCodec, id: TokenId) -> bool {
        self.paused.contains(&codec.collection_of(id))
    }

    /// Gate check for a balance-mutating operation on `id`.
    ///
    /// # Errors
    ///
    /// * `Paused` — the global flag is set.
    /// * `IdIsPaused` — the identifier's collection is paused.
    pub fn check(&self, codec: &IdentifierCodec, id: TokenId) -> Result<(), LedgerError> {
        if self.global {
            return Err(LedgerError::Paused);
        }
        if self.is_paused(codec, id) {
            return Err(LedgerError::IdIsPaused { id });
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
