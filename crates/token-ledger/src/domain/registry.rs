//! # Collection Registry
//!
//! Tracks which collection identifiers have been explicitly created, their
//! creator, and their fungibility.
//!
//! ## Invariants
//!
//! - A collection is created at most once; creator and fungibility are
//!   immutable thereafter.
//! - Collections are never deleted.
//! - Instance identifiers are never registered; only collection-shaped
//!   identifiers (fungible ids and bare non-fungible collection ids) are.
//!
//! Whether creation happens explicitly or implicitly on first mint is a
//! deployment policy ([`CreationPolicy`]); the invariants above hold under
//! both.

use crate::domain::identifier::IdentifierCodec;
use crate::domain::value_objects::{Address, TokenId};
use crate::errors::{CodecError, LedgerError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// CREATION POLICY
// =============================================================================

/// How collections come into existence.
///
/// A constructor parameter of the engine, not two code paths: the state
/// machine is identical, only the reaction to a mint into an unregistered
/// collection differs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreationPolicy {
    /// Collections must be created explicitly before the first mint.
    #[default]
    Strict,
    /// The first mint registers the collection, with the minting operator
    /// recorded as creator.
    AutoCreate,
}

// =============================================================================
// RECORDS
// =============================================================================

/// Immutable facts about one created collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRecord {
    /// The creating account; never the zero address.
    pub creator: Address,
    /// Whether balances of this collection are interchangeable.
    pub fungible: bool,
}

/// Registry of created collections.
#[derive(Clone, Debug, Default)]
pub struct CollectionRegistry {
    records: HashMap<TokenId, CollectionRecord>,
}

impl CollectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collection.
    ///
    /// Returns the recorded fungibility on success.
    ///
    /// # Errors
    ///
    /// * `NotACollectionIdentifier` — `id` is a non-fungible instance.
    /// * `ZeroAddress` — `creator` is the null account.
    /// * `ExistingCollection` — `id` was already registered.
    pub fn create(
        &mut self,
        codec: &IdentifierCodec,
        id: TokenId,
        creator: Address,
    ) -> Result<bool, LedgerError> {
        if codec.is_non_fungible_instance(id) {
            return Err(CodecError::NotACollectionIdentifier { id }.into());
        }
        if creator.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        if self.records.contains_key(&id) {
            return Err(LedgerError::ExistingCollection { id });
        }
        let fungible = codec.is_fungible(id);
        self.records.insert(id, CollectionRecord { creator, fungible });
        Ok(fungible)
    }

    /// Returns true if the collection was created.
    #[must_use]
    pub fn is_created(&self, id: TokenId) -> bool {
        self.records.contains_key(&id)
    }

    /// Returns the record of a created collection.
    #[must_use]
    pub fn record(&self, id: TokenId) -> Option<&CollectionRecord> {
        self.records.get(&id)
    }

    /// Returns the creator, or the zero address for instances and
    /// unregistered identifiers.
    #[must_use]
    pub fn creator_of(&self, id: TokenId) -> Address {
        self.records
            .get(&id)
            .map_or(Address::ZERO, |record| record.creator)
    }

    /// Number of created collections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no collection was created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
