//! # Domain Invariants
//!
//! Runtime-checkable invariants of the inventory ledger. The mutating
//! operations maintain these by construction; the checks exist so the test
//! suite can assert them after every scenario step instead of trusting the
//! bookkeeping.
//!
//! | Invariant | Statement |
//! |-----------|-----------|
//! | instance balances | every instance balance entry is exactly 1, and every live instance is backed by its owner's balance entry |
//! | collection aggregation | an account's aggregate balance of a non-fungible collection equals the count of its instances in that collection |
//! | supply conservation | for every identifier, total supply equals the sum of all balances |

use crate::domain::identifier::IdentifierCodec;
use crate::domain::ledger::InventoryLedger;
use crate::domain::value_objects::{Address, Amount, TokenId, U256};
use std::collections::HashMap;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Instance balances are 0 or 1, and live instances back their owner's
/// balance entry.
#[must_use]
pub fn check_instance_balances(ledger: &InventoryLedger, codec: &IdentifierCodec) -> bool {
    let entries_in_range = ledger
        .balances()
        .filter(|&(_, id, _)| codec.is_non_fungible_instance(id))
        .all(|(_, _, amount)| amount == U256::one());

    let owners_backed = ledger
        .ownership()
        .all(|(instance, record)| ledger.balance_of(record.owner, instance) == U256::one());

    entries_in_range && owners_backed
}

/// Aggregate non-fungible collection balances equal per-account instance
/// counts.
#[must_use]
pub fn check_collection_aggregation(ledger: &InventoryLedger, codec: &IdentifierCodec) -> bool {
    let counted = count_instances(ledger, codec);

    // Every counted pair is reflected in the aggregate balance...
    let counts_match = counted
        .iter()
        .all(|(&(account, collection), &count)| {
            ledger.balance_of(account, collection) == U256::from(count)
        });

    // ...and no stale aggregate entry survives without instances.
    let no_stale_aggregates = ledger
        .balances()
        .filter(|&(_, id, _)| codec.is_non_fungible_collection(id))
        .all(|(account, collection, amount)| {
            U256::from(
                counted
                    .get(&(account, collection))
                    .copied()
                    .unwrap_or_default(),
            ) == amount
        });

    counts_match && no_stale_aggregates
}

/// For every identifier, total supply equals the sum of all balances.
///
/// This covers all three identifier classes at once: fungible supplies
/// against their quantity balances, collection aggregates against instance
/// counts, and instance supplies against their 0/1 balance.
#[must_use]
pub fn check_supply_conservation(ledger: &InventoryLedger) -> bool {
    let mut sums: HashMap<TokenId, Amount> = HashMap::new();
    for (_, id, amount) in ledger.balances() {
        let entry = sums.entry(id).or_default();
        *entry = *entry + amount;
    }

    let supplies: HashMap<TokenId, Amount> = ledger.supplies().collect();
    sums.len() == supplies.len()
        && sums
            .iter()
            .all(|(id, sum)| supplies.get(id).copied().unwrap_or_default() == *sum)
}

/// Check all ledger invariants at once.
#[must_use]
pub fn check_all(ledger: &InventoryLedger, codec: &IdentifierCodec) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_instance_balances(ledger, codec) {
        violations.push(InvariantViolation::InstanceBalance);
    }
    if !check_collection_aggregation(ledger, codec) {
        violations.push(InvariantViolation::CollectionAggregation);
    }
    if !check_supply_conservation(ledger) {
        violations.push(InvariantViolation::SupplyConservation);
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// An instance balance entry is not exactly 1, or a live instance has
    /// no backing balance entry.
    InstanceBalance,
    /// An aggregate collection balance disagrees with the instance count.
    CollectionAggregation,
    /// A total supply disagrees with the sum of balances.
    SupplyConservation,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InstanceBalance => write!(f, "instance balance out of range or unbacked"),
            Self::CollectionAggregation => {
                write!(f, "aggregate balance disagrees with instance count")
            }
            Self::SupplyConservation => write!(f, "supply disagrees with balance sum"),
        }
    }
}

fn count_instances(
    ledger: &InventoryLedger,
    codec: &IdentifierCodec,
) -> HashMap<(Address, TokenId), u64> {
    let mut counted: HashMap<(Address, TokenId), u64> = HashMap::new();
    for (instance, record) in ledger.ownership() {
        *counted
            .entry((record.owner, codec.collection_of(instance)))
            .or_default() += 1;
    }
    counted
}

// =============================================================================
// TESTS
// =============================================================================
