//! # Error Types
//!
//! All error taxonomies for the token ledger.
//!
//! Every error aborts the entire enclosing operation with no partial state
//! change; there is no local recovery or silent degradation anywhere in the
//! ledger. Failures are surfaced as distinct, named variants so that calling
//! code (or tests) can assert on the precise cause.

use crate::domain::value_objects::{Address, Amount, TokenId, U256};
use thiserror::Error;

// =============================================================================
// CODEC ERRORS
// =============================================================================

/// Errors from identifier classification and composition.
///
/// Classification itself is total: every 256-bit value is classifiable.
/// These errors arise only from input-domain violations when *composing*
/// identifiers or when an operation requires a specific identifier shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Mask length outside the valid deployment range.
    #[error("invalid mask length: {mask_length} (expected 1..=255)")]
    InvalidMaskLength { mask_length: u16 },

    /// Discriminator is zero or does not fit the discriminator field.
    #[error("invalid discriminator: {discriminator} does not fit {field_bits} bits (zero forbidden)")]
    InvalidDiscriminator {
        discriminator: U256,
        field_bits: u16,
    },

    /// Identifier is not a collection identifier.
    #[error("not a collection identifier: {id:?}")]
    NotACollectionIdentifier { id: TokenId },
}

// =============================================================================
// LAYOUT ERRORS
// =============================================================================

/// Errors from attribute-layout definition and extraction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Attribute declared with a zero bit length.
    #[error("zero-length attribute: {name:?}")]
    ZeroLength { name: String },

    /// Attribute range does not fit in 256 bits.
    #[error("attribute out of bounds: {name:?} at position {position} with length {length}")]
    OutOfBounds {
        name: String,
        position: u16,
        length: u16,
    },

    /// Name/length/position arrays have differing lengths.
    #[error("inconsistent layout arrays: {names} names, {lengths} lengths, {positions} positions")]
    InconsistentArrays {
        names: usize,
        lengths: usize,
        positions: usize,
    },

    /// Named attribute is not present in the scope's layout.
    #[error("unknown attribute: {name:?}")]
    UnknownAttribute { name: String },
}

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors from ledger operations (mint, burn, transfer, approvals, pausing).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    // ---- authorization ----
    /// Caller lacks the minter role.
    #[error("not a minter: {account:?}")]
    NotMinter { account: Address },

    /// Caller lacks the pauser role.
    #[error("not a pauser: {account:?}")]
    NotPauser { account: Address },

    /// Caller lacks the deployment-owner role.
    #[error("not the owner: {account:?}")]
    NotOwner { account: Address },

    /// Operator is neither the holder, an operator-for-all, nor the
    /// approved spender of the instance.
    #[error("operator {operator:?} not approved by {holder:?}")]
    NonApproved { operator: Address, holder: Address },

    // ---- domain classification ----
    /// Identifier denotes a bare non-fungible collection, which cannot
    /// hold balance.
    #[error("not a token identifier: {id:?}")]
    NotTokenId { id: TokenId },

    // ---- shape ----
    /// Mint destination is the null account.
    #[error("mint to the zero address")]
    MintToZero,

    /// Transfer destination is the null account.
    #[error("transfer to the zero address")]
    TransferToZero,

    /// A required account argument is the null account.
    #[error("zero address")]
    ZeroAddress,

    /// Paired arrays have differing lengths.
    #[error("inconsistent arrays: {left} vs {right}")]
    InconsistentArrays { left: usize, right: usize },

    // ---- state ----
    /// Collection was already created; creator and fungibility are immutable.
    #[error("collection already exists: {id:?}")]
    ExistingCollection { id: TokenId },

    /// Collection has not been created (strict creation policy).
    #[error("unknown collection: {id:?}")]
    UnknownCollection { id: TokenId },

    /// Instance is already owned or was burnt; burnt instances are never
    /// re-mintable.
    #[error("existing or burnt instance: {id:?}")]
    ExistingOrBurntNft { id: TokenId },

    /// `from` is not the current owner of the instance (covers
    /// never-minted and already-burnt instances as well).
    #[error("instance {id:?} not owned by {claimed:?}")]
    NonOwnedNft { id: TokenId, claimed: Address },

    /// Instance has no current owner.
    #[error("non-existing instance: {id:?}")]
    NonExistingNft { id: TokenId },

    // ---- quantity ----
    /// Amount is zero where a positive quantity is required.
    #[error("zero value")]
    ZeroValue,

    /// Non-fungible operations move exactly one unit.
    #[error("wrong amount for an instance: {amount} (expected 1)")]
    WrongNftValue { amount: Amount },

    /// Holder balance is smaller than the requested amount.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        required: Amount,
        available: Amount,
    },

    /// Total supply would overflow the 256-bit value domain.
    #[error("supply overflow for {id:?}")]
    SupplyOverflow { id: TokenId },

    // ---- liveness ----
    /// The global pause flag is set.
    #[error("ledger is paused")]
    Paused,

    /// The identifier's collection is in the paused set.
    #[error("identifier is paused: {id:?}")]
    IdIsPaused { id: TokenId },

    // ---- protocol ----
    /// Recipient declined the transfer via the acceptance callback.
    #[error("transfer rejected by recipient {recipient:?}")]
    TransferRejected { recipient: Address },

    // ---- wrapped taxonomies ----
    /// Identifier codec error.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Attribute layout error.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

// =============================================================================
// TESTS
// =============================================================================
